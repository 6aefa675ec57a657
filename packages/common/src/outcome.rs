use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::runner::{JobError, RunnerError, ServerError};

/// Classified terminal state of a judge job, the single discriminated
/// outcome UI layers consume.
#[derive(Clone, Debug)]
pub enum Outcome<T> {
    /// The job completed and produced a payload.
    Success(T),
    /// The submitted code failed in the sandbox (compile error, crash,
    /// tripped assertion). Recoverable by fixing the submission.
    RunnerFailure(RunnerError),
    /// The judge's own backend failed while processing the job.
    ServerFailure(ServerError),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Human-readable summary of a failure, `None` on success. Callers
    /// that want more detail match on the variant instead.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::RunnerFailure(err) => Some(err.to_string()),
            Self::ServerFailure(err) => Some(err.to_string()),
        }
    }

    /// Fold an already-discriminated job result into an outcome.
    pub fn from_result(result: Result<T, JobError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(JobError::Runner(err)) => Self::RunnerFailure(err),
            Err(JobError::Server(err)) => Self::ServerFailure(err),
        }
    }
}

impl<T: DeserializeOwned> Outcome<T> {
    /// Classify a raw terminal payload.
    ///
    /// Error shapes are checked before the success shape: a `type`
    /// discriminant marks a runner failure, a bare `error` string marks a
    /// backend failure, anything else must deserialize as the success
    /// payload. Payloads that fit none of the three shapes are malformed
    /// and bubble up as a deserialization error.
    pub fn classify(value: Value) -> Result<Self, serde_json::Error> {
        if let Ok(err) = serde_json::from_value::<JobError>(value.clone()) {
            return Ok(Self::from_result(Err(err)));
        }
        serde_json::from_value(value).map(Self::Success)
    }
}

impl<T> From<JobError> for Outcome<T> {
    fn from(err: JobError) -> Self {
        Self::from_result(Err(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunnerErrorKind;
    use serde_json::json;

    #[test]
    fn test_classify_runner_failure() {
        let outcome: Outcome<Value> =
            Outcome::classify(json!({"type": "CompileError", "message": "x"})).unwrap();
        match outcome {
            Outcome::RunnerFailure(err) => {
                assert_eq!(err.kind, RunnerErrorKind::CompileError);
                assert_eq!(err.message, "x");
                assert_eq!(err.line, None);
            }
            _ => panic!("expected RunnerFailure"),
        }
    }

    #[test]
    fn test_classify_server_failure() {
        let outcome: Outcome<Value> = Outcome::classify(json!({"error": "backend down"})).unwrap();
        match outcome {
            Outcome::ServerFailure(err) => assert_eq!(err.error, "backend down"),
            _ => panic!("expected ServerFailure"),
        }
    }

    #[test]
    fn test_classify_success_payload_untouched() {
        let payload = json!({"success": true, "runtime": 1000});
        let outcome: Outcome<Value> = Outcome::classify(payload.clone()).unwrap();
        match outcome {
            Outcome::Success(value) => assert_eq!(value, payload),
            _ => panic!("expected Success"),
        }
    }

    #[test]
    fn test_classify_success_payload_with_error_field() {
        // A verdict row carries its own diagnostic text under `error`;
        // the extra fields keep it from matching the bare backend-error
        // shape.
        let outcome: Outcome<crate::submission::Submission> = Outcome::classify(json!({
            "id": 10,
            "problem_id": 1,
            "user_id": 99,
            "success": false,
            "runtime": 0,
            "error": "index out of bounds",
            "code": "int main(){}",
            "time": "2024-01-15T10:00:00",
            "complexity": null,
        }))
        .unwrap();
        match outcome {
            Outcome::Success(submission) => {
                assert_eq!(submission.error.as_deref(), Some("index out of bounds"));
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_rejects_garbage() {
        #[derive(Debug, serde::Deserialize)]
        struct Typed {
            #[allow(dead_code)]
            runtime: u64,
        }
        assert!(Outcome::<Typed>::classify(json!({"unrelated": 1})).is_err());
    }

    #[test]
    fn test_failure_message() {
        let outcome: Outcome<Value> = Outcome::ServerFailure(ServerError::new("down"));
        assert_eq!(outcome.failure_message().as_deref(), Some("down"));
        let outcome: Outcome<Value> = Outcome::Success(json!(1));
        assert!(outcome.failure_message().is_none());
        assert!(outcome.is_success());
    }
}
