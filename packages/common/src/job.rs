use serde::{Deserialize, Serialize};

/// Snapshot of a queued job as reported by the judge backend.
///
/// The backend assigns the id at submission time and is the only writer;
/// clients re-fetch fresh snapshots by id until a terminal field shows up.
/// At most one of `response`/`error` is ever populated. While both are
/// absent the job is still pending and `queue_position` is its distance
/// from the head of the queue (0 = being processed or next).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobStatus<T, E> {
    pub id: u64,
    pub queue_position: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<E>,
}

impl<T, E> JobStatus<T, E> {
    /// Returns true if the job has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        self.response.is_some() || self.error.is_some()
    }

    /// Consume the snapshot, extracting the terminal payload if there is one.
    ///
    /// `response` wins if the backend ever populated both fields, which it
    /// never does.
    pub fn into_terminal(self) -> Option<Result<T, E>> {
        match (self.response, self.error) {
            (Some(response), _) => Some(Ok(response)),
            (None, Some(error)) => Some(Err(error)),
            (None, None) => None,
        }
    }
}

/// What the submit endpoint hands back: either a queued job handle, or an
/// inline rejection that never reached the queue (failed precondition,
/// missing authentication, ...).
///
/// Discrimination happens here, once, at deserialization. The handle shape
/// is tried first since it requires the `id` and `queue_position` fields;
/// a terminal handle that happens to carry `error` is therefore never
/// misread as a bare rejection.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmitReply<T, E> {
    Queued(JobStatus<T, E>),
    Rejected(crate::runner::ServerError),
}
