use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Verdict row the backend records for a graded submission and returns as
/// the success payload of `run/submit`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub problem_id: i64,
    pub user_id: i64,
    /// True when every hidden test passed.
    pub success: bool,
    /// Worst-case runtime across the test set, in fuel units.
    pub runtime: i64,
    /// Diagnostic text when the run failed outright.
    pub error: Option<String>,
    /// The submitted source, echoed back for the submission history view.
    pub code: String,
    pub time: NaiveDateTime,
    /// Estimated asymptotic complexity class, when the grader could fit one.
    pub complexity: Option<String>,
}
