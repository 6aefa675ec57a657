pub mod forms;
pub mod job;
pub mod outcome;
pub mod runner;
pub mod submission;

pub use job::{JobStatus, SubmitReply};
pub use outcome::Outcome;
pub use runner::{JobError, RunnerError, RunnerErrorKind, ServerError};
