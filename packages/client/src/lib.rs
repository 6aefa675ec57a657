pub mod client;
pub mod config;
pub mod error;
pub mod poller;

pub use client::{JudgeClient, routes};
pub use tokio_util::sync::CancellationToken;
pub use config::{ClientConfig, PollOptions};
pub use error::{ClientError, Result};
pub use poller::poll;
