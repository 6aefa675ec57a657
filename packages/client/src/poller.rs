use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use common::JobStatus;

use crate::client::JudgeClient;
use crate::config::PollOptions;
use crate::error::{ClientError, Result};

/// Watch a queued job until it reaches a terminal state.
///
/// Fetches the job's status every `opts.interval_ms` milliseconds,
/// invoking `on_queue_position` once for the handle itself and once per
/// pending fetch so the caller can render progress. Resolves with the
/// terminal payload, with [`ClientError::Timeout`] after
/// `opts.max_attempts` pending fetches, or with
/// [`ClientError::Cancelled`] if `cancel` fires between fetches. Once a
/// terminal field is observed no further requests are issued.
///
/// A transport failure mid-poll is not retried here; it propagates and
/// the caller decides whether to resubmit.
pub async fn poll<T, E, F>(
    client: &JudgeClient,
    job: JobStatus<T, E>,
    opts: &PollOptions,
    cancel: &CancellationToken,
    mut on_queue_position: F,
) -> Result<std::result::Result<T, E>>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
    F: FnMut(u64),
{
    // A handle can be rejected by the queue at submit time; no round-trip
    // needed to report that.
    if let Some(error) = job.error {
        return Ok(Err(error));
    }

    // The submit reply is itself the first pending observation.
    on_queue_position(job.queue_position);

    let interval = Duration::from_millis(opts.interval_ms);
    let mut last_position = job.queue_position;

    let started = Instant::now();
    let mut attempt = 0;
    while attempt < opts.max_attempts {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let status = client.check::<T, E>(job.id).await?;
        let position = status.queue_position;

        if let Some(terminal) = status.into_terminal() {
            debug!(job_id = job.id, "job reached a terminal state");
            return Ok(terminal);
        }

        if opts.reset_budget_on_progress && position != last_position {
            attempt = 0;
        }

        on_queue_position(position);
        debug!(
            job_id = job.id,
            queue_position = position,
            attempt,
            "job still pending"
        );
        last_position = position;
        attempt += 1;

        tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            _ = sleep(interval) => {}
        }
    }

    // Budget resets can stretch the loop well past interval * max_attempts;
    // report the time actually spent waiting.
    Err(ClientError::Timeout {
        waited: started.elapsed(),
    })
}
