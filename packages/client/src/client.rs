use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use common::forms::{CustomInputForm, GenerateTestsForm, SubmitForm};
use common::submission::Submission;
use common::test::{CustomRunOutput, Test};
use common::{JobError, JobStatus, Outcome, SubmitReply};

use crate::config::{ClientConfig, PollOptions};
use crate::error::{ClientError, Result};
use crate::poller;

/// Judge API endpoint paths, relative to the configured base URL.
pub mod routes {
    pub const SUBMIT: &str = "run/submit";
    pub const CUSTOM: &str = "run/custom";
    pub const GENERATE_TESTS: &str = "run/generate-tests";

    pub fn check(id: u64) -> String {
        format!("run/check/{id}")
    }
}

/// HTTP client for the judge's job queue.
///
/// Stateless between calls: every submission/poll sequence is
/// self-contained and parameterized only by the handle the backend
/// returns, so concurrent flows never share mutable state.
pub struct JudgeClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl JudgeClient {
    /// Build a client from configuration. Session cookies are stored and
    /// replayed automatically; a configured bearer token rides along on
    /// every request.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::Config(config::ConfigError::Message(e.to_string())))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Enqueue a job.
    ///
    /// The reply is either a handle to poll or an inline rejection that
    /// never reached the queue. Transport failures surface as
    /// [`ClientError::Http`], never as a rejection.
    pub async fn submit<T, E, P>(&self, path: &str, payload: &P) -> Result<SubmitReply<T, E>>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        debug!(path, "submitting job");
        let body: serde_json::Value = self
            .http
            .post(self.url(path))
            .json(payload)
            .send()
            .await?
            .json()
            .await?;

        Ok(serde_json::from_value(body)?)
    }

    /// Fetch a fresh status snapshot for a queued job.
    pub async fn check<T, E>(&self, id: u64) -> Result<JobStatus<T, E>>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let body: serde_json::Value = self
            .http
            .get(self.url(&routes::check(id)))
            .send()
            .await?
            .json()
            .await?;

        Ok(serde_json::from_value(body)?)
    }

    /// Submit, poll to completion, classify. The one driver behind every
    /// judge flow.
    ///
    /// `on_queue_position` fires once for the queued handle and once per
    /// pending status fetch, each time with the freshest queue position.
    /// Cancelling `cancel` resolves the call to [`ClientError::Cancelled`]
    /// between fetches.
    pub async fn run_job<T, P, F>(
        &self,
        path: &str,
        payload: &P,
        opts: &PollOptions,
        cancel: &CancellationToken,
        on_queue_position: F,
    ) -> Result<Outcome<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
        F: FnMut(u64),
    {
        match self.submit::<T, JobError, P>(path, payload).await? {
            SubmitReply::Rejected(err) => {
                info!(error = %err, path, "submission rejected before queueing");
                Ok(Outcome::ServerFailure(err))
            }
            SubmitReply::Queued(job) => {
                let id = job.id;
                let result = poller::poll(self, job, opts, cancel, on_queue_position).await?;
                info!(job_id = id, success = result.is_ok(), "job finished");
                Ok(Outcome::from_result(result))
            }
        }
    }

    /// Grade a solution against the problem's hidden test set.
    pub async fn submit_solution(
        &self,
        form: &SubmitForm,
        on_queue_position: impl FnMut(u64),
    ) -> Result<Outcome<Submission>> {
        self.run_job(
            routes::SUBMIT,
            form,
            &self.config.poll,
            &CancellationToken::new(),
            on_queue_position,
        )
        .await
    }

    /// Run a solution once against caller-supplied input.
    pub async fn run_custom_input(
        &self,
        form: &CustomInputForm,
        on_queue_position: impl FnMut(u64),
    ) -> Result<Outcome<CustomRunOutput>> {
        self.run_job(
            routes::CUSTOM,
            form,
            &self.config.poll,
            &CancellationToken::new(),
            on_queue_position,
        )
        .await
    }

    /// Produce test cases by running a reference solution over raw inputs.
    pub async fn generate_tests(
        &self,
        form: &GenerateTestsForm,
        on_queue_position: impl FnMut(u64),
    ) -> Result<Outcome<Vec<Test>>> {
        self.run_job(
            routes::GENERATE_TESTS,
            form,
            &self.config.poll,
            &CancellationToken::new(),
            on_queue_position,
        )
        .await
    }
}
