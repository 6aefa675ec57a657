use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Behavior of a single poll loop.
///
/// The defaults give the ~50 second ceiling the backend queue is sized
/// for (100 attempts at 500 ms). Both knobs are per-call overridable; the
/// ceiling is a default, not a contract.
#[derive(Debug, Deserialize, Clone)]
pub struct PollOptions {
    /// Pause between status fetches, in milliseconds. Default: 500.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Status fetches before giving up. Default: 100.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Restart the attempt budget whenever the job moves in the queue, so
    /// the ceiling bounds time spent stalled rather than total wait.
    /// Default: false.
    #[serde(default)]
    pub reset_budget_on_progress: bool,
}

fn default_interval_ms() -> u64 {
    500
}
fn default_max_attempts() -> u32 {
    100
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: default_max_attempts(),
            reset_budget_on_progress: false,
        }
    }
}

/// Client application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the judge API. Default: "http://localhost:8000/api".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token attached to every request, for deployments that use
    /// token auth instead of the session cookie.
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default)]
    pub poll: PollOptions,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bearer_token: None,
            poll: PollOptions::default(),
        }
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("GAVEL_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("base_url", default_base_url())?
            .set_default("poll.interval_ms", default_interval_ms() as i64)?
            .set_default("poll.max_attempts", default_max_attempts() as i64)?
            .set_default("poll.reset_budget_on_progress", false)?
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("GAVEL").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Override the base URL, mostly useful in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_defaults_cover_fifty_seconds() {
        let opts = PollOptions::default();
        assert_eq!(opts.interval_ms * opts.max_attempts as u64, 50_000);
        assert!(!opts.reset_budget_on_progress);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"poll": {"max_attempts": 3}}"#).unwrap();
        assert_eq!(config.poll.max_attempts, 3);
        assert_eq!(config.poll.interval_ms, 500);
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.bearer_token, None);
    }
}
