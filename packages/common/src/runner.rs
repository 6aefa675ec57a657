use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category of failure produced by the sandbox that compiled and ran the
/// submitted code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunnerErrorKind {
    /// The submission did not compile.
    CompileError,
    /// The submission crashed while executing.
    RuntimeError,
    /// The submission tripped an assertion in the harness.
    AssertionError,
}

impl RunnerErrorKind {
    pub const ALL: &'static [RunnerErrorKind] =
        &[Self::CompileError, Self::RuntimeError, Self::AssertionError];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompileError => "CompileError",
            Self::RuntimeError => "RuntimeError",
            Self::AssertionError => "AssertionError",
        }
    }
}

impl fmt::Display for RunnerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid runner error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError {
    invalid: String,
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid runner error kind '{}'. Valid values: {}",
            self.invalid,
            RunnerErrorKind::ALL
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for RunnerErrorKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CompileError" => Ok(Self::CompileError),
            "RuntimeError" => Ok(Self::RuntimeError),
            "AssertionError" => Ok(Self::AssertionError),
            _ => Err(ParseKindError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// Diagnostic for a failure caused by the submitted code itself.
///
/// `kind` is the wire discriminant (serialized as `"type"`); its presence
/// is what distinguishes a runner failure from a backend failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerError {
    #[serde(rename = "type")]
    pub kind: RunnerErrorKind,
    /// Human-readable diagnostic text.
    pub message: String,
    /// Source line the diagnostic points at, when the sandbox knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for RunnerError {}

/// Failure reported by the judge's own infrastructure, not the submitted
/// code. On the wire this is a bare `{error}` object and nothing else;
/// unknown fields are rejected so that a success payload which happens to
/// contain diagnostic text under an `error` key never matches this shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}")]
#[serde(deny_unknown_fields)]
pub struct ServerError {
    pub error: String,
}

impl ServerError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Terminal error payload of a judge job.
///
/// The backend is duck-typed on the wire: a runner failure carries a
/// `type` discriminant, a backend failure carries only `error`. That
/// check lives here, once, at deserialization; call sites match on the
/// variant instead of probing fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(untagged)]
pub enum JobError {
    #[error("{0}")]
    Runner(RunnerError),
    #[error("{0}")]
    Server(ServerError),
}
