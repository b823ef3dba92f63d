use serde::Serialize;
use thiserror::Error;

/// Failure of a single call to the OpenDota API
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchError {
    #[error("resource not found")]
    NotFound,

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// A raw match that cannot be turned into a match record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchDataError {
    #[error("match {match_id:?} has no {field} field")]
    MissingField {
        match_id: Option<i64>,
        field: &'static str,
    },
}

/// User supplied input that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("account id must be a positive number, got {0:?}")]
    InvalidAccountId(String),

    #[error("match count must be a non-negative number, got {0:?}")]
    InvalidMatchCount(String),

    #[error("malformed form: {0}")]
    MalformedForm(String),
}

/// Failure of a whole two-player comparison
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("comparison did not finish within {0} seconds")]
    Timeout(u64),

    #[error("{limit} matches need {needed}s of rate-limited requests, deadline is {deadline}s")]
    BudgetExceeded { limit: u32, needed: u64, deadline: u64 },
}
