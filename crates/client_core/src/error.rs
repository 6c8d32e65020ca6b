use shared::domain::IssueId;
use thiserror::Error;

/// Failure of the one-shot issue collection fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid issues API base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to reach issues API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("issues API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode issues payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFilterError {
    #[error("unknown status '{0}' (expected all, pending, in-progress or resolved)")]
    Status(String),
    #[error("unknown sort order '{0}' (expected newest or oldest)")]
    Sort(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("issue {0} is not in the current list")]
    UnknownIssue(IssueId),
}
