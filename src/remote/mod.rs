//! Read-only access to the remote code-hosting API.
//!
//! Everything above this module talks to [`RepoApi`], so the watchlist store,
//! the issue feed and the TUI can be driven by a fake in tests.

pub mod github;

#[cfg(test)]
pub(crate) mod fake;

pub use github::GithubClient;

use crate::model::{Issue, IssueFilter, RepositoryInfo};

/// Any failure talking to the remote API. Callers treat every variant the
/// same way ("could not reach / not found"); the variants exist for logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// True when the remote answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}

/// The two read operations the dashboard needs. Implementations must be
/// shareable across the fetch worker threads.
pub trait RepoApi: Send + Sync {
    /// `GET /repos/{owner}/{name}`
    fn repository(&self, name: &str) -> Result<RepositoryInfo, ApiError>;

    /// `GET /repos/{owner}/{name}/issues?state=..&per_page=5&page=..`
    fn issues(&self, name: &str, filter: IssueFilter, page: u32) -> Result<Vec<Issue>, ApiError>;
}
