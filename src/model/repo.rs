use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository on the watchlist. `name` is the canonical "owner/repo" identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRepository {
    pub name: String,
}

impl TrackedRepository {
    pub fn new(name: impl Into<String>) -> Self {
        TrackedRepository { name: name.into() }
    }
}

/// A user account as embedded in repository and issue payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// Repository metadata shown on the detail screen. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub owner: Account,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub stargazers_count: u64,
    pub created_at: DateTime<Utc>,
}

impl RepositoryInfo {
    /// The issue filter is only meaningful when the repository has open issues
    pub fn has_open_issues(&self) -> bool {
        self.open_issues > 0
    }
}
