use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repo::Account;

/// Number of issues requested per page
pub const ISSUES_PER_PAGE: usize = 5;

/// Issue status filter; maps 1:1 to the API's `state` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl IssueFilter {
    pub const ALL: [IssueFilter; 3] = [IssueFilter::All, IssueFilter::Open, IssueFilter::Closed];

    /// Value of the `state` query parameter
    pub fn as_query(self) -> &'static str {
        match self {
            IssueFilter::All => "all",
            IssueFilter::Open => "open",
            IssueFilter::Closed => "closed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IssueFilter::All => "All",
            IssueFilter::Open => "Open",
            IssueFilter::Closed => "Closed",
        }
    }

    /// Next filter in display order, wrapping around
    pub fn next(self) -> IssueFilter {
        match self {
            IssueFilter::All => IssueFilter::Open,
            IssueFilter::Open => IssueFilter::Closed,
            IssueFilter::Closed => IssueFilter::All,
        }
    }

    pub fn prev(self) -> IssueFilter {
        match self {
            IssueFilter::All => IssueFilter::Closed,
            IssueFilter::Open => IssueFilter::All,
            IssueFilter::Closed => IssueFilter::Open,
        }
    }
}

impl fmt::Display for IssueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for IssueFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(IssueFilter::All),
            "open" => Ok(IssueFilter::Open),
            "closed" => Ok(IssueFilter::Closed),
            other => Err(format!(
                "invalid state '{}' (expected all, open or closed)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLabel {
    pub id: u64,
    pub name: String,
    /// Hex color without the leading '#', e.g. "d73a4a"
    #[serde(default)]
    pub color: String,
}

/// One issue as returned by the issues listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    #[serde(rename = "user")]
    pub author: Account,
    pub title: String,
    #[serde(rename = "html_url")]
    pub url: String,
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_query_values() {
        assert_eq!(IssueFilter::All.as_query(), "all");
        assert_eq!(IssueFilter::Open.as_query(), "open");
        assert_eq!(IssueFilter::Closed.as_query(), "closed");
        assert_eq!(IssueFilter::default(), IssueFilter::All);
    }

    #[test]
    fn filter_parse() {
        assert_eq!("open".parse::<IssueFilter>(), Ok(IssueFilter::Open));
        assert_eq!("closed".parse::<IssueFilter>(), Ok(IssueFilter::Closed));
        assert!("Open".parse::<IssueFilter>().is_err());
        assert!("".parse::<IssueFilter>().is_err());
    }

    #[test]
    fn filter_cycle_wraps() {
        for f in IssueFilter::ALL {
            assert_eq!(f.next().prev(), f);
        }
        assert_eq!(IssueFilter::Closed.next(), IssueFilter::All);
        assert_eq!(IssueFilter::All.prev(), IssueFilter::Closed);
    }

    #[test]
    fn deserialize_issue_payload() {
        let json = r#"{
            "id": 1800000001,
            "number": 42,
            "title": "Crash on startup",
            "html_url": "https://github.com/facebook/react/issues/42",
            "user": {"login": "octocat", "avatar_url": "https://avatars.example/octocat"},
            "labels": [
                {"id": 1, "name": "bug", "color": "d73a4a", "default": true},
                {"id": 2, "name": "good first issue", "color": "7057ff"}
            ],
            "state": "open",
            "created_at": "2024-03-01T12:30:00Z"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 1800000001);
        assert_eq!(issue.author.login, "octocat");
        assert_eq!(issue.url, "https://github.com/facebook/react/issues/42");
        assert_eq!(issue.labels.len(), 2);
        assert_eq!(issue.labels[1].name, "good first issue");
        assert_eq!(issue.labels[0].color, "d73a4a");
    }

    #[test]
    fn issue_without_labels() {
        let json = r#"{
            "id": 7,
            "title": "No labels",
            "html_url": "https://github.com/a/b/issues/7",
            "user": {"login": "x"},
            "created_at": "2024-03-01T12:30:00Z"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.labels.is_empty());
        assert_eq!(issue.author.avatar_url, "");
    }
}
