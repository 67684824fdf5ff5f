use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{TimeZone, Utc};

use crate::model::{Account, Issue, IssueFilter, IssueLabel, RepositoryInfo};

use super::{ApiError, RepoApi};

/// In-memory API for tests. Unknown repositories and pages answer 404.
#[derive(Default)]
pub struct FakeApi {
    repos: HashMap<String, RepositoryInfo>,
    pages: HashMap<(String, IssueFilter, u32), Vec<Issue>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repository reachable under `lookup` whose canonical name is `full_name`
    pub fn with_repo(mut self, lookup: &str, full_name: &str) -> Self {
        self.repos.insert(lookup.to_string(), repo_info(full_name));
        self
    }

    pub fn with_page(mut self, name: &str, filter: IssueFilter, page: u32, issues: Vec<Issue>) -> Self {
        self.pages.insert((name.to_string(), filter, page), issues);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: reqwest::StatusCode::NOT_FOUND,
        url: format!("fake://{}", what),
    }
}

impl RepoApi for FakeApi {
    fn repository(&self, name: &str) -> Result<RepositoryInfo, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("repo {}", name));
        }
        self.repos.get(name).cloned().ok_or_else(|| not_found(name))
    }

    fn issues(&self, name: &str, filter: IssueFilter, page: u32) -> Result<Vec<Issue>, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("issues {} {} {}", name, filter, page));
        }
        self.pages
            .get(&(name.to_string(), filter, page))
            .cloned()
            .ok_or_else(|| not_found(name))
    }
}

pub fn repo_info(full_name: &str) -> RepositoryInfo {
    let (owner, name) = full_name.split_once('/').unwrap_or(("owner", full_name));
    RepositoryInfo {
        owner: Account {
            login: owner.to_string(),
            avatar_url: format!("https://avatars.example/{}", owner),
        },
        name: name.to_string(),
        full_name: full_name.to_string(),
        description: Some(format!("The {} project", name)),
        open_issues: 1234,
        forks: 56,
        stargazers_count: 228_000,
        created_at: Utc.with_ymd_and_hms(2013, 5, 24, 16, 15, 54).unwrap(),
    }
}

pub fn issue(id: u64, title: &str) -> Issue {
    Issue {
        id,
        author: Account {
            login: format!("user{}", id),
            avatar_url: String::new(),
        },
        title: title.to_string(),
        url: format!("https://github.com/owner/repo/issues/{}", id),
        labels: vec![IssueLabel {
            id: 1,
            name: "bug".into(),
            color: "d73a4a".into(),
        }],
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
    }
}

/// `count` issues with ids starting at `first_id`
pub fn issues(first_id: u64, count: usize, prefix: &str) -> Vec<Issue> {
    (0..count as u64)
        .map(|i| issue(first_id + i, &format!("{} issue {}", prefix, first_id + i)))
        .collect()
}
