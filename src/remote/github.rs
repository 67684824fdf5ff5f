use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::model::{ApiConfig, ISSUES_PER_PAGE, Issue, IssueFilter, RepositoryInfo};

use super::{ApiError, RepoApi};

/// Unauthenticated client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubClient {
    base_url: Url,
    http: Client,
}

impl GithubClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(GithubClient {
            base_url: normalize_base_url(&config.base_url)?,
            http,
        })
    }

    /// URL of the repository endpoint for an "owner/name" identifier
    pub fn repository_url(&self, name: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(&repo_path(name))?)
    }

    /// URL of one page of the issue listing
    pub fn issues_url(&self, name: &str, filter: IssueFilter, page: u32) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(&format!("{}/issues", repo_path(name)))?;
        url.query_pairs_mut()
            .append_pair("state", filter.as_query())
            .append_pair("per_page", &ISSUES_PER_PAGE.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(url = %url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }
        response.json().map_err(ApiError::Decode)
    }
}

impl RepoApi for GithubClient {
    fn repository(&self, name: &str) -> Result<RepositoryInfo, ApiError> {
        let url = self.repository_url(name)?;
        self.get_json(url)
    }

    fn issues(&self, name: &str, filter: IssueFilter, page: u32) -> Result<Vec<Issue>, ApiError> {
        let url = self.issues_url(name, filter, page)?;
        self.get_json(url)
    }
}

/// Parse the base URL, making sure joins append to its path instead of
/// replacing the last segment (matters for `https://host/api/v3`).
fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut base = raw.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?)
}

/// `repos/<owner>/<name>` with each segment percent-encoded
fn repo_path(name: &str) -> String {
    let segments: Vec<String> = name
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("repos/{}", segments.join("/"))
}
