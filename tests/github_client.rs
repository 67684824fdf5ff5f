//! Tests for the HTTP client against a local mock of the hosting API.
//!
//! The client is blocking, so each call runs on tokio's blocking pool while
//! the mock server keeps serving on the runtime workers.

use repowatch::model::{ApiConfig, IssueFilter};
use repowatch::remote::{ApiError, GithubClient, RepoApi};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GithubClient {
    // The blocking client spins up its own runtime, which must not happen
    // directly on an async worker thread.
    tokio::task::block_in_place(|| {
        GithubClient::new(&ApiConfig {
            base_url: server.uri(),
            user_agent: "repowatch-tests".into(),
        })
        .unwrap()
    })
}

fn react_payload() -> serde_json::Value {
    json!({
        "id": 10270250,
        "name": "react",
        "full_name": "facebook/react",
        "owner": { "login": "facebook", "avatar_url": "https://avatars.example/facebook" },
        "description": "The library for web and native user interfaces.",
        "open_issues": 1234,
        "forks": 46600,
        "stargazers_count": 228000,
        "created_at": "2013-05-24T16:15:54Z"
    })
}

fn issue_payload(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Issue {}", id),
        "html_url": format!("https://github.com/facebook/react/issues/{}", id),
        "user": { "login": "octocat", "avatar_url": "https://avatars.example/octocat" },
        "labels": [{ "id": 1, "name": "Type: Bug", "color": "b60205" }],
        "state": "open",
        "created_at": "2024-03-01T12:30:00Z"
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn fetches_repository_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/facebook/react"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(react_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let info = tokio::task::spawn_blocking(move || client.repository("facebook/react"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(info.full_name, "facebook/react");
    assert_eq!(info.owner.login, "facebook");
    assert_eq!(info.stargazers_count, 228000);
    assert_eq!(info.forks, 46600);
    assert_eq!(info.open_issues, 1234);
    assert!(info.has_open_issues());
}

#[tokio::test(flavor = "multi_thread")]
async fn requests_issue_page_with_state_and_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/facebook/react/issues"))
        .and(query_param("state", "open"))
        .and(query_param("per_page", "5"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([issue_payload(1), issue_payload(2)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let issues = tokio::task::spawn_blocking(move || client.issues("facebook/react", IssueFilter::Open, 2))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].author.login, "octocat");
    assert_eq!(issues[0].url, "https://github.com/facebook/react/issues/1");
    assert_eq!(issues[0].labels[0].name, "Type: Bug");
    assert_eq!(issues[0].labels[0].color, "b60205");
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_repository_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = tokio::task::spawn_blocking(move || client.repository("nobody/nothing"))
        .await
        .unwrap()
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/a/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = tokio::task::spawn_blocking(move || client.repository("a/b"))
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unreachable_host_is_network_error() {
    let client = GithubClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:9".into(),
        ..Default::default()
    })
    .unwrap();
    let err = client.repository("a/b").unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
