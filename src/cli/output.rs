use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::model::{Issue, IssueFilter, RepositoryInfo};
use crate::util::format::{DateStyle, format_date, format_number};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RepositoryJson {
    pub full_name: String,
    pub owner: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct IssueJson {
    pub id: u64,
    pub author: String,
    pub title: String,
    pub url: String,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct IssuePageJson {
    pub repository: String,
    pub state: IssueFilter,
    pub page: u32,
    pub has_more: bool,
    pub issues: Vec<IssueJson>,
}

pub fn repository_to_json(info: &RepositoryInfo) -> RepositoryJson {
    RepositoryJson {
        full_name: info.full_name.clone(),
        owner: info.owner.login.clone(),
        name: info.name.clone(),
        description: info.description.clone(),
        stars: info.stargazers_count,
        forks: info.forks,
        open_issues: info.open_issues,
        created_at: info.created_at,
    }
}

pub fn issue_to_json(issue: &Issue) -> IssueJson {
    IssueJson {
        id: issue.id,
        author: issue.author.login.clone(),
        title: issue.title.clone(),
        url: issue.url.clone(),
        labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
        created_at: issue.created_at,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Multi-line summary for `rw info`
pub fn format_repository(info: &RepositoryInfo) -> String {
    let mut out = String::new();
    out.push_str(&info.full_name);
    out.push('\n');
    out.push_str(&format!(
        "by {}, created {}\n",
        info.owner.login,
        format_date(&info.created_at.with_timezone(&Local), DateStyle::Long)
    ));
    if let Some(description) = info.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(description);
        out.push('\n');
    }
    out.push_str(&format!(
        "stars: {}  forks: {}  open issues: {}",
        format_number(info.stargazers_count),
        format_number(info.forks),
        format_number(info.open_issues)
    ));
    out
}

/// Two lines per issue: id, author, title and date, then URL and labels
pub fn format_issue(issue: &Issue) -> String {
    let date = format_date(&issue.created_at.with_timezone(&Local), DateStyle::Short);
    let mut out = format!(
        "#{}  {}  {}  ({})\n    {}",
        issue.id, issue.author.login, issue.title, date, issue.url
    );
    for label in &issue.labels {
        out.push_str(&format!("  [{}]", label.name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::{issue, repo_info};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn repository_text() {
        let info = repo_info("facebook/react");
        let created = format_date(&info.created_at.with_timezone(&Local), DateStyle::Long);
        assert_eq!(
            format_repository(&info),
            format!(
                "facebook/react\n\
                 by facebook, created {}\n\
                 The react project\n\
                 stars: 228.000  forks: 56  open issues: 1.234",
                created
            )
        );
    }

    #[test]
    fn creation_date_is_shown_in_local_time() {
        // 23:30 UTC is already the next day east of Greenwich
        let mut info = repo_info("a/b");
        info.created_at = Utc.with_ymd_and_hms(2020, 1, 31, 23, 30, 0).unwrap();
        let local = info.created_at.with_timezone(&Local);
        let expected = format!("created {}", format_date(&local, DateStyle::Long));
        assert!(format_repository(&info).contains(&expected));
    }

    #[test]
    fn repository_text_without_description() {
        let mut info = repo_info("a/b");
        info.description = None;
        assert!(!format_repository(&info).contains("The b project"));
        assert_eq!(format_repository(&info).lines().count(), 3);
    }

    #[test]
    fn issue_text_has_url_and_labels() {
        let text = format_issue(&issue(7, "Crash on start"));
        let mut lines = text.lines();
        let first = lines.next().unwrap();
        assert!(first.starts_with("#7  user7  Crash on start  ("));
        assert_eq!(lines.next().unwrap(), "    https://github.com/owner/repo/issues/7  [bug]");
    }

    #[test]
    fn issue_json_flattens_author_and_labels() {
        let json = serde_json::to_value(issue_to_json(&issue(7, "x"))).unwrap();
        assert_eq!(json["author"], "user7");
        assert_eq!(json["labels"], serde_json::json!(["bug"]));
        assert_eq!(json["url"], "https://github.com/owner/repo/issues/7");
    }
}
