use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level repository record as returned by the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    #[serde(rename = "forks_count", default)]
    pub forks: u64,
    #[serde(rename = "watchers_count", default)]
    pub watchers: u64,
    #[serde(rename = "open_issues_count", default)]
    pub open_issues: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Commit {
    pub sha: String,
    /// Raw author timestamp; parsed lazily so a malformed value only drops
    /// this commit from the recency buckets.
    pub authored_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub number: u64,
    pub created_at: String,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub comments_url: String,
}

/// Pull requests and contributors are only counted, so their payloads are
/// accepted as any JSON object and not inspected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PullRequest {}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Contributor {}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Comment {
    pub created_at: String,
}

/// Listing filter passed to the issue and pull-request endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
        }
    }
}

/// Everything a single analysis run needs, gathered up front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub owner: String,
    pub repo: String,
    pub info: RepositoryInfo,
    pub contributors: Vec<Contributor>,
    pub recent_commits: Vec<Commit>,
    pub issues: Vec<Issue>,
    pub pulls: Vec<PullRequest>,
    pub topics: Vec<String>,
    pub languages: BTreeMap<String, u64>,
    pub releases: Vec<Release>,
}
