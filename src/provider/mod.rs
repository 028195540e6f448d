pub mod cache;
pub mod github;
pub mod http;

use crate::types::telemetry::{
    Comment, Commit, Contributor, Issue, IssueState, PullRequest, Release, RepositoryInfo,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Source of raw repository telemetry.
///
/// Every call is total: transport failures and missing resources degrade to
/// `None`, an empty collection, or `false`. Only a missing repository record
/// is treated as fatal, and that decision belongs to the caller.
pub trait TelemetryProvider {
    fn fetch_repository(&self, owner: &str, repo: &str) -> Option<RepositoryInfo>;

    fn fetch_contributors(&self, owner: &str, repo: &str) -> Vec<Contributor>;

    /// Commits authored in the `since_days` days leading up to `until`.
    fn fetch_recent_commits(
        &self,
        owner: &str,
        repo: &str,
        until: DateTime<Utc>,
        since_days: u32,
    ) -> Vec<Commit>;

    fn fetch_issues(&self, owner: &str, repo: &str, state: IssueState) -> Vec<Issue>;

    fn fetch_pull_requests(&self, owner: &str, repo: &str, state: IssueState)
        -> Vec<PullRequest>;

    fn fetch_first_comment(&self, comments_url: &str) -> Option<Comment>;

    fn file_exists(&self, owner: &str, repo: &str, path: &str) -> bool;

    fn fetch_topics(&self, owner: &str, repo: &str) -> Vec<String>;

    fn fetch_languages(&self, owner: &str, repo: &str) -> BTreeMap<String, u64>;

    fn fetch_releases(&self, owner: &str, repo: &str) -> Vec<Release>;
}
