pub mod target;

use crate::error::{AnalyzerError, Result};
use crate::provider::TelemetryProvider;
use crate::types::telemetry::{IssueState, TelemetrySnapshot};
use chrono::{DateTime, Utc};

pub const RECENT_COMMIT_WINDOW_DAYS: u32 = 30;

/// Gathers every piece of telemetry one analysis needs, one call at a time.
/// Only a missing repository record aborts; secondary fetches are already
/// total and arrive empty when unavailable. The commit window ends at `now`.
pub fn collect<P: TelemetryProvider + ?Sized>(
    provider: &P,
    owner: &str,
    repo: &str,
    now: DateTime<Utc>,
) -> Result<TelemetrySnapshot> {
    let info = provider
        .fetch_repository(owner, repo)
        .ok_or(AnalyzerError::RepositoryNotFound)?;

    let snapshot = TelemetrySnapshot {
        owner: owner.to_string(),
        repo: repo.to_string(),
        info,
        contributors: provider.fetch_contributors(owner, repo),
        recent_commits: provider.fetch_recent_commits(
            owner,
            repo,
            now,
            RECENT_COMMIT_WINDOW_DAYS,
        ),
        issues: provider.fetch_issues(owner, repo, IssueState::Open),
        pulls: provider.fetch_pull_requests(owner, repo, IssueState::Open),
        topics: provider.fetch_topics(owner, repo),
        languages: provider.fetch_languages(owner, repo),
        releases: provider.fetch_releases(owner, repo),
    };

    tracing::debug!(
        owner,
        repo,
        contributors = snapshot.contributors.len(),
        commits = snapshot.recent_commits.len(),
        issues = snapshot.issues.len(),
        pulls = snapshot.pulls.len(),
        "collected telemetry snapshot"
    );
    Ok(snapshot)
}
