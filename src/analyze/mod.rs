pub mod activity;
pub mod compare;
pub mod governance;
pub mod popularity;
pub mod recommendations;

#[cfg(test)]
pub mod test_support;

use crate::error::Result;
use crate::provider::TelemetryProvider;
use crate::scan;
use crate::types::config::DEFAULT_RESPONSE_SAMPLE_SIZE;
use crate::types::report::AnalysisResult;
use crate::types::scoring::{ScoreCard, Weights};
use crate::types::telemetry::TelemetrySnapshot;
use activity::{ActivityInputs, MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS};
use chrono::{DateTime, Utc};
use popularity::PopularityInputs;

/// Turns repository telemetry into sub-scores, an overall score and
/// recommendations. Holds no state between calls beyond its configuration.
pub struct ScoreEngine<P> {
    provider: P,
    weights: Weights,
    response_sample_size: usize,
    now: Option<DateTime<Utc>>,
}

impl<P: TelemetryProvider> ScoreEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            weights: Weights::default(),
            response_sample_size: DEFAULT_RESPONSE_SAMPLE_SIZE,
            now: None,
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_response_sample_size(mut self, sample_size: usize) -> Self {
        self.response_sample_size = sample_size;
        self
    }

    /// Pins the instant recency windows are measured from.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn analyze(&self, owner: &str, repo: &str) -> Result<AnalysisResult> {
        tracing::info!(owner, repo, "analyzing repository");
        let now = self.now.unwrap_or_else(Utc::now);
        let snapshot = scan::collect(&self.provider, owner, repo, now)?;
        let result = self.analyze_snapshot(&snapshot, now);
        tracing::info!(
            owner,
            repo,
            overall = result.overall_score,
            "analysis complete"
        );
        Ok(result)
    }

    /// Scores a snapshot with recency windows ending at `now`.
    pub fn analyze_snapshot(
        &self,
        snapshot: &TelemetrySnapshot,
        now: DateTime<Utc>,
    ) -> AnalysisResult {
        let info = &snapshot.info;

        let popularity = popularity::popularity_score(&PopularityInputs {
            stars: info.stars,
            forks: info.forks,
            watchers: info.watchers,
            open_issues: info.open_issues,
            recent_commits: snapshot.recent_commits.len(),
            contributors: snapshot.contributors.len(),
        });

        let samples = activity::response_latencies(
            &self.provider,
            &snapshot.issues,
            self.response_sample_size,
        );
        let commits = &snapshot.recent_commits;
        let activity = activity::activity_score(&ActivityInputs {
            commits_30: activity::commits_within(commits, now, MONTH_WINDOW_DAYS),
            commits_7: activity::commits_within(commits, now, WEEK_WINDOW_DAYS),
            avg_response_hours: activity::average(&samples),
            response_samples: samples.len(),
            open_issues: snapshot.issues.len(),
            open_pulls: snapshot.pulls.len(),
        });

        let present =
            governance::detect_checklist(&self.provider, &snapshot.owner, &snapshot.repo);
        let governance = governance::governance_score(&present);

        let card = ScoreCard::new(popularity.score, activity.score, governance.score)
            .finalize(&self.weights);
        let recommendations = recommendations::recommendations(&card);

        AnalysisResult {
            owner: snapshot.owner.clone(),
            repo_name: snapshot.repo.clone(),
            full_name: info.full_name.clone(),
            description: info.description.clone().unwrap_or_default(),
            language: info
                .language
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            github_url: info.html_url.clone(),
            last_updated: info.updated_at.clone(),
            stars: info.stars,
            forks: info.forks,
            watchers: info.watchers,
            open_issues: info.open_issues,
            open_pulls: snapshot.pulls.len() as u64,
            popularity,
            activity,
            governance,
            overall_score: card.overall,
            recommendations,
            topics: snapshot.topics.clone(),
            languages: snapshot.languages.clone(),
            releases_count: snapshot.releases.len(),
            latest_release: snapshot
                .releases
                .first()
                .map(|release| release.tag_name.clone()),
            contributors_count: snapshot.contributors.len(),
            recent_commits_count: snapshot.recent_commits.len(),
            analyzed_at: now,
        }
    }
}
