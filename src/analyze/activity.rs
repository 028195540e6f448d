use crate::provider::TelemetryProvider;
use crate::types::scoring::{Score, SubScore, MAX_SCORE};
use crate::types::telemetry::{Commit, Issue};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

pub const MONTH_WINDOW_DAYS: i64 = 30;
pub const WEEK_WINDOW_DAYS: i64 = 7;

const MAX_COMMIT_SCORE: Score = 50.0;
const MAX_ENGAGEMENT_SCORE: Score = 20.0;

/// (exclusive upper bound in hours, label, score). Anything slower, or no
/// sample at all, is "Poor" and earns nothing.
const RESPONSE_TIERS: &[(f64, &str, Score)] = &[
    (24.0, "Excellent", 30.0),
    (168.0, "Good", 20.0),
    (720.0, "Fair", 10.0),
];

/// (commits in the last 30 days must exceed, label).
const ACTIVITY_LEVELS: &[(usize, &str)] = &[
    (20, "Very High"),
    (10, "High"),
    (5, "Moderate"),
    (0, "Low"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityInputs {
    pub commits_30: usize,
    pub commits_7: usize,
    /// `None` when no issue produced a response sample.
    pub avg_response_hours: Option<f64>,
    pub response_samples: usize,
    pub open_issues: usize,
    pub open_pulls: usize,
}

/// Parses platform timestamps, honouring an explicit offset when present.
/// Timestamps without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
}

pub fn commits_within(commits: &[Commit], now: DateTime<Utc>, days: i64) -> usize {
    let cutoff = now - Duration::days(days);
    commits
        .iter()
        .filter_map(|commit| {
            let parsed = commit.authored_at.as_deref().and_then(parse_timestamp);
            if parsed.is_none() {
                tracing::debug!(sha = %commit.sha, "skipping commit with unparseable timestamp");
            }
            parsed
        })
        .filter(|authored| *authored > cutoff && *authored <= now)
        .count()
}

/// Hours from issue creation to its first comment, for the first
/// `sample_size` issues in supplied order that have any comments.
pub fn response_latencies<P: TelemetryProvider + ?Sized>(
    provider: &P,
    issues: &[Issue],
    sample_size: usize,
) -> Vec<f64> {
    issues
        .iter()
        .take(sample_size)
        .filter(|issue| issue.comments > 0)
        .filter_map(|issue| {
            let Some(comment) = provider.fetch_first_comment(&issue.comments_url) else {
                tracing::debug!(issue = issue.number, "first comment unavailable");
                return None;
            };
            let opened = parse_timestamp(&issue.created_at)?;
            let answered = parse_timestamp(&comment.created_at)?;
            Some((answered - opened).num_seconds() as f64 / 3600.0)
        })
        .collect()
}

pub fn average(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

fn response_tier(avg_hours: Option<f64>) -> (&'static str, Score) {
    avg_hours
        .and_then(|hours| {
            RESPONSE_TIERS
                .iter()
                .find(|(limit, _, _)| hours < *limit)
                .map(|(_, label, score)| (*label, *score))
        })
        .unwrap_or(("Poor", 0.0))
}

fn activity_level(commits_30: usize) -> &'static str {
    ACTIVITY_LEVELS
        .iter()
        .find(|(floor, _)| commits_30 > *floor)
        .map(|(_, label)| *label)
        .unwrap_or("Inactive")
}

pub fn activity_score(inputs: &ActivityInputs) -> SubScore {
    let commit_score =
        ((inputs.commits_30 * 2 + inputs.commits_7 * 5) as Score).min(MAX_COMMIT_SCORE);
    let (quality, response_score) = response_tier(inputs.avg_response_hours);
    let engagement_score =
        ((inputs.open_issues + inputs.open_pulls) as Score * 0.5).min(MAX_ENGAGEMENT_SCORE);
    let total = (commit_score + response_score + engagement_score).min(MAX_SCORE);

    let narrative = format!(
        "Maintainer activity level: {}. Response quality: {}. Recent commits: {} (30 days), {} (7 days). Open issues: {}, Open PRs: {}.",
        activity_level(inputs.commits_30),
        quality,
        inputs.commits_30,
        inputs.commits_7,
        inputs.open_issues,
        inputs.open_pulls
    );

    SubScore::new(total, narrative)
        .with_metric("commits_30_days", inputs.commits_30)
        .with_metric("commits_7_days", inputs.commits_7)
        .with_metric(
            "avg_response_time_hours",
            inputs.avg_response_hours.map(Value::from).unwrap_or(Value::Null),
        )
        .with_metric("response_samples", inputs.response_samples)
        .with_metric("commit_score", commit_score)
        .with_metric("response_score", response_score)
        .with_metric("engagement_score", engagement_score)
        .with_metric("open_issues", inputs.open_issues)
        .with_metric("open_pulls", inputs.open_pulls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::test_support::FakeProvider;
    use crate::types::telemetry::Comment;

    fn now() -> DateTime<Utc> {
        parse_timestamp("2024-06-30T12:00:00Z").expect("fixed instant")
    }

    fn commit(sha: &str, at: &str) -> Commit {
        Commit {
            sha: sha.to_string(),
            authored_at: Some(at.to_string()),
        }
    }

    fn issue(number: u64, created_at: &str, comments: u32) -> Issue {
        Issue {
            number,
            created_at: created_at.to_string(),
            comments,
            comments_url: format!("https://api.github.com/repos/o/r/issues/{number}/comments"),
        }
    }

    #[test]
    fn idle_repository_scores_zero() {
        let result = activity_score(&ActivityInputs::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.metrics["commit_score"], 0.0);
        assert_eq!(result.metrics["response_score"], 0.0);
        assert_eq!(result.metrics["engagement_score"], 0.0);
        assert_eq!(result.metrics["avg_response_time_hours"], Value::Null);
        assert!(result.narrative.contains("Maintainer activity level: Inactive"));
        assert!(result.narrative.contains("Response quality: Poor"));
    }

    #[test]
    fn busy_repository_scenario_scores_84() {
        let result = activity_score(&ActivityInputs {
            commits_30: 25,
            commits_7: 8,
            avg_response_hours: Some(12.0),
            response_samples: 3,
            open_issues: 5,
            open_pulls: 3,
        });
        assert_eq!(result.metrics["commit_score"], 50.0);
        assert_eq!(result.metrics["response_score"], 30.0);
        assert_eq!(result.metrics["engagement_score"], 4.0);
        assert_eq!(result.score, 84.0);
        assert_eq!(
            result.narrative,
            "Maintainer activity level: Very High. Response quality: Excellent. Recent commits: 25 (30 days), 8 (7 days). Open issues: 5, Open PRs: 3."
        );
    }

    #[test]
    fn response_tiers_use_exclusive_bounds() {
        assert_eq!(response_tier(Some(23.9)), ("Excellent", 30.0));
        assert_eq!(response_tier(Some(24.0)), ("Good", 20.0));
        assert_eq!(response_tier(Some(167.9)), ("Good", 20.0));
        assert_eq!(response_tier(Some(168.0)), ("Fair", 10.0));
        assert_eq!(response_tier(Some(720.0)), ("Poor", 0.0));
        assert_eq!(response_tier(None), ("Poor", 0.0));
    }

    #[test]
    fn activity_levels_follow_thresholds() {
        assert_eq!(activity_level(21), "Very High");
        assert_eq!(activity_level(20), "High");
        assert_eq!(activity_level(11), "High");
        assert_eq!(activity_level(6), "Moderate");
        assert_eq!(activity_level(1), "Low");
        assert_eq!(activity_level(0), "Inactive");
    }

    #[test]
    fn engagement_is_capped_at_twenty() {
        let result = activity_score(&ActivityInputs {
            open_issues: 100,
            open_pulls: 100,
            ..ActivityInputs::default()
        });
        assert_eq!(result.score, 20.0);
    }

    #[test]
    fn commit_windows_respect_offsets_and_skip_bad_timestamps() {
        let commits = vec![
            commit("a", "2024-06-29T12:00:00Z"),
            // 2024-06-23T13:00:00Z once normalized: inside the 7-day window.
            commit("b", "2024-06-23T15:00:00+02:00"),
            // 2024-06-23T11:00:00Z: just outside the 7-day window.
            commit("c", "2024-06-23T06:00:00-05:00"),
            commit("d", "2024-06-05T00:00:00Z"),
            commit("e", "2024-05-01T00:00:00Z"),
            commit("f", "not a date"),
            Commit {
                sha: "g".to_string(),
                authored_at: None,
            },
        ];
        assert_eq!(commits_within(&commits, now(), WEEK_WINDOW_DAYS), 2);
        assert_eq!(commits_within(&commits, now(), MONTH_WINDOW_DAYS), 4);
    }

    #[test]
    fn commits_after_the_evaluation_instant_are_not_recent() {
        let commits = vec![
            commit("future", "2024-07-20T00:00:00Z"),
            commit("edge", "2024-06-30T12:00:00Z"),
            commit("past", "2024-06-29T00:00:00Z"),
        ];
        assert_eq!(commits_within(&commits, now(), WEEK_WINDOW_DAYS), 2);
        assert_eq!(commits_within(&commits, now(), MONTH_WINDOW_DAYS), 2);
    }

    #[test]
    fn latency_sampling_uses_first_comment_and_skips_failures() {
        let mut provider = FakeProvider::default();
        provider.comments.insert(
            "https://api.github.com/repos/o/r/issues/1/comments".to_string(),
            Comment {
                created_at: "2024-06-01T06:00:00Z".to_string(),
            },
        );
        provider.comments.insert(
            "https://api.github.com/repos/o/r/issues/3/comments".to_string(),
            Comment {
                created_at: "2024-06-03T00:00:00Z".to_string(),
            },
        );
        let issues = vec![
            issue(1, "2024-06-01T00:00:00Z", 2),
            // fetch fails: no comment registered
            issue(2, "2024-06-01T00:00:00Z", 1),
            issue(3, "2024-06-01T00:00:00Z", 4),
            // no comments: never fetched
            issue(4, "2024-06-01T00:00:00Z", 0),
        ];

        let samples = response_latencies(&provider, &issues, 10);
        assert_eq!(samples, vec![6.0, 48.0]);
        assert_eq!(average(&samples), Some(27.0));
        assert_eq!(provider.comment_requests(), 3);
    }

    #[test]
    fn latency_sampling_caps_at_sample_size() {
        let mut provider = FakeProvider::default();
        let issues = (1..=15)
            .map(|n| issue(n, "2024-06-01T00:00:00Z", 1))
            .collect::<Vec<_>>();
        for n in 1..=15 {
            provider.comments.insert(
                format!("https://api.github.com/repos/o/r/issues/{n}/comments"),
                Comment {
                    created_at: "2024-06-01T01:00:00Z".to_string(),
                },
            );
        }
        let samples = response_latencies(&provider, &issues, 10);
        assert_eq!(samples.len(), 10);
        assert_eq!(provider.comment_requests(), 10);
    }

    #[test]
    fn average_of_nothing_is_unbounded() {
        assert_eq!(average(&[]), None);
    }
}
