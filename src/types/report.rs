use crate::error::AnalyzerError;
use crate::types::scoring::{Score, SubScore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub owner: String,
    pub repo_name: String,
    pub full_name: String,
    pub description: String,
    pub language: String,
    pub github_url: String,
    pub last_updated: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub open_pulls: u64,
    pub popularity: SubScore,
    pub activity: SubScore,
    pub governance: SubScore,
    pub overall_score: Score,
    pub recommendations: Vec<String>,
    pub topics: Vec<String>,
    pub languages: BTreeMap<String, u64>,
    pub releases_count: usize,
    pub latest_release: Option<String>,
    pub contributors_count: usize,
    pub recent_commits_count: usize,
    pub analyzed_at: DateTime<Utc>,
}

/// What callers receive: a full result, or a single error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Complete(Box<AnalysisResult>),
    Failed { error: String },
}

impl AnalysisOutcome {
    pub fn from_result(result: Result<AnalysisResult, AnalyzerError>) -> Self {
        match result {
            Ok(analysis) => AnalysisOutcome::Complete(Box::new(analysis)),
            Err(e) => AnalysisOutcome::Failed {
                error: failure_message(&e),
            },
        }
    }
}

/// The message a caller sees for a failed analysis. Not-found is reported
/// verbatim; anything else is prefixed.
pub fn failure_message(err: &AnalyzerError) -> String {
    match err {
        AnalyzerError::RepositoryNotFound => err.to_string(),
        other => format!("Analysis failed: {other}"),
    }
}

/// Which score a comparison ranks repositories by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonAxis {
    Overall,
    Popularity,
    Activity,
    Governance,
}

impl ComparisonAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonAxis::Overall => "overall",
            ComparisonAxis::Popularity => "popularity",
            ComparisonAxis::Activity => "activity",
            ComparisonAxis::Governance => "governance",
        }
    }

    pub fn score_of(self, row: &ComparisonRow) -> Score {
        match self {
            ComparisonAxis::Overall => row.overall_score,
            ComparisonAxis::Popularity => row.popularity,
            ComparisonAxis::Activity => row.activity,
            ComparisonAxis::Governance => row.governance,
        }
    }
}

/// One repository's scores, side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub full_name: String,
    pub github_url: String,
    pub overall_score: Score,
    pub popularity: Score,
    pub activity: Score,
    pub governance: Score,
}

impl From<&AnalysisResult> for ComparisonRow {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            full_name: result.full_name.clone(),
            github_url: result.github_url.clone(),
            overall_score: result.overall_score,
            popularity: result.popularity.score,
            activity: result.activity.score,
            governance: result.governance.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedTarget {
    pub target: String,
    pub error: String,
}

/// Repositories ranked best first by `compared_by`; ties keep input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub compared_by: ComparisonAxis,
    pub repositories: Vec<ComparisonRow>,
    pub skipped: Vec<SkippedTarget>,
}

#[cfg(test)]
impl Comparison {
    pub fn sample() -> Self {
        Comparison {
            compared_by: ComparisonAxis::Overall,
            repositories: vec![
                ComparisonRow::from(&AnalysisResult::sample()),
                ComparisonRow {
                    full_name: "octo/gadgets".to_string(),
                    github_url: "https://github.com/octo/gadgets".to_string(),
                    overall_score: 41.5,
                    popularity: 20.25,
                    activity: 50.0,
                    governance: 67.0,
                },
            ],
            skipped: vec![SkippedTarget {
                target: "ghost/nothing".to_string(),
                error: "Repository not found or inaccessible".to_string(),
            }],
        }
    }
}

#[cfg(test)]
impl AnalysisResult {
    pub fn sample() -> Self {
        use chrono::TimeZone;
        AnalysisResult {
            owner: "octo".to_string(),
            repo_name: "widgets".to_string(),
            full_name: "octo/widgets".to_string(),
            description: "Widgets for everyone".to_string(),
            language: "Rust".to_string(),
            github_url: "https://github.com/octo/widgets".to_string(),
            last_updated: Some("2024-06-30T00:00:00Z".to_string()),
            stars: 1500,
            forks: 150,
            watchers: 1500,
            open_issues: 5,
            open_pulls: 3,
            popularity: SubScore::new(61.23, "Stable popularity").with_metric("stars", 1500),
            activity: SubScore::new(84.0, "Maintainer activity level: Very High."),
            governance: SubScore::new(45.0, "Found: README file."),
            overall_score: 67.1,
            recommendations: vec!["Create issue and pull request templates".to_string()],
            topics: vec!["cli".to_string()],
            languages: BTreeMap::from([("Rust".to_string(), 4096)]),
            releases_count: 2,
            latest_release: Some("v1.2.0".to_string()),
            contributors_count: 12,
            recent_commits_count: 25,
            analyzed_at: Utc
                .with_ymd_and_hms(2024, 6, 30, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_serializes_to_bare_error_object() {
        let outcome = AnalysisOutcome::from_result(Err(AnalyzerError::RepositoryNotFound));
        let rendered = serde_json::to_value(&outcome).expect("outcome should serialize");
        assert_eq!(
            rendered,
            serde_json::json!({ "error": "Repository not found or inaccessible" })
        );
    }

    #[test]
    fn comparison_axis_serializes_lowercase() {
        let rendered = serde_json::to_value(Comparison::sample()).expect("should serialize");
        assert_eq!(rendered["compared_by"], "overall");
        assert_eq!(rendered["repositories"][0]["full_name"], "octo/widgets");
        assert_eq!(rendered["repositories"][0]["activity"], 84.0);
        assert_eq!(rendered["skipped"][0]["target"], "ghost/nothing");
    }

    #[test]
    fn unexpected_failures_are_prefixed() {
        let outcome = AnalysisOutcome::from_result(Err(AnalyzerError::ConfigParse(
            "bad weights".to_string(),
        )));
        assert_eq!(
            outcome,
            AnalysisOutcome::Failed {
                error: "Analysis failed: config parse error: bad weights".to_string()
            }
        );
    }
}
