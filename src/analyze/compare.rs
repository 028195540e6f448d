use super::ScoreEngine;
use crate::error::{AnalyzerError, Result};
use crate::provider::TelemetryProvider;
use crate::scan::target::RepoTarget;
use crate::types::report::{
    failure_message, Comparison, ComparisonAxis, ComparisonRow, SkippedTarget,
};

pub const MIN_REPOSITORIES: usize = 2;
pub const MAX_REPOSITORIES: usize = 10;

impl<P: TelemetryProvider> ScoreEngine<P> {
    /// Analyzes each target in turn and ranks the ones that succeed. A failed
    /// target is skipped, but fewer than two successes is an error.
    pub fn compare(&self, targets: &[RepoTarget], axis: ComparisonAxis) -> Result<Comparison> {
        let mut repositories = Vec::with_capacity(targets.len());
        let mut skipped = Vec::new();

        for target in targets {
            match self.analyze(&target.owner, &target.repo) {
                Ok(result) => repositories.push(ComparisonRow::from(&result)),
                Err(e) => {
                    tracing::warn!(
                        repository = %target,
                        error = %e,
                        "skipping repository in comparison"
                    );
                    skipped.push(SkippedTarget {
                        target: target.to_string(),
                        error: failure_message(&e),
                    });
                }
            }
        }

        if repositories.len() < MIN_REPOSITORIES {
            return Err(AnalyzerError::InsufficientComparison);
        }

        repositories.sort_by(|a, b| axis.score_of(b).total_cmp(&axis.score_of(a)));
        Ok(Comparison {
            compared_by: axis,
            repositories,
            skipped,
        })
    }
}
