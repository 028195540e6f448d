pub mod json;
pub mod md;

use crate::error::AnalyzerError;
use crate::types::report::{AnalysisOutcome, Comparison};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(outcome: &AnalysisOutcome, format: OutputFormat) -> Result<String, AnalyzerError> {
    match format {
        OutputFormat::Json => json::to_json(outcome).map_err(AnalyzerError::Json),
        OutputFormat::Md => Ok(md::to_markdown(outcome)),
    }
}

pub fn render_comparison(
    comparison: &Comparison,
    format: OutputFormat,
) -> Result<String, AnalyzerError> {
    match format {
        OutputFormat::Json => json::to_json(comparison).map_err(AnalyzerError::Json),
        OutputFormat::Md => Ok(md::comparison_markdown(comparison)),
    }
}
