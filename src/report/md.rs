use crate::types::report::{AnalysisOutcome, AnalysisResult, Comparison};
use crate::types::scoring::SubScore;

pub fn to_markdown(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::Complete(result) => result_markdown(result),
        AnalysisOutcome::Failed { error } => {
            format!("# Repository Health Report\n\nError: {error}\n")
        }
    }
}

fn result_markdown(result: &AnalysisResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Repository Health Report: {}\n\n", result.full_name));
    if !result.description.is_empty() {
        output.push_str(&format!("{}\n\n", result.description));
    }
    output.push_str(&format!("Overall score: {:.2}\n\n", result.overall_score));

    output.push_str("## Repository\n\n");
    output.push_str(&format!(
        "- url: {}\n- language: {}\n- stars: {}\n- forks: {}\n- watchers: {}\n- open issues: {}\n- open pull requests: {}\n- contributors: {}\n- releases: {}\n",
        result.github_url,
        result.language,
        result.stars,
        result.forks,
        result.watchers,
        result.open_issues,
        result.open_pulls,
        result.contributors_count,
        result.releases_count
    ));
    if let Some(tag) = &result.latest_release {
        output.push_str(&format!("- latest release: {tag}\n"));
    }
    if !result.topics.is_empty() {
        output.push_str(&format!("- topics: {}\n", result.topics.join(", ")));
    }
    output.push('\n');

    output.push_str("## Category Scores\n\n");
    push_category(&mut output, "popularity", &result.popularity);
    push_category(&mut output, "activity", &result.activity);
    push_category(&mut output, "governance", &result.governance);
    output.push('\n');

    output.push_str("## Recommendations\n\n");
    for recommendation in &result.recommendations {
        output.push_str(&format!("- {recommendation}\n"));
    }

    output
}

pub fn comparison_markdown(comparison: &Comparison) -> String {
    let mut output = format!(
        "# Repository Comparison (ranked by {})\n\n",
        comparison.compared_by.as_str()
    );
    output.push_str("| Rank | Repository | Overall | Popularity | Activity | Governance |\n");
    output.push_str("|---:|---|---:|---:|---:|---:|\n");
    for (rank, row) in comparison.repositories.iter().enumerate() {
        output.push_str(&format!(
            "| {} | [{}]({}) | {:.2} | {:.2} | {:.2} | {:.2} |\n",
            rank + 1,
            row.full_name,
            row.github_url,
            row.overall_score,
            row.popularity,
            row.activity,
            row.governance
        ));
    }

    if !comparison.skipped.is_empty() {
        output.push_str("\n## Skipped\n\n");
        for skipped in &comparison.skipped {
            output.push_str(&format!("- {}: {}\n", skipped.target, skipped.error));
        }
    }

    output
}

fn push_category(output: &mut String, name: &str, sub_score: &SubScore) {
    output.push_str(&format!(
        "- {}: {:.2} - {}\n",
        name, sub_score.score, sub_score.narrative
    ));
}
