use crate::provider::TelemetryProvider;
use crate::types::scoring::{Score, SubScore};

const NOTHING_FOUND: &str =
    "No contribution documentation found. This makes it difficult for new contributors.";

pub struct ChecklistItem {
    pub metric: &'static str,
    pub label: &'static str,
    /// Set for items whose absence is called out in the narrative.
    pub missing_label: Option<&'static str>,
    pub weight: Score,
    pub paths: &'static [&'static str],
}

pub const CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        metric: "has_contributing_guide",
        label: "Contributing guide",
        missing_label: Some("contributing guide"),
        weight: 30.0,
        paths: &[
            "CONTRIBUTING.md",
            "CONTRIBUTING.rst",
            "CONTRIBUTING.txt",
            "docs/CONTRIBUTING.md",
            "docs/contributing.md",
            ".github/CONTRIBUTING.md",
            ".github/contributing.md",
        ],
    },
    ChecklistItem {
        metric: "has_readme",
        label: "README file",
        missing_label: Some("README file"),
        weight: 20.0,
        paths: &["README.md", "README.rst", "README.txt"],
    },
    ChecklistItem {
        metric: "has_issue_templates",
        label: "Issue templates",
        missing_label: None,
        weight: 15.0,
        paths: &[".github/ISSUE_TEMPLATE"],
    },
    ChecklistItem {
        metric: "has_pr_templates",
        label: "PR templates",
        missing_label: None,
        weight: 15.0,
        paths: &[".github/pull_request_template.md"],
    },
    ChecklistItem {
        metric: "has_code_of_conduct",
        label: "Code of conduct",
        missing_label: None,
        weight: 10.0,
        paths: &[
            "CODE_OF_CONDUCT.md",
            "CODE_OF_CONDUCT.rst",
            ".github/CODE_OF_CONDUCT.md",
        ],
    },
    ChecklistItem {
        metric: "has_license",
        label: "License",
        missing_label: Some("license"),
        weight: 10.0,
        paths: &["LICENSE", "LICENSE.md", "LICENSE.txt", "LICENCE", "LICENCE.md"],
    },
];

/// Probes the checklist in order; `any` stops at the first path found.
pub fn detect_checklist<P: TelemetryProvider + ?Sized>(
    provider: &P,
    owner: &str,
    repo: &str,
) -> Vec<bool> {
    CHECKLIST
        .iter()
        .map(|item| {
            item.paths
                .iter()
                .any(|path| provider.file_exists(owner, repo, path))
        })
        .collect()
}

/// `present[i]` reports whether `CHECKLIST[i]` is satisfied.
pub fn governance_score(present: &[bool]) -> SubScore {
    let satisfied = |index: usize| present.get(index).copied().unwrap_or(false);

    let score: Score = CHECKLIST
        .iter()
        .enumerate()
        .filter(|(index, _)| satisfied(*index))
        .map(|(_, item)| item.weight)
        .sum();

    let found = CHECKLIST
        .iter()
        .enumerate()
        .filter(|(index, _)| satisfied(*index))
        .map(|(_, item)| item.label)
        .collect::<Vec<_>>();

    let narrative = if found.is_empty() {
        NOTHING_FOUND.to_string()
    } else {
        let missing = CHECKLIST
            .iter()
            .enumerate()
            .filter(|(index, _)| !satisfied(*index))
            .filter_map(|(_, item)| item.missing_label)
            .collect::<Vec<_>>();
        let mut narrative = format!("Found: {}.", found.join(", "));
        if !missing.is_empty() {
            narrative.push_str(&format!(" Missing: {}.", missing.join(", ")));
        }
        narrative
    };

    CHECKLIST.iter().enumerate().fold(
        SubScore::new(score, narrative),
        |sub_score, (index, item)| sub_score.with_metric(item.metric, satisfied(index)),
    )
}
