use crate::types::scoring::{round2, Score, SubScore, MAX_SCORE};

const STAR_WEIGHT: f64 = 0.5;
const FORK_WEIGHT: f64 = 0.3;
const WATCHER_WEIGHT: f64 = 0.2;

/// Counts at which a repository reaches the full popularity score.
const REFERENCE_STARS: u64 = 100_000;
const REFERENCE_FORKS: u64 = 10_000;
const REFERENCE_WATCHERS: u64 = 5_000;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PopularityInputs {
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub recent_commits: usize,
    pub contributors: usize,
}

struct GrowthRule {
    applies: fn(&PopularityInputs) -> bool,
    outlook: &'static str,
}

fn established(inputs: &PopularityInputs) -> bool {
    inputs.stars > 1000 && inputs.forks > 100
}

fn established_and_active(inputs: &PopularityInputs) -> bool {
    established(inputs) && inputs.recent_commits > 20
}

fn growing(inputs: &PopularityInputs) -> bool {
    inputs.stars > 100
}

fn growing_and_active(inputs: &PopularityInputs) -> bool {
    growing(inputs) && inputs.recent_commits > 10
}

fn emerging(inputs: &PopularityInputs) -> bool {
    inputs.recent_commits > 5
}

fn always(_: &PopularityInputs) -> bool {
    true
}

/// Evaluated top to bottom; the last rule always applies.
const GROWTH_RULES: &[GrowthRule] = &[
    GrowthRule {
        applies: established_and_active,
        outlook: "High growth potential - Strong community engagement and active development",
    },
    GrowthRule {
        applies: established,
        outlook: "Stable popularity - Well-established but may need more active development",
    },
    GrowthRule {
        applies: growing_and_active,
        outlook: "Growing popularity - Good momentum with recent activity",
    },
    GrowthRule {
        applies: growing,
        outlook: "Moderate growth potential - Needs more active development",
    },
    GrowthRule {
        applies: emerging,
        outlook: "Emerging popularity - Early stage with active development",
    },
    GrowthRule {
        applies: always,
        outlook: "Low growth potential - Needs more community engagement and development",
    },
];

fn weighted_log(stars: u64, forks: u64, watchers: u64) -> f64 {
    (stars as f64).ln_1p() * STAR_WEIGHT
        + (forks as f64).ln_1p() * FORK_WEIGHT
        + (watchers as f64).ln_1p() * WATCHER_WEIGHT
}

pub fn popularity_value(stars: u64, forks: u64, watchers: u64) -> Score {
    let reference = weighted_log(REFERENCE_STARS, REFERENCE_FORKS, REFERENCE_WATCHERS);
    let normalized = weighted_log(stars, forks, watchers) / reference * MAX_SCORE;
    round2(normalized.min(MAX_SCORE))
}

pub fn growth_outlook(inputs: &PopularityInputs) -> &'static str {
    GROWTH_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs))
        .map(|rule| rule.outlook)
        .unwrap_or("")
}

pub fn popularity_score(inputs: &PopularityInputs) -> SubScore {
    SubScore::new(
        popularity_value(inputs.stars, inputs.forks, inputs.watchers),
        growth_outlook(inputs),
    )
    .with_metric("stars", inputs.stars)
    .with_metric("forks", inputs.forks)
    .with_metric("watchers", inputs.watchers)
    .with_metric("open_issues", inputs.open_issues)
    .with_metric("recent_commits", inputs.recent_commits)
    .with_metric("contributors", inputs.contributors)
}
