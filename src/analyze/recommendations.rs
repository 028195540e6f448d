use crate::types::scoring::{Score, ScoreCard};

pub const FALLBACK: &str =
    "Great job! Your repository is well-maintained and contributor-friendly";

struct RecommendationRule {
    score: fn(&ScoreCard) -> Score,
    below: Score,
    advice: [&'static str; 3],
}

fn popularity(card: &ScoreCard) -> Score {
    card.popularity
}

fn activity(card: &ScoreCard) -> Score {
    card.activity
}

fn governance(card: &ScoreCard) -> Score {
    card.governance
}

/// Category order here is the order recommendations are emitted in.
const RULES: &[RecommendationRule] = &[
    RecommendationRule {
        score: popularity,
        below: 30.0,
        advice: [
            "Improve repository visibility by adding a comprehensive README",
            "Consider adding topics/tags to make the repository discoverable",
            "Engage with the community through issues and discussions",
        ],
    },
    RecommendationRule {
        score: activity,
        below: 40.0,
        advice: [
            "Increase commit frequency to show active development",
            "Respond to issues and pull requests more quickly",
            "Consider setting up automated CI/CD pipelines",
        ],
    },
    RecommendationRule {
        score: governance,
        below: 50.0,
        advice: [
            "Add a CONTRIBUTING.md file to guide new contributors",
            "Create issue and pull request templates",
            "Add a code of conduct to foster a welcoming community",
        ],
    },
];

pub fn recommendations(card: &ScoreCard) -> Vec<String> {
    let triggered = RULES
        .iter()
        .filter(|rule| (rule.score)(card) < rule.below)
        .flat_map(|rule| rule.advice.iter().map(|advice| advice.to_string()))
        .collect::<Vec<_>>();

    if triggered.is_empty() {
        vec![FALLBACK.to_string()]
    } else {
        triggered
    }
}
