use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub type Score = f64;

pub const MAX_SCORE: Score = 100.0;

/// Rounds to two decimal places, the precision every published score uses.
pub fn round2(value: Score) -> Score {
    (value * 100.0).round() / 100.0
}

pub fn clamp_score(value: Score) -> Score {
    value.clamp(0.0, MAX_SCORE)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScore {
    pub score: Score,
    pub narrative: String,
    pub metrics: BTreeMap<String, Value>,
}

impl SubScore {
    pub fn new(score: Score, narrative: impl Into<String>) -> Self {
        Self {
            score: round2(clamp_score(score)),
            narrative: narrative.into(),
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.metrics.insert(name.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub popularity: Score,
    pub activity: Score,
    pub governance: Score,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            popularity: 0.4,
            activity: 0.4,
            governance: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCard {
    pub popularity: Score,
    pub activity: Score,
    pub governance: Score,
    pub overall: Score,
}

impl ScoreCard {
    pub fn new(popularity: Score, activity: Score, governance: Score) -> Self {
        Self {
            popularity,
            activity,
            governance,
            overall: 0.0,
        }
    }

    pub fn finalize(mut self, weights: &Weights) -> Self {
        self.overall = round2(
            self.popularity * weights.popularity
                + self.activity * weights.activity
                + self.governance * weights.governance,
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(84.0), 84.0);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn sub_score_is_clamped_into_range() {
        assert_eq!(SubScore::new(140.0, "over").score, 100.0);
        assert_eq!(SubScore::new(-3.0, "under").score, 0.0);
    }

    #[test]
    fn finalize_applies_default_weights() {
        let card = ScoreCard::new(50.0, 80.0, 100.0).finalize(&Weights::default());
        assert_eq!(card.overall, 72.0);
    }

    proptest! {
        #[test]
        fn finalize_equals_rounded_weighted_sum(
            p in 0.0f64..=100.0,
            a in 0.0f64..=100.0,
            g in 0.0f64..=100.0,
        ) {
            let card = ScoreCard::new(p, a, g).finalize(&Weights::default());
            prop_assert_eq!(card.overall, round2(0.4 * p + 0.4 * a + 0.2 * g));
            prop_assert!((0.0..=MAX_SCORE).contains(&card.overall));
        }

        #[test]
        fn sub_score_is_always_clamped(raw in -1.0e6f64..1.0e6) {
            let score = SubScore::new(raw, "any").score;
            prop_assert!((0.0..=MAX_SCORE).contains(&score));
        }
    }
}
