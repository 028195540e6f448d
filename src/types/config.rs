use crate::error::AnalyzerError;
use crate::types::scoring::Weights;
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_RESPONSE_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzerConfig {
    pub github: Option<GitHubConfig>,
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub cache_ttl_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub weights: Option<HashMap<String, f64>>,
    pub response_sample_size: Option<usize>,
}

/// Connection settings for the GitHub client after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub user_agent: String,
}

impl AnalyzerConfig {
    pub fn weights(&self) -> Weights {
        let defaults = Weights::default();
        match self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.weights.as_ref())
        {
            Some(weights) => Weights {
                popularity: *weights.get("popularity").unwrap_or(&defaults.popularity),
                activity: *weights.get("activity").unwrap_or(&defaults.activity),
                governance: *weights.get("governance").unwrap_or(&defaults.governance),
            },
            None => defaults,
        }
    }

    pub fn response_sample_size(&self) -> usize {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.response_sample_size)
            .unwrap_or(DEFAULT_RESPONSE_SAMPLE_SIZE)
    }

    pub fn client_settings(&self) -> ClientSettings {
        let github = self.github.as_ref();
        ClientSettings {
            api_url: github
                .and_then(|github| github.api_url.clone())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: github
                .and_then(|github| github.token.clone())
                .filter(|token| !token.trim().is_empty()),
            timeout_secs: github
                .and_then(|github| github.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            cache_ttl_secs: github
                .and_then(|github| github.cache_ttl_secs)
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            user_agent: github
                .and_then(|github| github.user_agent.clone())
                .unwrap_or_else(|| format!("repo-health/{}", env!("CARGO_PKG_VERSION"))),
        }
    }

    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if let Some(weights) = self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.weights.as_ref())
        {
            const ALLOWED_WEIGHT_KEYS: [&str; 3] = ["popularity", "activity", "governance"];
            let mut unknown = weights
                .keys()
                .filter(|key| !ALLOWED_WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(AnalyzerError::ConfigParse(format!(
                    "scoring.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let weights = self.weights();
        let values = [weights.popularity, weights.activity, weights.governance];
        if values.iter().any(|weight| !(0.0..=1.0).contains(weight)) {
            return Err(AnalyzerError::ConfigParse(
                "scoring.weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum: f64 = values.iter().sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(AnalyzerError::ConfigParse(format!(
                "scoring.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if self.response_sample_size() == 0 {
            return Err(AnalyzerError::ConfigParse(
                "scoring.response_sample_size must be greater than 0".to_string(),
            ));
        }

        self.client_settings().validate()
    }
}

impl ClientSettings {
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.timeout_secs == 0 {
            return Err(AnalyzerError::ConfigParse(
                "github.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AnalyzerError::ConfigParse(format!(
                "github.api_url must be an http(s) URL: {}",
                self.api_url
            )));
        }
        Ok(())
    }
}
