use crate::error::{AnalyzerError, Result};
use std::fmt;
use std::str::FromStr;

const GITHUB_HOST: &str = "github.com";

/// An `owner/repo` pair resolved from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
}

impl RepoTarget {
    /// Accepts `owner/repo` shorthand or a repository URL such as
    /// `https://github.com/owner/repo/tree/main`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(AnalyzerError::InvalidTarget(
                "repository target is empty".to_string(),
            ));
        }

        let path = if trimmed.contains("://") || trimmed.starts_with(GITHUB_HOST) {
            let without_scheme = trimmed
                .split_once("://")
                .map(|(_, rest)| rest)
                .unwrap_or(trimmed);
            let (host, rest) = without_scheme.split_once('/').unwrap_or((without_scheme, ""));
            let host = host.trim_start_matches("www.");
            if !host.eq_ignore_ascii_case(GITHUB_HOST) {
                return Err(AnalyzerError::InvalidTarget(format!(
                    "not a GitHub repository URL: {input}"
                )));
            }
            rest
        } else {
            trimmed
        };

        let mut parts = path.split('/').filter(|part| !part.is_empty());
        let owner = parts.next().unwrap_or_default();
        let repo = parts
            .next()
            .map(|repo| repo.trim_end_matches(".git"))
            .unwrap_or_default();
        if owner.is_empty() || repo.is_empty() {
            return Err(AnalyzerError::InvalidTarget(format!(
                "could not extract owner and repository name from: {input}"
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl FromStr for RepoTarget {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
