//! Blocking GitHub REST client implementing [`TelemetryProvider`].

use super::cache::ResponseCache;
use super::http::check_response;
use super::TelemetryProvider;
use crate::error::{AnalyzerError, FetchError, Result};
use crate::types::config::ClientSettings;
use crate::types::telemetry::{
    Comment, Commit, Contributor, Issue, IssueState, PullRequest, Release, RepositoryInfo,
};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

#[derive(Deserialize)]
struct WireCommit {
    #[serde(default)]
    sha: String,
    commit: Option<WireCommitDetail>,
}

#[derive(Deserialize)]
struct WireCommitDetail {
    author: Option<WireSignature>,
}

#[derive(Deserialize)]
struct WireSignature {
    date: Option<String>,
}

#[derive(Deserialize)]
struct WireTopics {
    #[serde(default)]
    names: Vec<String>,
}

pub struct GitHubClient {
    http: Client,
    base_url: String,
    cache: ResponseCache,
}

impl GitHubClient {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));
        if let Some(token) = &settings.token {
            let value = HeaderValue::from_str(&format!("token {token}")).map_err(|_| {
                AnalyzerError::ConfigParse("github token contains invalid characters".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::new(Duration::from_secs(settings.cache_ttl_secs)),
        })
    }

    fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}{}", self.base_url, endpoint)
        }
    }

    fn get_json(&self, endpoint: &str, params: &[(&str, String)]) -> Option<Value> {
        let key = ResponseCache::key(endpoint, params);
        if let Some(cached) = self.cache.get(&key) {
            return Some(cached);
        }

        match self.request(endpoint, params) {
            Ok(body) => {
                self.cache.insert(key, body.clone());
                Some(body)
            }
            Err(FetchError::Api { status: 404, .. }) => {
                tracing::debug!(endpoint, "GitHub resource not found");
                None
            }
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "GitHub API request failed");
                None
            }
        }
    }

    fn request(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> std::result::Result<Value, FetchError> {
        let resp = self.http.get(self.url_for(endpoint)).query(params).send()?;
        let resp = check_response(resp)?;
        Ok(resp.json::<Value>()?)
    }

    fn get_decoded<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Option<T> {
        let body = self.get_json(endpoint, params)?;
        decode(endpoint, body)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> Option<T> {
    match serde_json::from_value(body) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::warn!(endpoint, error = %e, "unexpected GitHub response shape");
            None
        }
    }
}

fn repo_path(owner: &str, repo: &str) -> String {
    format!(
        "/repos/{}/{}",
        urlencoding::encode(owner),
        urlencoding::encode(repo)
    )
}

fn contents_path(owner: &str, repo: &str, path: &str) -> String {
    let encoded = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/contents/{}", repo_path(owner, repo), encoded)
}

/// Whole-day `since`/`until` bounds covering the window. Day granularity keeps
/// the cache key stable between runs; callers filter to the exact window.
fn commit_window_params(until: DateTime<Utc>, since_days: u32) -> [(&'static str, String); 2] {
    let since = until - chrono::Duration::days(i64::from(since_days));
    [
        ("since", since.format("%Y-%m-%dT00:00:00Z").to_string()),
        ("until", until.format("%Y-%m-%dT23:59:59Z").to_string()),
    ]
}

fn commits_from(wire: Vec<WireCommit>) -> Vec<Commit> {
    wire.into_iter()
        .map(|commit| Commit {
            sha: commit.sha,
            authored_at: commit
                .commit
                .and_then(|detail| detail.author)
                .and_then(|author| author.date),
        })
        .collect()
}

impl TelemetryProvider for GitHubClient {
    fn fetch_repository(&self, owner: &str, repo: &str) -> Option<RepositoryInfo> {
        self.get_decoded(&repo_path(owner, repo), &[])
    }

    fn fetch_contributors(&self, owner: &str, repo: &str) -> Vec<Contributor> {
        self.get_decoded(&format!("{}/contributors", repo_path(owner, repo)), &[])
            .unwrap_or_default()
    }

    fn fetch_recent_commits(
        &self,
        owner: &str,
        repo: &str,
        until: DateTime<Utc>,
        since_days: u32,
    ) -> Vec<Commit> {
        let params = commit_window_params(until, since_days);
        self.get_decoded::<Vec<WireCommit>>(
            &format!("{}/commits", repo_path(owner, repo)),
            &params,
        )
        .map(commits_from)
        .unwrap_or_default()
    }

    fn fetch_issues(&self, owner: &str, repo: &str, state: IssueState) -> Vec<Issue> {
        let params = [
            ("state", state.as_str().to_string()),
            ("per_page", "100".to_string()),
        ];
        self.get_decoded(&format!("{}/issues", repo_path(owner, repo)), &params)
            .unwrap_or_default()
    }

    fn fetch_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        state: IssueState,
    ) -> Vec<PullRequest> {
        let params = [
            ("state", state.as_str().to_string()),
            ("per_page", "100".to_string()),
        ];
        self.get_decoded(&format!("{}/pulls", repo_path(owner, repo)), &params)
            .unwrap_or_default()
    }

    fn fetch_first_comment(&self, comments_url: &str) -> Option<Comment> {
        self.get_decoded::<Vec<Comment>>(comments_url, &[])?
            .into_iter()
            .next()
    }

    fn file_exists(&self, owner: &str, repo: &str, path: &str) -> bool {
        self.get_json(&contents_path(owner, repo, path), &[]).is_some()
    }

    fn fetch_topics(&self, owner: &str, repo: &str) -> Vec<String> {
        self.get_decoded::<WireTopics>(&format!("{}/topics", repo_path(owner, repo)), &[])
            .map(|topics| topics.names)
            .unwrap_or_default()
    }

    fn fetch_languages(&self, owner: &str, repo: &str) -> BTreeMap<String, u64> {
        self.get_decoded(&format!("{}/languages", repo_path(owner, repo)), &[])
            .unwrap_or_default()
    }

    fn fetch_releases(&self, owner: &str, repo: &str) -> Vec<Release> {
        self.get_decoded(&format!("{}/releases", repo_path(owner, repo)), &[])
            .unwrap_or_default()
    }
}
