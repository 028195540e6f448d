use crate::provider::TelemetryProvider;
use crate::types::telemetry::{
    Comment, Commit, Contributor, Issue, IssueState, PullRequest, Release, RepositoryInfo,
};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

/// In-memory provider that records the calls the engine makes.
#[derive(Default)]
pub struct FakeProvider {
    pub repository: Option<RepositoryInfo>,
    /// Per-repository records keyed by `owner/repo`, checked before `repository`.
    pub repositories: HashMap<String, RepositoryInfo>,
    pub contributors: Vec<Contributor>,
    pub commits: Vec<Commit>,
    pub issues: Vec<Issue>,
    pub pulls: Vec<PullRequest>,
    pub comments: HashMap<String, Comment>,
    pub files: HashSet<String>,
    pub topics: Vec<String>,
    pub languages: BTreeMap<String, u64>,
    pub releases: Vec<Release>,
    probes: RefCell<Vec<String>>,
    comment_calls: Cell<usize>,
    commit_window: Cell<Option<(DateTime<Utc>, u32)>>,
}

impl FakeProvider {
    pub fn with_files(paths: &[&str]) -> Self {
        Self {
            files: paths.iter().map(|path| path.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn repository(full_name: &str, stars: u64, forks: u64) -> RepositoryInfo {
        RepositoryInfo {
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{full_name}"),
            stars,
            forks,
            watchers: stars,
            ..RepositoryInfo::default()
        }
    }

    pub fn probed_paths(&self) -> Vec<String> {
        self.probes.borrow().clone()
    }

    pub fn comment_requests(&self) -> usize {
        self.comment_calls.get()
    }

    /// The `(until, since_days)` of the last commit request.
    pub fn commit_window(&self) -> Option<(DateTime<Utc>, u32)> {
        self.commit_window.get()
    }
}

impl TelemetryProvider for FakeProvider {
    fn fetch_repository(&self, owner: &str, repo: &str) -> Option<RepositoryInfo> {
        self.repositories
            .get(&format!("{owner}/{repo}"))
            .cloned()
            .or_else(|| self.repository.clone())
    }

    fn fetch_contributors(&self, _owner: &str, _repo: &str) -> Vec<Contributor> {
        self.contributors.clone()
    }

    fn fetch_recent_commits(
        &self,
        _owner: &str,
        _repo: &str,
        until: DateTime<Utc>,
        since_days: u32,
    ) -> Vec<Commit> {
        self.commit_window.set(Some((until, since_days)));
        self.commits.clone()
    }

    fn fetch_issues(&self, _owner: &str, _repo: &str, _state: IssueState) -> Vec<Issue> {
        self.issues.clone()
    }

    fn fetch_pull_requests(
        &self,
        _owner: &str,
        _repo: &str,
        _state: IssueState,
    ) -> Vec<PullRequest> {
        self.pulls.clone()
    }

    fn fetch_first_comment(&self, comments_url: &str) -> Option<Comment> {
        self.comment_calls.set(self.comment_calls.get() + 1);
        self.comments.get(comments_url).cloned()
    }

    fn file_exists(&self, _owner: &str, _repo: &str, path: &str) -> bool {
        self.probes.borrow_mut().push(path.to_string());
        self.files.contains(path)
    }

    fn fetch_topics(&self, _owner: &str, _repo: &str) -> Vec<String> {
        self.topics.clone()
    }

    fn fetch_languages(&self, _owner: &str, _repo: &str) -> BTreeMap<String, u64> {
        self.languages.clone()
    }

    fn fetch_releases(&self, _owner: &str, _repo: &str) -> Vec<Release> {
        self.releases.clone()
    }
}
