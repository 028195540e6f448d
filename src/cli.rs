use crate::analyze::compare::{MAX_REPOSITORIES, MIN_REPOSITORIES};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repo-health",
    version,
    about = "GitHub repository health scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file to use instead of ./repo-health.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate recency windows as of this RFC 3339 instant instead of now
    #[arg(long, global = true)]
    pub as_of: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a repository and print the full report
    Analyze(AnalyzeCommand),
    /// Print only the recommendations for a repository
    Suggest(SuggestCommand),
    /// Score several repositories and rank them side by side
    Compare(CompareCommand),
}

#[derive(Args, Clone)]
pub struct GitHubArgs {
    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL (for GitHub Enterprise or testing)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Repository as owner/repo or https://github.com/owner/repo
    pub target: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub github: GitHubArgs,
}

#[derive(Args)]
pub struct SuggestCommand {
    /// Repository as owner/repo or https://github.com/owner/repo
    pub target: String,
    #[command(flatten)]
    pub github: GitHubArgs,
}

#[derive(Args)]
pub struct CompareCommand {
    /// Repositories as owner/repo or https://github.com/owner/repo
    #[arg(required = true, num_args = MIN_REPOSITORIES..=MAX_REPOSITORIES)]
    pub targets: Vec<String>,
    /// Score to rank by
    #[arg(long, value_enum, default_value = "overall")]
    pub by: CompareBy,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub github: GitHubArgs,
}

#[derive(Clone, ValueEnum)]
pub enum CompareBy {
    Overall,
    Popularity,
    Activity,
    Governance,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
