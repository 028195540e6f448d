mod analyze;
mod cli;
mod config;
mod error;
mod provider;
mod report;
mod scan;
mod types;

use crate::analyze::ScoreEngine;
use crate::error::AnalyzerError;
use crate::provider::github::GitHubClient;
use crate::scan::target::RepoTarget;
use crate::types::config::{AnalyzerConfig, ClientSettings};
use crate::types::report::{AnalysisOutcome, AnalysisResult, ComparisonAxis};
use chrono::{DateTime, Utc};
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RECOMMENDATIONS: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REPO_HEALTH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn client_settings(cfg: &AnalyzerConfig, args: &cli::GitHubArgs) -> ClientSettings {
    let mut settings = cfg.client_settings();
    if let Some(token) = args.token.as_ref().filter(|token| !token.trim().is_empty()) {
        settings.token = Some(token.clone());
    }
    if let Some(api_url) = &args.api_url {
        settings.api_url = api_url.clone();
    }
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = timeout;
    }
    settings
}

fn build_engine(
    cfg: &AnalyzerConfig,
    args: &cli::GitHubArgs,
    as_of: Option<DateTime<Utc>>,
) -> Result<ScoreEngine<GitHubClient>, AnalyzerError> {
    let settings = client_settings(cfg, args);
    settings.validate()?;
    let client = GitHubClient::new(&settings)?;
    let engine = ScoreEngine::new(client)
        .with_weights(cfg.weights())
        .with_response_sample_size(cfg.response_sample_size());
    Ok(match as_of {
        Some(now) => engine.at(now),
        None => engine,
    })
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn comparison_axis(by: &cli::CompareBy) -> ComparisonAxis {
    match by {
        cli::CompareBy::Overall => ComparisonAxis::Overall,
        cli::CompareBy::Popularity => ComparisonAxis::Popularity,
        cli::CompareBy::Activity => ComparisonAxis::Activity,
        cli::CompareBy::Governance => ComparisonAxis::Governance,
    }
}

fn outcome_exit_code(result: &Result<AnalysisResult, AnalyzerError>) -> i32 {
    match result {
        Ok(_) => exit_code::SUCCESS,
        Err(AnalyzerError::RepositoryNotFound) => exit_code::NOT_FOUND,
        Err(_) => exit_code::RUNTIME_FAILURE,
    }
}

fn run() -> Result<i32, AnalyzerError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let cfg = config::load_config(&cwd, cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let target = RepoTarget::parse(&cmd.target)?;
            let engine = build_engine(&cfg, &cmd.github, cli.as_of)?;
            let result = engine.analyze(&target.owner, &target.repo);
            let code = outcome_exit_code(&result);
            let outcome = AnalysisOutcome::from_result(result);

            let rendered = report::render(&outcome, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(code)
        }
        cli::Commands::Suggest(cmd) => {
            let target = RepoTarget::parse(&cmd.target)?;
            let engine = build_engine(&cfg, &cmd.github, cli.as_of)?;
            let result = engine.analyze(&target.owner, &target.repo);
            let code = outcome_exit_code(&result);
            let analysis = match AnalysisOutcome::from_result(result) {
                AnalysisOutcome::Complete(analysis) => analysis,
                AnalysisOutcome::Failed { error } => {
                    eprintln!("error: {error}");
                    return Ok(code);
                }
            };

            if !cli.quiet {
                println!(
                    "{} (overall score {:.2})",
                    analysis.full_name, analysis.overall_score
                );
            }
            println!("suggestions:");
            for recommendation in &analysis.recommendations {
                println!("- {recommendation}");
            }

            if analysis.recommendations.len() == 1
                && analysis.recommendations[0] == analyze::recommendations::FALLBACK
            {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::RECOMMENDATIONS)
            }
        }
        cli::Commands::Compare(cmd) => {
            let targets = cmd
                .targets
                .iter()
                .map(|raw| RepoTarget::parse(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let engine = build_engine(&cfg, &cmd.github, cli.as_of)?;
            match engine.compare(&targets, comparison_axis(&cmd.by)) {
                Ok(comparison) => {
                    let rendered =
                        report::render_comparison(&comparison, output_format(&cmd.format))?;
                    println!("{rendered}");
                    Ok(exit_code::SUCCESS)
                }
                Err(AnalyzerError::InsufficientComparison) => {
                    eprintln!("error: {}", AnalyzerError::InsufficientComparison);
                    Ok(exit_code::NOT_FOUND)
                }
                Err(e) => Err(e),
            }
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
