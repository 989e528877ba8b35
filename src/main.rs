// file: src/main.rs
// description: commandline application entry point with scan orchestration
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use seqscan::forge::{self, GitHubClient, qualify_repository_name};
use seqscan::utils::logging::{format_info, format_item, format_success, format_warning};
use seqscan::{Config, ScanOrchestrator, ScanProgress, ScanReport, Validator};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "seqscan")]
#[command(author = "cipher")]
#[command(version)]
#[command(
    about = "Scan GitHub repositories for sub-folders inside a nested folder sequence",
    long_about = None
)]
struct Cli {
    /// Repository to scan, either `name` (prefixed with the organization) or
    /// `owner/name`. Every repository of the organization when omitted.
    repo: Option<String>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Organization to scan
    #[arg(short, long, env = "SEQSCAN_ORG")]
    org: Option<String>,

    /// Folder sequence to find, e.g. `resources/data`
    #[arg(short, long, value_name = "A/B/..")]
    segments: Option<String>,

    /// File holding the GitHub token on its first line
    #[arg(long, value_name = "FILE")]
    token_file: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Disable the progress bar
    #[arg(long, action = ArgAction::SetTrue)]
    no_progress: bool,

    /// Print the full report as JSON instead of the summary
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    seqscan::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    let config = load_config(&cli)?;
    let orchestrator = ScanOrchestrator::new(config.search.segments.clone())
        .context("Invalid folder sequence")?;

    let credential = forge::load_token(&config.forge);
    let client = GitHubClient::new(&config.forge, credential.as_ref())
        .context("Failed to create GitHub client")?;

    if client.is_authenticated() {
        info!("Using authenticated GitHub API access");
    } else {
        warn!("Using anonymous GitHub API access. Rate limits are very low");
        warn!(
            "Create a '{}' file or set the {} environment variable",
            config.forge.token_file.display(),
            config.forge.token_env
        );
    }

    let repositories = resolve_repositories(&client, &config, cli.repo.as_deref()).await?;

    let progress = if cli.no_progress || cli.json {
        ScanProgress::hidden()
    } else {
        ScanProgress::with_color(repositories.len(), cli.color)
    };

    let report = orchestrator
        .scan_all(&repositories, |name| client.repository(name), &progress)
        .await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.repositories)?);
    } else {
        print_summary(&report, &orchestrator.sequence_label());
    }

    print_rate_limit(&client).await;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    info!("Loading configuration from: {}", cli.config.display());

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using built-in defaults and SEQSCAN__ variables",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if let Some(org) = &cli.org {
        config.forge.organization = org.clone();
    }
    if let Some(raw) = &cli.segments {
        config.search.segments = Validator::parse_segments(raw).context("Invalid --segments")?;
    }
    if let Some(token_file) = &cli.token_file {
        config.forge.token_file = token_file.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn resolve_repositories(
    client: &GitHubClient,
    config: &Config,
    repo: Option<&str>,
) -> Result<Vec<String>> {
    let org = &config.forge.organization;

    if let Some(repo) = repo {
        Validator::validate_repository_name(repo).context("Invalid repository name")?;
        let full_name = qualify_repository_name(repo, org);
        info!("Fetching single repository: {}", full_name);

        let repository = client
            .get_repository(&full_name)
            .await
            .with_context(|| format!("Error fetching repository '{}'", full_name))?;

        info!("Successfully fetched {}", repository.full_name);
        return Ok(vec![repository.full_name]);
    }

    info!("Fetching all repositories for organization {}", org);
    let repositories = client
        .list_organization_repositories(org)
        .await
        .with_context(|| format!("Error fetching repositories for '{}'", org))?;

    info!("Found {} repositories. Processing", repositories.len());
    Ok(repositories.into_iter().map(|r| r.full_name).collect())
}

fn print_summary(report: &ScanReport, sequence: &str) {
    let stats = &report.stats;

    println!("\n--- Summary ---");
    println!(
        "{}",
        format_info(&format!(
            "Scanned {} repositories in {}s: {} matched ({:.1}%), {} skipped",
            stats.repositories_scanned,
            stats.duration_secs,
            stats.repositories_matched,
            stats.match_rate(),
            stats.repositories_failed
        ))
    );

    for scan in report.failed() {
        if let seqscan::RepoOutcome::Failed { reason } = &scan.outcome {
            println!(
                "{}",
                format_warning(&format!("{}: {}", scan.repository, reason))
            );
        }
    }

    if report.subfolders.is_empty() {
        println!(
            "{}",
            format_warning(&format!(
                "No subfolders found within any '.../{}/' paths",
                sequence
            ))
        );
        return;
    }

    println!(
        "{}",
        format_success(&format!(
            "Collected {} unique subfolder names from '.../{}/' paths:",
            report.subfolders.len(),
            sequence
        ))
    );
    for name in &report.subfolders {
        println!("{}", format_item(name));
    }
}

async fn print_rate_limit(client: &GitHubClient) {
    match client.rate_limit().await {
        Ok(status) => {
            println!("\nGitHub API Rate Limit Status:");
            println!("  Core limit: {}", status.limit);
            println!("  Core remaining: {}", status.remaining);
            println!("  Core used: {}", status.used());
            println!("  Core reset time: {}", status.reset);
        }
        Err(e) => warn!("Could not retrieve rate limit status: {}", e),
    }
}
