//! One-shot command-line resolver.
//!
//! Runs the same strategy chain as the HTTP service against a single URL,
//! without starting a server.
//!
//! # Usage
//!
//! ```bash
//! # Resolve with the configured chain (RESOLVER_STRATEGIES or default)
//! cargo run --bin resolve -- "https://www.mediafire.com/file/abc123/movie.mp4/file"
//!
//! # Override the chain and print JSON
//! cargo run --bin resolve -- --strategies direct,headless --json "https://..."
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see [`link_resolver::config`]); `LISTEN` is ignored.
//!
//! # Exit Status
//!
//! `0` when a direct link was resolved, `1` otherwise.

use link_resolver::application::services::LinkResolver;
use link_resolver::config::{self, parse_strategies};
use link_resolver::domain::resolution::{AttemptOutcome, Resolution, ResolutionResult};
use link_resolver::infrastructure::build_strategies;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use serde_json::json;
use std::process::ExitCode;
use url::Url;

/// Resolve a file-sharing page to its direct download link.
#[derive(Parser)]
#[command(name = "resolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source page URL
    url: String,

    /// Comma-separated strategy chain, e.g. `direct,evasion,headless`
    #[arg(long)]
    strategies: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show every strategy attempt
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::from_env()?;
    if let Some(strategies) = &cli.strategies {
        config.strategies = parse_strategies(strategies).context("Invalid --strategies")?;
    }
    config.validate()?;

    if cli.verbose {
        link_resolver::logging::init(&config)?;
    }

    let source_url = Url::parse(&cli.url).context("Invalid URL")?;
    if !matches!(source_url.scheme(), "http" | "https") {
        anyhow::bail!("URL must use http or https");
    }

    let resolver = LinkResolver::new(build_strategies(&config)?);
    let result = resolver.resolve(&source_url).await;

    if cli.json {
        print_json(&result)?;
    } else {
        print_human(&result, cli.verbose);
    }

    Ok(if result.outcome().is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_json(result: &ResolutionResult) -> Result<()> {
    let value = match result.resolution() {
        Resolution::Resolved { link, strategy } => json!({
            "status": "success",
            "direct_link": link,
            "original_url": result.source_url().as_str(),
            "strategy": strategy,
            "attempts": result.attempts(),
        }),
        Resolution::Unresolved(outcome) => json!({
            "status": "error",
            "code": outcome.code(),
            "message": outcome.message(),
            "hint": outcome.hint(),
            "original_url": result.source_url().as_str(),
            "attempts": result.attempts(),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_human(result: &ResolutionResult, verbose: bool) {
    if verbose {
        println!("{}", "Attempts:".bold());
        for attempt in result.attempts() {
            let status = match &attempt.outcome {
                AttemptOutcome::Resolved => "resolved".green().to_string(),
                AttemptOutcome::Failed { reason } => format!("{} ({})", "failed".red(), reason),
                AttemptOutcome::Skipped => "skipped".dimmed().to_string(),
            };
            println!("  {:<10} {}", attempt.strategy.as_str().cyan(), status);
        }
        println!();
    }

    match result.resolution() {
        Resolution::Resolved { link, strategy } => {
            println!("{} {}", "✓".green().bold(), link);
            println!("  via {}", strategy.as_str().cyan());
        }
        Resolution::Unresolved(outcome) => {
            eprintln!(
                "{} {} [{}]",
                "✗".red().bold(),
                outcome.message(),
                outcome.code().yellow()
            );
            eprintln!("  URL: {}", result.source_url());
            if let Some(hint) = outcome.hint() {
                eprintln!("  Hint: {}", hint.dimmed());
            }
        }
    }
}
