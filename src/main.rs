//! Kwrank main entry point
//!
//! Command-line front end: collects URLs and flags, runs the ranking service
//! for each URL, and renders results as a table or JSON.

use clap::Parser;
use kwrank::config::{ScrapeConfig, DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT_SECS};
use kwrank::output::{print_report, render_json, UrlReport};
use kwrank::scrape::RankingService;
use kwrank::ScrapeError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

/// Kwrank: rank a page's meta keywords by body frequency
#[derive(Parser, Debug)]
#[command(name = "kwrank")]
#[command(version = "1.0.0")]
#[command(about = "Rank a page's declared meta keywords by body frequency", long_about = None)]
struct Cli {
    /// URLs of the pages to rank
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Per-request timeout in seconds (applies to both HEAD and GET)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Disable TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Emit results as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Maximum number of URLs ranked concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT)]
    max_concurrent: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = ScrapeConfig {
        timeout: Duration::from_secs(cli.timeout),
        verify_tls: !cli.insecure,
        max_concurrent: cli.max_concurrent,
        ..ScrapeConfig::default()
    };
    config.validate()?;

    if cli.insecure {
        tracing::warn!("TLS certificate verification is disabled");
    }

    let reports = rank_all(&cli.urls, config).await;
    let failed = reports.iter().filter(|r| r.error.is_some()).count();

    if cli.json {
        println!("{}", render_json(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} URLs could not be ranked", failed, reports.len());
    }

    Ok(())
}

/// Ranks every URL on its own task, bounded by a concurrency limit
///
/// Results come back in input order. A failed URL produces a failure report
/// and does not abort its siblings.
async fn rank_all(urls: &[String], config: ScrapeConfig) -> Vec<UrlReport> {
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent));
    let service = Arc::new(RankingService::new(config));
    let mut tasks = JoinSet::new();

    for (index, url) in urls.iter().cloned().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let service = Arc::clone(&service);

        tasks.spawn(async move {
            // The semaphore is never closed, so acquisition only gates.
            let _permit = semaphore.acquire_owned().await.ok();

            let report = match service.rank(&url).await {
                Ok(ranking) => UrlReport::success(url, ranking),
                Err(e) => {
                    tracing::error!("failed to rank {}: {}", url, e);
                    UrlReport::failure(url, &e)
                }
            };
            (index, report)
        });
    }

    let mut slots: Vec<Option<UrlReport>> = urls.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, report)) => slots[index] = Some(report),
            Err(e) => tracing::error!("ranking task failed to complete: {}", e),
        }
    }

    slots
        .into_iter()
        .zip(urls)
        .map(|(slot, url)| {
            slot.unwrap_or_else(|| {
                UrlReport::failure(
                    url.clone(),
                    &ScrapeError::Unexpected("ranking task did not complete".to_string()),
                )
            })
        })
        .collect()
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kwrank=info,warn"),
            1 => EnvFilter::new("kwrank=debug,info"),
            2 => EnvFilter::new("kwrank=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
