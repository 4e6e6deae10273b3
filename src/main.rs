//! CLI entry point for the PDF crawler.

use anyhow::Result;
use clap::Parser;
use pdf_crawler::user_agent::default_headers;
use pdf_crawler::{CrawlConfig, CrawlTarget, Crawler};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let base_url = args.base_url.clone().unwrap_or_default();
    if base_url.is_empty() {
        info!("No listing page given. Pass the page URL as the first argument.");
        info!("Example: pdf-crawler https://example.com/papers/ -o ./pdfs");
    }

    let mut headers = default_headers();
    headers.extend(args.headers.iter().cloned());

    let config = CrawlConfig::default()
        .with_headers(headers)
        .with_max_attempts(u32::from(args.max_retries));
    let target = CrawlTarget::new(base_url, args.output_dir);

    let crawler = Crawler::with_http_client(target, config)?;
    let report = crawler.run().await?;

    info!(
        succeeded = report.succeeded(),
        skipped = report.skipped(),
        failed = report.failed(),
        total = report.total(),
        "Crawl complete"
    );

    Ok(())
}
