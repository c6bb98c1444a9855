//! Discover pages from a sitemap and chunk them in parallel.
//!
//! Usage: chunk_urls <sitemap-url> [max-pages]
//!
//! Prints one JSON report line per page, then a summary object. Session
//! cookies can be supplied through the SITECHUNK_COOKIES environment
//! variable as a browser-style `name=value; name=value` string. Log level is
//! controlled with RUST_LOG.

use std::env;
use std::error::Error;

use tracing_subscriber::EnvFilter;

use sitechunk::batch::{process_urls, summarize, BatchConfig};
use sitechunk::fetch::{parse_cookie_header, FetchConfig, PageFetcher};
use sitechunk::sitemap::discover_urls;
use sitechunk::Options;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(sitemap_url) = args.next() else {
        eprintln!("Usage: chunk_urls <sitemap-url> [max-pages]");
        std::process::exit(2);
    };
    let max_pages = match args.next() {
        Some(raw) => Some(raw.parse::<usize>()?),
        None => None,
    };

    let mut fetch_config = FetchConfig::default();
    if let Ok(cookie_line) = env::var("SITECHUNK_COOKIES") {
        fetch_config.cookies = parse_cookie_header(&cookie_line);
    }
    let fetcher = PageFetcher::new(&fetch_config)?;

    let urls = discover_urls(&fetcher, &sitemap_url)?;
    if urls.is_empty() {
        eprintln!("No URLs discovered from {sitemap_url}");
        std::process::exit(1);
    }

    let batch_config = BatchConfig {
        max_pages,
        ..BatchConfig::default()
    };
    let reports = process_urls(&fetcher, &urls, &Options::default(), &batch_config);

    for report in &reports {
        println!("{}", serde_json::to_string(report)?);
    }
    let summary = summarize(&reports);
    println!("{}", serde_json::to_string(&summary)?);

    if summary.succeeded == 0 {
        std::process::exit(1);
    }
    Ok(())
}
