//! Parallel page processing.
//!
//! Fetches, decodes and chunks a list of URLs on a bounded worker pool.
//! Per-page failures (transport, decode, HTTP error status) become report
//! entries rather than aborting the batch; report order matches input order.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::encoding::decode_html;
use crate::fetch::PageFetcher;
use crate::options::Options;
use crate::pipeline::chunk_document;

/// Batch execution settings.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Worker thread count.
    pub workers: usize,
    /// Cap on how many URLs to process, front of the list first.
    pub max_pages: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            max_pages: None,
        }
    }
}

/// Outcome of processing one URL.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    /// The page URL.
    pub url: String,
    /// Final HTTP status, absent on transport failure.
    pub status_code: Option<u16>,
    /// Response body size in bytes, absent on transport failure.
    pub content_length: Option<usize>,
    /// Emitted chunk count, absent unless chunking ran.
    pub chunk_count: Option<usize>,
    /// Failure description for pages that produced no chunks.
    pub error: Option<String>,
    /// When the fetch was attempted.
    pub fetched_at: DateTime<Utc>,
}

/// Aggregate counters over a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Pages attempted.
    pub total_pages: usize,
    /// Pages that chunked successfully.
    pub succeeded: usize,
    /// Pages that failed at any stage.
    pub failed: usize,
    /// Chunks emitted across all successful pages.
    pub total_chunks: usize,
}

/// Summarize a report list.
#[must_use]
pub fn summarize(reports: &[PageReport]) -> BatchSummary {
    let succeeded = reports.iter().filter(|r| r.error.is_none()).count();
    let total_chunks = reports.iter().filter_map(|r| r.chunk_count).sum();
    BatchSummary {
        total_pages: reports.len(),
        succeeded,
        failed: reports.len() - succeeded,
        total_chunks,
    }
}

/// Fetch and chunk every URL, in parallel, preserving input order.
#[must_use]
pub fn process_urls(
    fetcher: &PageFetcher,
    urls: &[String],
    options: &Options,
    config: &BatchConfig,
) -> Vec<PageReport> {
    let limit = config.max_pages.unwrap_or(urls.len()).min(urls.len());
    let urls = &urls[..limit];
    info!(pages = urls.len(), workers = config.workers, "starting batch run");

    let run = || {
        urls.par_iter()
            .map(|url| process_one(fetcher, url, options))
            .collect::<Vec<_>>()
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(err) => {
            warn!(%err, "worker pool unavailable, using default parallelism");
            run()
        }
    }
}

fn process_one(fetcher: &PageFetcher, url: &str, options: &Options) -> PageReport {
    let fetched_at = Utc::now();
    let mut report = PageReport {
        url: url.to_string(),
        status_code: None,
        content_length: None,
        chunk_count: None,
        error: None,
        fetched_at,
    };

    let outcome = match fetcher.fetch(url) {
        Ok(outcome) => outcome,
        Err(err) => {
            report.error = Some(err.to_string());
            return report;
        }
    };
    report.status_code = Some(outcome.status_code);
    report.content_length = Some(outcome.body.len());

    if !(200..300).contains(&outcome.status_code) {
        report.error = Some(format!("HTTP {}", outcome.status_code));
        return report;
    }

    let html = match decode_html(&outcome.body) {
        Ok(html) => html,
        Err(err) => {
            report.error = Some(err.to_string());
            return report;
        }
    };

    let result = chunk_document(&html, options);
    report.chunk_count = Some(result.chunks.len());
    report
}
