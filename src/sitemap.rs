//! Sitemap URL discovery.
//!
//! Walks a sitemap, recursing through sitemap indexes, and collects page
//! URLs on the same host as the starting sitemap. Child sitemaps that fail
//! to fetch are logged and skipped; only a transport failure on the starting
//! sitemap propagates.

use std::collections::HashSet;

use tracing::warn;
use url::Url;

use crate::dom;
use crate::error::Result;
use crate::fetch::PageFetcher;

/// Recursion guard against self-referencing sitemap indexes.
const MAX_DEPTH: usize = 5;

/// Discover page URLs from a sitemap or sitemap index.
///
/// Returns URLs in document order, deduplicated, restricted to the host of
/// `sitemap_url`. A starting sitemap that answers with an error status
/// yields an empty list with a warning in the log; a transport failure on
/// the starting fetch propagates.
pub fn discover_urls(fetcher: &PageFetcher, sitemap_url: &str) -> Result<Vec<String>> {
    let host = Url::parse(sitemap_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));

    let mut urls = Vec::new();
    let mut seen_urls = HashSet::new();
    let mut visited_sitemaps = HashSet::new();

    collect(
        fetcher,
        sitemap_url,
        host.as_deref(),
        0,
        &mut visited_sitemaps,
        &mut seen_urls,
        &mut urls,
    )?;

    Ok(urls)
}

fn collect(
    fetcher: &PageFetcher,
    sitemap_url: &str,
    host: Option<&str>,
    depth: usize,
    visited: &mut HashSet<String>,
    seen: &mut HashSet<String>,
    out: &mut Vec<String>,
) -> Result<()> {
    if depth > MAX_DEPTH || !visited.insert(sitemap_url.to_string()) {
        return Ok(());
    }

    let outcome = if depth == 0 {
        fetcher.fetch(sitemap_url)?
    } else {
        match fetcher.fetch(sitemap_url) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(sitemap = sitemap_url, %err, "skipping unreachable child sitemap");
                return Ok(());
            }
        }
    };

    if !(200..300).contains(&outcome.status_code) {
        warn!(
            sitemap = sitemap_url,
            status = outcome.status_code,
            "sitemap fetch returned error status, skipping"
        );
        return Ok(());
    }

    let xml = String::from_utf8_lossy(&outcome.body);
    let doc = dom::parse(&xml);

    let is_index = !doc.select("sitemapindex").is_empty();
    let locations: Vec<String> = doc
        .select("loc")
        .nodes()
        .iter()
        .map(|node| dom::Selection::from(*node).text().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect();

    for loc in locations {
        if !same_host(&loc, host) {
            continue;
        }
        if is_index {
            collect(fetcher, &loc, host, depth + 1, visited, seen, out)?;
        } else if seen.insert(loc.clone()) {
            out.push(loc);
        }
    }

    Ok(())
}

/// True when the URL parses and sits on the expected host. With no expected
/// host (unparseable start URL), everything passes.
fn same_host(url: &str, host: Option<&str>) -> bool {
    let Some(host) = host else {
        return true;
    };
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.eq_ignore_ascii_case(host)))
        .unwrap_or(false)
}
