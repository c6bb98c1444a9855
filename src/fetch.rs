//! Page fetching over blocking HTTP.
//!
//! Requests carry browser-like headers and optional session cookies so that
//! ordinary sites serve their full markup. HTTP error statuses are data, not
//! errors: they come back in the outcome for the caller to report per page.
//! Only transport failures (timeout, refused connection, TLS) are errors.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, USER_AGENT};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Request configuration for a [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Extra request headers, applied after the browser-like defaults.
    pub headers: Vec<(String, String)>,
    /// Session cookies sent with every request.
    pub cookies: Vec<(String, String)>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            cookies: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Result of one successful HTTP exchange, whatever the status.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// HTTP status code, including error statuses.
    pub status_code: u16,
    /// Raw response body bytes, undecoded.
    pub body: Vec<u8>,
}

/// Blocking HTTP fetcher with a shared connection pool.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Build a fetcher from the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| config_error(name, &e.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| config_error(name.as_str(), &e.to_string()))?;
            headers.insert(name, value);
        }

        if !config.cookies.is_empty() {
            let cookie_line = config
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            let value = HeaderValue::from_str(&cookie_line)
                .map_err(|e| config_error("cookie", &e.to_string()))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Fetch {
                url: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    /// Fetch one URL. Redirects are followed; the returned status is final.
    pub fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        let resp = self.client.get(url).send().map_err(|e| Error::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status_code = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                reason: format!("failed to read body: {e}"),
            })?
            .to_vec();

        debug!(url, status_code, bytes = body.len(), "fetched page");
        Ok(FetchOutcome { status_code, body })
    }
}

fn config_error(what: &str, detail: &str) -> Error {
    Error::Fetch {
        url: String::new(),
        reason: format!("invalid header `{what}`: {detail}"),
    }
}

/// Parse a browser-style `Cookie:` header line into name/value pairs.
///
/// Entries without `=` are skipped. Useful for pasting a session cookie
/// string straight from developer tools.
#[must_use]
pub fn parse_cookie_header(line: &str) -> Vec<(String, String)> {
    line.split(';')
        .filter_map(|part| {
            let part = part.trim();
            let (name, value) = part.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}
