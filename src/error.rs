//! Error types for sitechunk.
//!
//! Structural pipeline stages (sanitize/locate/extract/dedupe/merge) never
//! fail on malformed HTML - they degrade to smaller or empty results. Only
//! decode failures and collaborator failures surface as hard errors.

/// Error type for chunking and collaborator operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input bytes could not be decoded under the declared encoding.
    #[error("input could not be decoded as {encoding}")]
    Decode {
        /// Name of the encoding the document declared (or UTF-8 by default).
        encoding: String,
    },

    /// The fetch collaborator failed at the transport level (timeout,
    /// connection refused, TLS failure). HTTP error statuses are not this
    /// variant; they come back in `FetchOutcome::status_code`.
    #[error("fetch failed for {url}: {reason}")]
    Fetch {
        /// The URL that was being fetched.
        url: String,
        /// Transport-level failure description.
        reason: String,
    },

    /// The re-chunking collaborator errored or timed out. Propagated to the
    /// caller as a per-document failure; no internal retry.
    #[error("re-chunking collaborator unavailable: {0}")]
    Collaborator(String),
}

/// Result type alias for chunking operations.
pub type Result<T> = std::result::Result<T, Error>;
