//! # sitechunk
//!
//! Retrieval-oriented content chunking for web pages.
//!
//! This library turns raw HTML into an ordered sequence of deduplicated,
//! whitespace-normalized text chunks suitable for indexing or embedding. It
//! strips navigation, advertisements and boilerplate, locates the main
//! content area, extracts paragraph-level units with their section headings,
//! removes containment duplicates, and merges undersized chunks.
//!
//! ## Quick Start
//!
//! ```rust
//! use sitechunk::chunk;
//!
//! let html = r#"<html><body><main>
//! <h2>Care Tips</h2>
//! <p>Wash with lukewarm water and a mild shampoo for the best results.</p>
//! </main></body></html>"#;
//!
//! let result = chunk(html);
//! for c in &result.chunks {
//!     println!("[{}] {:?}: {}", c.id, c.chunk_type, c.text);
//! }
//! ```
//!
//! ## Features
//!
//! - **Boilerplate Removal**: Strips navigation, ads, cookie banners, overlays
//! - **Content Location**: `main`/`role=main`/`article`/content-class cascade
//! - **Deduplication**: Containment-aware; supersets replace their fragments
//! - **Small-Chunk Merging**: Folds undersized chunks to a word floor
//! - **Site Tooling**: Sitemap discovery and parallel batch chunking
//! - **Optional Re-chunking**: Token-budgeted splitting via a chat model,
//!   with a deterministic local fallback

mod chunk;
mod dedup;
mod error;
mod leaves;
mod locate;
mod merge;
mod options;
mod patterns;
mod pipeline;
mod sanitize;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and strict decoding.
pub mod encoding;

/// Blocking page fetching with browser-like headers and cookies.
pub mod fetch;

/// Sitemap and sitemap-index URL discovery.
pub mod sitemap;

/// Parallel fetch-and-chunk over URL lists.
pub mod batch;

/// Token-budgeted re-chunking contract and validation.
pub mod rechunk;

/// Chat-completion backed re-chunker.
pub mod llm;

// Public API - re-exports
pub use chunk::{render_chunks_text, Chunk, ChunkType, ChunkingResult, Summary};
pub use error::{Error, Result};
pub use options::Options;

/// Chunks an HTML document using default options.
///
/// Never fails on document content: a page with nothing extractable yields
/// an empty chunk sequence plus a warning.
///
/// # Example
///
/// ```rust
/// use sitechunk::chunk;
///
/// let html = "<html><body><article><p>Enough words to make one full chunk here.</p></article></body></html>";
/// let result = chunk(html);
/// assert_eq!(result.chunks.len(), 1);
/// ```
#[must_use]
pub fn chunk(html: &str) -> ChunkingResult {
    chunk_with_options(html, &Options::default())
}

/// Chunks an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use sitechunk::{chunk_with_options, Options};
///
/// let html = "<html><body><article><p>Enough words to make one full chunk here.</p></article></body></html>";
/// let options = Options {
///     merge_small_chunks: false,
///     ..Options::default()
/// };
/// let result = chunk_with_options(html, &options);
/// assert_eq!(result.chunks.len(), 1);
/// ```
#[must_use]
pub fn chunk_with_options(html: &str, options: &Options) -> ChunkingResult {
    pipeline::chunk_document(html, options)
}

/// Chunks HTML bytes, decoding them first.
///
/// The encoding comes from `<meta charset>` or the `Content-Type` meta tag,
/// defaulting to UTF-8. Decoding is strict: bytes invalid under the declared
/// encoding are an error, never silently replaced.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the bytes are not valid under the declared
/// encoding.
///
/// # Example
///
/// ```rust
/// use sitechunk::{chunk_bytes, Options};
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article><p>Un caf\xE9 noir pour bien commencer la matin\xE9e.</p></article></body></html>";
/// let result = chunk_bytes(html, &Options::default())?;
/// assert!(result.chunks[0].text.contains("café"));
/// # Ok::<(), sitechunk::Error>(())
/// ```
pub fn chunk_bytes(html: &[u8], options: &Options) -> Result<ChunkingResult> {
    let html_str = encoding::decode_html(html)?;
    Ok(chunk_with_options(&html_str, options))
}
