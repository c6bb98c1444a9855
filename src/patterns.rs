//! Compiled regex patterns, tag sets and CSS selectors for the pipeline.
//!
//! All patterns are compiled once at startup using `LazyLock`. Patterns are
//! organized by their purpose in the pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Sanitizer Patterns
// =============================================================================

/// Tags removed wholesale by the sanitizer, subtree included.
pub static EXCLUDED_TAGS: &[&str] = &[
    "header", "footer", "nav", "script", "style", "noscript", "iframe", "meta", "link", "aside",
];

/// Combined selector for [`EXCLUDED_TAGS`], used for single-scan removal.
pub static EXCLUDED_TAG_SELECTOR: LazyLock<String> =
    LazyLock::new(|| EXCLUDED_TAGS.join(", "));

/// Matches class/id names indicating boilerplate containers (navigation,
/// cookie banners, ads, overlays). Any element whose class tokens or id match
/// is removed with its subtree.
pub static EXCLUDE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(header|footer|nav|menu|sidebar|cookie|banner|advertisement|ad-|breadcrumb|social|share|newsletter|modal|popup|overlay|dialog)",
    )
    .expect("EXCLUDE_NAME regex")
});

/// ARIA roles whose elements are removed with their subtree.
pub static EXCLUDED_ROLES: &[&str] =
    &["navigation", "banner", "contentinfo", "complementary", "dialog"];

// =============================================================================
// Content Identification Patterns
// =============================================================================

/// Matches class/id names likely to mark the main content container.
pub static CONTENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(content|main|body|article|post|page|container|wrapper|product)")
        .expect("CONTENT_NAME regex")
});

// =============================================================================
// Leaf Extraction Tag Sets
// =============================================================================

/// Tags considered candidate text units, in document order.
pub static UNIT_TAGS: &[&str] = &[
    "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "figcaption", "dt", "dd",
];

/// Sectioning containers consulted for the nearest-heading lookup.
pub static SECTIONING_TAGS: &[&str] = &["section", "article", "div", "main", "body"];

/// Selector for heading elements, levels 1-6.
pub const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

// =============================================================================
// Text Normalization
// =============================================================================

/// Matches runs of whitespace for single-space normalization.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));
