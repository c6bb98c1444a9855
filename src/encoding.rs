//! Character encoding detection and strict decoding.
//!
//! Detects the charset from HTML meta tags and decodes to UTF-8. Unlike
//! extraction stages, decoding is strict: bytes invalid under the declared
//! encoding are reported as [`Error::Decode`], never papered over with
//! replacement characters.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect character encoding from HTML bytes.
///
/// Looks for charset declarations in the following order:
/// 1. `<meta charset="...">`
/// 2. `<meta http-equiv="Content-Type" content="...; charset=...">`
/// 3. Defaults to UTF-8 if no declaration found
///
/// Only examines the first 1024 bytes for performance.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(1024)];

    // Lossy conversion is fine here: we only scan for ASCII meta markup.
    let head_str = String::from_utf8_lossy(head);

    if let Some(charset) = extract_charset(&head_str) {
        if let Some(encoding) = Encoding::for_label(charset.as_bytes()) {
            return encoding;
        }
    }

    if let Some(charset) = extract_content_type_charset(&head_str) {
        if let Some(encoding) = Encoding::for_label(charset.as_bytes()) {
            return encoding;
        }
    }

    UTF_8
}

/// Extract charset from `<meta charset="...">` tag.
fn extract_charset(html: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract charset from `<meta http-equiv="Content-Type" content="...; charset=...">` tag.
fn extract_content_type_charset(html: &str) -> Option<String> {
    CONTENT_TYPE_CHARSET_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode HTML bytes to a UTF-8 string under the detected encoding.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the bytes are not valid under the detected
/// (or default UTF-8) encoding. A failed document produces no chunks.
///
/// # Examples
///
/// ```
/// use sitechunk::encoding::decode_html;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// let utf8_str = decode_html(html)?;
/// assert!(utf8_str.contains("Hello, World!"));
/// # Ok::<(), sitechunk::Error>(())
/// ```
pub fn decode_html(html: &[u8]) -> Result<String> {
    let encoding = detect_encoding(html);

    if encoding == UTF_8 {
        // Fast path: validate in place, no transcoding needed.
        return match std::str::from_utf8(html) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(Error::Decode {
                encoding: UTF_8.name().to_string(),
            }),
        };
    }

    let (decoded, _encoding_used, had_errors) = encoding.decode(html);
    if had_errors {
        return Err(Error::Decode {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(decoded.into_owned())
}
