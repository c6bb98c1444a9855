//! Chunk records and result types.
//!
//! The structured (serde) form of the chunk sequence is authoritative; the
//! flattened rendering in [`render_chunks_text`] is for human inspection.

use serde::{Deserialize, Serialize};

/// Classification of an emitted chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkType {
    /// A heading element, levels 1-6.
    Heading,
    /// A paragraph-like unit (`p`, `dt`, `dd`).
    Paragraph,
    /// A list item.
    ListItem,
    /// A block quotation.
    Quote,
    /// A figure caption.
    Caption,
    /// Multiple undersized chunks joined by the merger, or a re-chunked span
    /// that no longer maps to a single source node.
    Merged,
}

impl ChunkType {
    /// Map an originating tag name to its chunk type.
    ///
    /// Heading tags collapse to [`ChunkType::Heading`]; definition terms and
    /// descriptions are treated as paragraphs.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading,
            "li" => Self::ListItem,
            "blockquote" => Self::Quote,
            "figcaption" => Self::Caption,
            _ => Self::Paragraph,
        }
    }
}

/// A unit of emitted, deduplicated text with metadata.
///
/// `id` values are dense and strictly increasing in emission order; they are
/// re-assigned after any merge pass. `text` is whitespace-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in final emission order, contiguous from 0.
    pub id: usize,

    /// Chunk classification.
    #[serde(rename = "type")]
    pub chunk_type: ChunkType,

    /// Nearest enclosing section heading text, if any.
    pub heading: Option<String>,

    /// Normalized text content.
    pub text: String,

    /// Word count of `text`, recomputed whenever the text changes.
    pub word_count: usize,

    /// Originating tag name (traceability only).
    pub html_tag: String,

    /// Originating class tokens (traceability only).
    pub html_classes: Vec<String>,

    /// Originating id attribute (traceability only).
    pub html_id: Option<String>,
}

impl Chunk {
    /// Recompute `word_count` from the current text.
    pub fn refresh_word_count(&mut self) {
        self.word_count = count_words(&self.text);
    }
}

/// Count whitespace-separated words.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Result of chunking one document.
///
/// A document that sanitizes down to nothing yields an empty chunk sequence
/// plus a warning, never an error: partial chunking is more useful than
/// aborting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChunkingResult {
    /// Ordered chunk sequence.
    pub chunks: Vec<Chunk>,

    /// Non-fatal conditions encountered during the run, such as:
    /// - No extractable content after sanitization
    /// - Malformed re-chunker response (local fallback used)
    /// - Skipped invalid user exclusion patterns
    pub warnings: Vec<String>,
}

impl ChunkingResult {
    /// Summary statistics over the chunk sequence.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let total_words: usize = self.chunks.iter().map(|c| c.word_count).sum();
        let with_headings = self.chunks.iter().filter(|c| c.heading.is_some()).count();
        let avg_words_per_chunk = if self.chunks.is_empty() {
            0.0
        } else {
            total_words as f64 / self.chunks.len() as f64
        };
        Summary {
            total_chunks: self.chunks.len(),
            total_words,
            avg_words_per_chunk,
            chunks_with_headings: with_headings,
        }
    }
}

/// Aggregate statistics for a chunk sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of emitted chunks.
    pub total_chunks: usize,
    /// Sum of word counts across all chunks.
    pub total_words: usize,
    /// Mean words per chunk, 0 when empty.
    pub avg_words_per_chunk: f64,
    /// Number of chunks carrying a section heading.
    pub chunks_with_headings: usize,
}

/// Render a chunk sequence as flattened, human-readable text.
///
/// Section headers, separators and chunk bodies; the structured form is
/// authoritative, this is for eyeballing output files.
#[must_use]
pub fn render_chunks_text(chunks: &[Chunk]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for chunk in chunks {
        let _ = writeln!(out, "\n{}", "=".repeat(80));
        let _ = writeln!(
            out,
            "CHUNK {} | Type: {:?} | Words: {}",
            chunk.id, chunk.chunk_type, chunk.word_count
        );
        if let Some(ref heading) = chunk.heading {
            let _ = writeln!(out, "Heading: {heading}");
        }
        let _ = writeln!(out, "{}", "=".repeat(80));
        let _ = writeln!(out, "{}\n", chunk.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: usize, text: &str, heading: Option<&str>) -> Chunk {
        Chunk {
            id,
            chunk_type: ChunkType::Paragraph,
            heading: heading.map(str::to_string),
            text: text.to_string(),
            word_count: count_words(text),
            html_tag: "p".to_string(),
            html_classes: Vec::new(),
            html_id: None,
        }
    }

    #[test]
    fn chunk_type_from_tag_maps_all_unit_tags() {
        assert_eq!(ChunkType::from_tag("h2"), ChunkType::Heading);
        assert_eq!(ChunkType::from_tag("p"), ChunkType::Paragraph);
        assert_eq!(ChunkType::from_tag("li"), ChunkType::ListItem);
        assert_eq!(ChunkType::from_tag("blockquote"), ChunkType::Quote);
        assert_eq!(ChunkType::from_tag("figcaption"), ChunkType::Caption);
        assert_eq!(ChunkType::from_tag("dt"), ChunkType::Paragraph);
        assert_eq!(ChunkType::from_tag("dd"), ChunkType::Paragraph);
    }

    #[test]
    fn chunk_type_serializes_kebab_case() {
        let json = serde_json::to_string(&ChunkType::ListItem).unwrap_or_default();
        assert_eq!(json, "\"list-item\"");
    }

    #[test]
    fn summary_counts_words_and_headings() {
        let result = ChunkingResult {
            chunks: vec![
                chunk(0, "one two three", Some("Intro")),
                chunk(1, "four five", None),
            ],
            warnings: Vec::new(),
        };
        let summary = result.summary();
        assert_eq!(summary.total_chunks, 2);
        assert_eq!(summary.total_words, 5);
        assert_eq!(summary.chunks_with_headings, 1);
        assert!((summary.avg_words_per_chunk - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn render_includes_heading_and_body() {
        let rendered = render_chunks_text(&[chunk(0, "body text here", Some("Care Tips"))]);
        assert!(rendered.contains("CHUNK 0"));
        assert!(rendered.contains("Heading: Care Tips"));
        assert!(rendered.contains("body text here"));
    }
}
