//! Pipeline orchestration: sanitize, locate, extract, deduplicate, merge.
//!
//! Stage order is fixed. The chunk list and the dedup register grow in
//! lockstep, so a superseding acceptance can retract earlier chunks by
//! index.

use tracing::debug;

use crate::chunk::{count_words, Chunk, ChunkType, ChunkingResult};
use crate::dedup::{normalize_text, Decision, SeenTexts};
use crate::dom;
use crate::leaves::extract_units;
use crate::locate::locate_main_content;
use crate::merge::{merge_small_chunks, renumber};
use crate::options::Options;
use crate::sanitize::sanitize;

/// Chunk a parsed-and-decoded HTML document.
///
/// Never errors: a document with no extractable content yields an empty
/// chunk sequence and a warning. Chunk ids are dense and increasing in
/// document order, re-assigned after deduplication and again after merging.
#[must_use]
pub fn chunk_document(html: &str, options: &Options) -> ChunkingResult {
    let doc = dom::parse(html);
    let mut warnings = sanitize(&doc, options);

    let content = locate_main_content(&doc, options);
    let units = extract_units(&content);
    debug!(units = units.len(), "extracted candidate units");

    let mut seen = SeenTexts::new(options.min_dedup_chars);
    let mut chunks: Vec<Chunk> = Vec::new();

    for unit in units {
        let text = normalize_text(&unit.text);
        if count_words(&text) < options.min_chunk_words {
            continue;
        }

        match seen.offer(&text) {
            Decision::Rejected => {}
            Decision::Accepted => {
                chunks.push(make_chunk(&unit.tag, unit.nearest_heading, text, unit.classes, unit.id));
            }
            Decision::Superseded(retracted) => {
                // Indices arrive descending; the chunk list mirrors the
                // register, so plain removal keeps them aligned.
                for i in retracted {
                    chunks.remove(i);
                }
                chunks.push(make_chunk(&unit.tag, unit.nearest_heading, text, unit.classes, unit.id));
            }
        }
    }

    renumber(&mut chunks);

    if options.merge_small_chunks {
        chunks = merge_small_chunks(chunks, options.merge_min_words);
    }

    if chunks.is_empty() {
        warnings.push("no extractable content found in document".to_string());
    }
    debug!(chunks = chunks.len(), warnings = warnings.len(), "chunking complete");

    ChunkingResult { chunks, warnings }
}

fn make_chunk(
    tag: &str,
    heading: Option<String>,
    text: String,
    classes: Vec<String>,
    html_id: Option<String>,
) -> Chunk {
    let word_count = count_words(&text);
    Chunk {
        id: 0,
        chunk_type: ChunkType::from_tag(tag),
        heading,
        text,
        word_count,
        html_tag: tag.to_string(),
        html_classes: classes,
        html_id,
    }
}
