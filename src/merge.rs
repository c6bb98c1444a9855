//! Small-chunk merger.
//!
//! Folds consecutive undersized chunks into combined chunks so downstream
//! consumers see units of a useful minimum size. A single left-to-right pass;
//! chunk order is never rearranged.

use crate::chunk::{count_words, Chunk, ChunkType};

/// Merge consecutive chunks until each group reaches `min_words`.
///
/// Chunks accumulate left to right; once the running word count of the open
/// group reaches the threshold the group is flushed. The trailing group is
/// flushed unconditionally, so the last chunk of a document may stay below
/// the threshold. Ids are re-assigned densely from 0 afterwards.
#[must_use]
pub fn merge_small_chunks(chunks: Vec<Chunk>, min_words: usize) -> Vec<Chunk> {
    let mut merged: Vec<Chunk> = Vec::with_capacity(chunks.len());
    let mut group: Vec<Chunk> = Vec::new();
    let mut group_words = 0usize;

    for chunk in chunks {
        group_words += chunk.word_count;
        group.push(chunk);
        if group_words >= min_words {
            merged.push(flush_group(std::mem::take(&mut group)));
            group_words = 0;
        }
    }
    if !group.is_empty() {
        merged.push(flush_group(group));
    }

    renumber(&mut merged);
    merged
}

/// Re-assign ids densely in sequence order, starting at 0.
pub fn renumber(chunks: &mut [Chunk]) {
    for (i, chunk) in chunks.iter_mut().enumerate() {
        chunk.id = i;
    }
}

/// Collapse a group into one chunk.
///
/// A single-chunk group passes through untouched. Larger groups join their
/// texts with a blank line and adopt the first heading present in any piece;
/// per-node source metadata no longer applies and is cleared.
fn flush_group(mut group: Vec<Chunk>) -> Chunk {
    if group.len() == 1 {
        return group.remove(0);
    }

    let heading = group.iter().find_map(|c| c.heading.clone());
    let text = group
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let word_count = count_words(&text);

    Chunk {
        id: 0,
        chunk_type: ChunkType::Merged,
        heading,
        text,
        word_count,
        html_tag: "merged".to_string(),
        html_classes: Vec::new(),
        html_id: None,
    }
}
