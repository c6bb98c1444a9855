//! Token-budgeted re-chunking.
//!
//! Hands the emitted text to a collaborating splitter (normally a chat
//! model, see [`crate::llm`]) and validates the response: every word of the
//! input must reappear, in order, across the returned pieces. Responses that
//! fail validation or cannot be parsed degrade to a deterministic local
//! split, recorded as a warning. Collaborator transport failures propagate
//! unchanged; there is no retry.

use tracing::warn;

use crate::chunk::{count_words, Chunk, ChunkType};
use crate::dedup::normalize_text;
use crate::error::Result;
use crate::merge::renumber;
use crate::options::Options;

/// One re-chunking request.
#[derive(Debug, Clone)]
pub struct RechunkRequest {
    /// Full text to split, pieces joined by blank lines.
    pub text: String,
    /// Approximate upper bound per returned piece, in tokens.
    pub max_tokens: usize,
}

/// Collaborator response, after transport succeeded.
#[derive(Debug, Clone)]
pub enum RechunkResponse {
    /// Parsed piece list.
    Pieces(Vec<String>),
    /// Response received but not interpretable as a piece list. Carries the
    /// raw payload for the warning.
    Malformed(String),
}

/// A collaborating text splitter.
pub trait Rechunker {
    /// Split the request text into token-budgeted pieces.
    ///
    /// Transport failures are errors; an unparseable payload is a successful
    /// call returning [`RechunkResponse::Malformed`].
    fn rechunk(&self, request: &RechunkRequest) -> Result<RechunkResponse>;
}

/// Re-chunk an emitted sequence against a token budget.
///
/// Returns the replacement chunk sequence plus any degradation warnings.
/// Output chunks are typed merged and carry no heading; re-chunked spans no
/// longer map to single source nodes. Errors only when the collaborator
/// itself is unreachable.
pub fn rechunk<R: Rechunker + ?Sized>(
    chunks: &[Chunk],
    rechunker: &R,
    options: &Options,
) -> Result<(Vec<Chunk>, Vec<String>)> {
    if chunks.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let full_text = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let request = RechunkRequest {
        text: full_text.clone(),
        max_tokens: options.max_chunk_tokens,
    };

    let mut warnings = Vec::new();
    let pieces = match rechunker.rechunk(&request)? {
        RechunkResponse::Pieces(pieces) => {
            let pieces: Vec<String> = pieces
                .iter()
                .map(|p| normalize_text(p))
                .filter(|p| !p.is_empty())
                .collect();
            if words_conserved(&full_text, &pieces) {
                pieces
            } else {
                warn!("re-chunker response dropped or reordered words, using local split");
                warnings.push(
                    "re-chunker response failed word conservation; used local split".to_string(),
                );
                local_split(&full_text, options.max_chunk_tokens)
            }
        }
        RechunkResponse::Malformed(raw) => {
            warn!(raw_len = raw.len(), "re-chunker response unparseable, using local split");
            warnings.push("re-chunker response was malformed; used local split".to_string());
            local_split(&full_text, options.max_chunk_tokens)
        }
    };

    let mut out: Vec<Chunk> = pieces
        .into_iter()
        .map(|text| {
            let word_count = count_words(&text);
            Chunk {
                id: 0,
                chunk_type: ChunkType::Merged,
                heading: None,
                text,
                word_count,
                html_tag: "merged".to_string(),
                html_classes: Vec::new(),
                html_id: None,
            }
        })
        .collect();
    renumber(&mut out);

    Ok((out, warnings))
}

/// Check that the pieces carry exactly the words of the original, in order.
#[must_use]
pub fn words_conserved(original: &str, pieces: &[String]) -> bool {
    let original_words = original.split_whitespace();
    let piece_words = pieces.iter().flat_map(|p| p.split_whitespace());
    original_words.eq(piece_words)
}

/// Deterministic fallback split: fixed-size word windows.
///
/// Budgets roughly three words per four tokens, so every piece stays under
/// the token bound for ordinary English text.
#[must_use]
pub fn local_split(text: &str, max_tokens: usize) -> Vec<String> {
    let max_words = (max_tokens * 3 / 4).max(1);
    let words: Vec<&str> = text.split_whitespace().collect();
    words.chunks(max_words).map(|w| w.join(" ")).collect()
}
