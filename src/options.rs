//! Configuration options for the chunking pipeline.
//!
//! The `Options` struct controls unit admission, small-chunk merging and the
//! re-chunker token budget. Use `Default::default()` for standard settings.

/// Configuration options for content chunking.
///
/// All fields are public for easy configuration.
///
/// # Example
///
/// ```rust
/// use sitechunk::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     merge_min_words: 40,
///     merge_small_chunks: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum word count for a candidate unit to become a chunk.
    ///
    /// Default: `5`
    pub min_chunk_words: usize,

    /// Merge consecutive undersized chunks into one.
    ///
    /// Default: `true`
    pub merge_small_chunks: bool,

    /// Word threshold below which a chunk is merged with its successor.
    ///
    /// The final chunk of a document is flushed unconditionally and may
    /// stay below this threshold.
    ///
    /// Default: `20`
    pub merge_min_words: usize,

    /// Minimum normalized text length (characters) for deduplication.
    ///
    /// Normalized texts shorter than this are rejected outright and never
    /// enter the seen-text set.
    ///
    /// Default: `10`
    pub min_dedup_chars: usize,

    /// Minimum rendered text length (characters) for a classed `div` or
    /// `section` to qualify as the main content area in the locator cascade.
    ///
    /// Default: `200`
    pub main_text_threshold: usize,

    /// Approximate upper bound on re-chunker output chunk size, in tokens.
    ///
    /// Default: `500`
    pub max_chunk_tokens: usize,

    /// Additional class/id exclusion patterns for the sanitizer, applied on
    /// top of the built-in boilerplate set.
    ///
    /// Each entry is a regular expression matched case-insensitively against
    /// the element's class tokens and id. Invalid patterns are skipped with
    /// a warning; they never fail the run.
    ///
    /// Default: empty
    pub extra_exclusion_patterns: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_chunk_words: 5,
            merge_small_chunks: true,
            merge_min_words: 20,
            min_dedup_chars: 10,
            main_text_threshold: 200,
            max_chunk_tokens: 500,
            extra_exclusion_patterns: Vec::new(),
        }
    }
}
