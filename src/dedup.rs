//! Text normalization and containment-based deduplication.
//!
//! The dedup register remembers every accepted text and rejects exact
//! repeats and substrings of previously accepted text. A new text that
//! strictly contains earlier entries supersedes them: the contained entries
//! are retracted and the superset takes their place.

use crate::patterns::WHITESPACE_RUN;

/// Collapse internal whitespace runs to single spaces and trim the ends.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Outcome of offering a text to the register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Text accepted and recorded.
    Accepted,
    /// Text rejected (too short, exact repeat, or contained in an earlier
    /// acceptance).
    Rejected,
    /// Text accepted; the entries at these indices were contained within it
    /// and have been retracted. Indices refer to positions in the register
    /// before this call, in descending order.
    Superseded(Vec<usize>),
}

/// Register of accepted normalized texts, in acceptance order.
///
/// Callers keeping a parallel chunk list must mirror retractions: after a
/// [`Decision::Superseded`], remove the chunks at the returned indices before
/// appending the new one.
#[derive(Debug)]
pub struct SeenTexts {
    entries: Vec<String>,
    min_chars: usize,
}

impl SeenTexts {
    /// Empty register rejecting texts shorter than `min_chars` characters.
    #[must_use]
    pub fn new(min_chars: usize) -> Self {
        Self {
            entries: Vec::new(),
            min_chars,
        }
    }

    /// Offer a normalized text to the register.
    ///
    /// Rules apply in order:
    /// 1. Shorter than the minimum character length: rejected.
    /// 2. Exactly equal to an accepted entry: rejected.
    /// 3. Substring of an accepted entry: rejected.
    /// 4. Strict superset of one or more accepted entries: those entries are
    ///    retracted and the new text is accepted.
    /// 5. Otherwise accepted.
    ///
    /// Containment is over normalized character sequences. Quadratic in the
    /// number of accepted entries; fine at typical page sizes.
    pub fn offer(&mut self, text: &str) -> Decision {
        if text.chars().count() < self.min_chars {
            return Decision::Rejected;
        }
        if self
            .entries
            .iter()
            .any(|seen| seen == text || seen.contains(text))
        {
            return Decision::Rejected;
        }

        let mut contained: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, seen)| text.contains(seen.as_str()))
            .map(|(i, _)| i)
            .collect();

        if contained.is_empty() {
            self.entries.push(text.to_string());
            return Decision::Accepted;
        }

        // Descending so callers can remove by index without shifting.
        contained.reverse();
        for &i in &contained {
            self.entries.remove(i);
        }
        self.entries.push(text.to_string());
        Decision::Superseded(contained)
    }

    /// Number of currently accepted entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_whitespace_runs_and_ends() {
        assert_eq!(normalize_text("  hello \n\t  world  "), "hello world");
        assert_eq!(normalize_text("already clean"), "already clean");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn rejects_short_texts() {
        let mut seen = SeenTexts::new(10);
        assert_eq!(seen.offer("too short"), Decision::Rejected);
        assert!(seen.is_empty());
    }

    #[test]
    fn rejects_exact_repeats() {
        let mut seen = SeenTexts::new(10);
        assert_eq!(seen.offer("a sentence long enough"), Decision::Accepted);
        assert_eq!(seen.offer("a sentence long enough"), Decision::Rejected);
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn rejects_substrings_of_accepted_entries() {
        let mut seen = SeenTexts::new(10);
        assert_eq!(
            seen.offer("the quick brown fox jumps over the lazy dog"),
            Decision::Accepted
        );
        assert_eq!(seen.offer("quick brown fox"), Decision::Rejected);
    }

    #[test]
    fn superset_retracts_contained_entries() {
        let mut seen = SeenTexts::new(10);
        assert_eq!(seen.offer("first small piece"), Decision::Accepted);
        assert_eq!(seen.offer("second small piece"), Decision::Accepted);
        assert_eq!(
            seen.offer("unrelated third entry"),
            Decision::Accepted
        );

        let decision =
            seen.offer("first small piece and then second small piece together");
        assert_eq!(decision, Decision::Superseded(vec![1, 0]));
        assert_eq!(seen.len(), 2);

        // The retracted pieces now read as substrings of the superset.
        assert_eq!(seen.offer("first small piece"), Decision::Rejected);
    }

    #[test]
    fn independent_texts_accumulate() {
        let mut seen = SeenTexts::new(10);
        assert_eq!(seen.offer("wash hair with warm water"), Decision::Accepted);
        assert_eq!(seen.offer("rinse thoroughly afterwards"), Decision::Accepted);
        assert_eq!(seen.len(), 2);
    }
}
