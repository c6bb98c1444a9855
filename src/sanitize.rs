//! DOM Sanitizer.
//!
//! Removes structurally irrelevant nodes (navigation, scripts, ads, overlays)
//! before content location. Removal is idempotent per node and removing a
//! node removes its entire subtree. Malformed nodes are skipped, never an
//! error: missing attributes are treated as absent.

use regex::Regex;
use tracing::warn;

use crate::dom::{self, Document, Selection};
use crate::options::Options;
use crate::patterns::{EXCLUDED_ROLES, EXCLUDED_TAG_SELECTOR, EXCLUDE_NAME};

/// Sanitize the document in place.
///
/// Removes, recursively:
/// - all elements in the fixed tag exclusion set (header, footer, nav,
///   script, style, noscript, iframe, meta, link, aside),
/// - any element whose class tokens or id match a boilerplate name pattern
///   (built-in set plus `options.extra_exclusion_patterns`),
/// - any element whose ARIA `role` is navigation, banner, contentinfo,
///   complementary or dialog.
///
/// Returns warnings for user-supplied exclusion patterns that failed to
/// compile; those patterns are skipped rather than failing the run.
pub fn sanitize(doc: &Document, options: &Options) -> Vec<String> {
    let mut warnings = Vec::new();

    // Tag-based removal in a single combined scan.
    dom::remove(&doc.select(&EXCLUDED_TAG_SELECTOR));

    let extra_patterns = compile_extra_patterns(&options.extra_exclusion_patterns, &mut warnings);

    // Pattern/role removal. Collect first: removing while walking the same
    // traversal would skip nodes. Removing a node whose ancestor was already
    // removed is harmless; the subtree is simply detached twice.
    let Some(root) = doc.select("html").nodes().first().copied() else {
        return warnings;
    };

    let candidates = root.descendants();
    for node in candidates {
        if !node.is_element() {
            continue;
        }
        let sel = Selection::from(node);
        if is_excluded_element(&sel, &extra_patterns) {
            dom::remove(&sel);
        }
    }

    warnings
}

/// Compile user-supplied exclusion patterns, skipping invalid ones.
fn compile_extra_patterns(patterns: &[String], warnings: &mut Vec<String>) -> Vec<Regex> {
    let mut compiled = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        match Regex::new(&format!("(?i){pattern}")) {
            Ok(re) => compiled.push(re),
            Err(err) => {
                warn!(pattern = %pattern, %err, "skipping invalid exclusion pattern");
                warnings.push(format!("skipped invalid exclusion pattern `{pattern}`: {err}"));
            }
        }
    }
    compiled
}

/// Check whether an element should be excluded by class, id or role.
fn is_excluded_element(sel: &Selection, extra_patterns: &[Regex]) -> bool {
    // Class tokens and id are matched together, case-insensitively.
    let mut names = dom::class_name(sel).unwrap_or_default();
    if let Some(id) = dom::id(sel) {
        if !names.is_empty() {
            names.push(' ');
        }
        names.push_str(&id);
    }

    if !names.is_empty() {
        if EXCLUDE_NAME.is_match(&names) {
            return true;
        }
        if extra_patterns.iter().any(|re| re.is_match(&names)) {
            return true;
        }
    }

    if let Some(role) = dom::get_attribute(sel, "role") {
        let role = role.to_ascii_lowercase();
        if EXCLUDED_ROLES.contains(&role.as_str()) {
            return true;
        }
    }

    false
}
