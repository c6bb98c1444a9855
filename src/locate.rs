//! Main-Content Locator.
//!
//! Selects the subtree most likely to hold primary content, using a
//! prioritized heuristic cascade. The body/document fallback guarantees a
//! non-empty result; location never raises.

use crate::dom::{self, Document, Selection};
use crate::options::Options;
use crate::patterns::CONTENT_NAME;

/// Locate the main content subtree. First match wins:
///
/// 1. A `<main>` element.
/// 2. An element carrying `role="main"`.
/// 3. The first `<article>`, in document order.
/// 4. The first `div`/`section` (document order) whose class/id tokens match
///    a content name pattern and whose rendered text exceeds
///    `options.main_text_threshold` characters.
/// 5. Fallback: the document body; if absent, the whole tree.
#[must_use]
pub fn locate_main_content<'a>(doc: &'a Document, options: &Options) -> Selection<'a> {
    if let Some(found) = first_of(doc, "main") {
        return found;
    }
    if let Some(found) = first_of(doc, "[role=\"main\"]") {
        return found;
    }
    if let Some(found) = first_of(doc, "article") {
        return found;
    }
    if let Some(found) = find_content_container(doc, options.main_text_threshold) {
        return found;
    }
    if let Some(found) = first_of(doc, "body") {
        return found;
    }
    doc.select("html")
}

/// First match for a selector, as its own selection.
fn first_of<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .first()
        .copied()
        .map(Selection::from)
}

/// Scan `div`/`section` elements in document order for a content-classed
/// container with enough rendered text.
fn find_content_container(doc: &Document, min_text_chars: usize) -> Option<Selection<'_>> {
    let root = doc.select("html").nodes().first().copied()?;

    for node in root.descendants() {
        if !node.is_element() {
            continue;
        }
        let Some(tag) = node.node_name() else {
            continue;
        };
        if !dom::tag_matches(&tag, &["div", "section"]) {
            continue;
        }

        let sel = Selection::from(node);
        let mut names = dom::class_name(&sel).unwrap_or_default();
        if let Some(id) = dom::id(&sel) {
            if !names.is_empty() {
                names.push(' ');
            }
            names.push_str(&id);
        }
        if names.is_empty() || !CONTENT_NAME.is_match(&names) {
            continue;
        }

        let text = dom::text_content(&sel);
        if text.trim().chars().count() > min_text_chars {
            return Some(sel);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_main_tag() {
        let doc = dom::parse(
            "<html><body><article><p>article text</p></article><main><p>main text</p></main></body></html>",
        );
        let located = locate_main_content(&doc, &Options::default());
        assert_eq!(dom::tag_name(&located), Some("main".to_string()));
    }

    #[test]
    fn falls_back_to_role_main() {
        let doc = dom::parse(
            r#"<html><body><div role="main"><p>role main text</p></div></body></html>"#,
        );
        let located = locate_main_content(&doc, &Options::default());
        assert!(dom::text_content(&located).contains("role main text"));
    }

    #[test]
    fn picks_first_article_in_document_order() {
        let doc = dom::parse(
            "<html><body><article><p>first</p></article><article><p>second</p></article></body></html>",
        );
        let located = locate_main_content(&doc, &Options::default());
        let text = dom::text_content(&located);
        assert!(text.contains("first"));
        assert!(!text.contains("second"));
    }

    #[test]
    fn content_classed_div_requires_enough_text() {
        let long_text = "word ".repeat(60);
        let html = format!(
            r#"<html><body>
                <div class="content">short</div>
                <div class="main-content"><p>{long_text}</p></div>
            </body></html>"#
        );
        let doc = dom::parse(&html);
        let located = locate_main_content(&doc, &Options::default());
        assert_eq!(dom::class_name(&located), Some("main-content".to_string()));
    }

    #[test]
    fn falls_back_to_body() {
        let doc = dom::parse("<html><body><p>loose text</p></body></html>");
        let located = locate_main_content(&doc, &Options::default());
        assert_eq!(dom::tag_name(&located), Some("body".to_string()));
    }
}
