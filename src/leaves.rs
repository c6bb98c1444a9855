//! Leaf Extractor.
//!
//! Walks the located content subtree and produces an ordered sequence of
//! candidate text units (paragraph-like, list-item-like, heading-like nodes),
//! tagging each with its nearest enclosing section heading.

use dom_query::NodeId;

use crate::dedup::normalize_text;
use crate::dom::{self, Selection};
use crate::patterns::{HEADING_SELECTOR, SECTIONING_TAGS, UNIT_TAGS};

/// A candidate text unit prior to deduplication.
#[derive(Debug, Clone)]
pub struct RawUnit {
    /// Originating tag name (lowercase).
    pub tag: String,
    /// Concatenated descendant text, trimmed of outer whitespace only.
    pub text: String,
    /// Text of the first heading inside the nearest sectioning ancestor.
    pub nearest_heading: Option<String>,
    /// Class tokens of the originating element.
    pub classes: Vec<String>,
    /// Id attribute of the originating element.
    pub id: Option<String>,
}

/// Extract candidate units from the located subtree, in document order.
///
/// Each physical node is visited exactly once: a candidate nested inside an
/// already-extracted candidate is not independently re-extracted, which
/// prevents parent/child double counting (a `p` inside an extracted `li`,
/// for example).
#[must_use]
pub fn extract_units(root: &Selection) -> Vec<RawUnit> {
    let mut units = Vec::new();
    let Some(root_node) = root.nodes().first() else {
        return units;
    };

    // Node ids of candidates already turned into units. Membership is an
    // index check within this parse, not pointer identity.
    let mut extracted: Vec<NodeId> = Vec::new();

    for node in root_node.descendants() {
        if !node.is_element() {
            continue;
        }
        let Some(tag) = node.node_name() else {
            continue;
        };
        if !dom::tag_matches(&tag, UNIT_TAGS) {
            continue;
        }

        // Skip candidates nested inside a previously extracted candidate.
        let mut nested = false;
        for anc in node.ancestors(None) {
            if extracted.contains(&anc.id) {
                nested = true;
                break;
            }
            if anc.id == root_node.id {
                break;
            }
        }
        if nested {
            continue;
        }
        extracted.push(node.id);

        let sel = Selection::from(node);
        let text = dom::text_content(&sel).trim().to_string();

        units.push(RawUnit {
            tag: tag.to_lowercase(),
            text,
            nearest_heading: nearest_heading(&sel),
            classes: dom::class_tokens(&sel),
            id: dom::id(&sel),
        });
    }

    units
}

/// Find the nearest enclosing section heading for a candidate node.
///
/// Walks up to the nearest sectioning container (section/article/div/main/
/// body) and, within it, takes the text of the first heading-level descendant
/// in document order. Absent if the container holds no heading.
fn nearest_heading(sel: &Selection) -> Option<String> {
    let node = sel.nodes().first()?;

    for anc in node.ancestors(None) {
        if !anc.is_element() {
            continue;
        }
        let Some(tag) = anc.node_name() else {
            continue;
        };
        if !dom::tag_matches(&tag, SECTIONING_TAGS) {
            continue;
        }

        let container = Selection::from(anc);
        let heading = container
            .select(HEADING_SELECTOR)
            .nodes()
            .first()
            .copied()
            .map(Selection::from)?;
        let text = normalize_text(&dom::text_content(&heading));
        if text.is_empty() {
            return None;
        }
        return Some(text);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn units_for(html: &str) -> Vec<RawUnit> {
        let doc = parse(html);
        let body = doc.select("body");
        extract_units(&body)
    }

    #[test]
    fn extracts_candidates_in_document_order() {
        let units = units_for(
            "<html><body><h2>Title</h2><p>First paragraph.</p><ul><li>An item</li></ul><blockquote>A quote</blockquote></body></html>",
        );
        let tags: Vec<&str> = units.iter().map(|u| u.tag.as_str()).collect();
        assert_eq!(tags, vec!["h2", "p", "li", "blockquote"]);
        assert_eq!(units[1].text, "First paragraph.");
    }

    #[test]
    fn nested_candidate_is_not_re_extracted() {
        let units = units_for(
            "<html><body><ul><li>Outer item <p>inner paragraph</p></li></ul></body></html>",
        );
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].tag, "li");
        assert!(units[0].text.contains("inner paragraph"));
    }

    #[test]
    fn nearest_heading_comes_from_enclosing_container() {
        let units = units_for(
            "<html><body><section><h2>Care Tips</h2><p>Wash your hair gently.</p></section></body></html>",
        );
        let Some(p_unit) = units.iter().find(|u| u.tag == "p") else {
            panic!("expected a paragraph unit");
        };
        assert_eq!(p_unit.nearest_heading.as_deref(), Some("Care Tips"));
    }

    #[test]
    fn heading_is_absent_when_container_has_none() {
        let units = units_for(
            "<html><body><div><p>Paragraph with no heading anywhere near.</p></div></body></html>",
        );
        assert_eq!(units[0].nearest_heading, None);
    }

    #[test]
    fn text_is_trimmed_but_not_collapsed() {
        let units = units_for("<html><body><p>  spaced   out text  </p></body></html>");
        assert_eq!(units[0].text, "spaced   out text");
    }

    #[test]
    fn source_metadata_is_carried() {
        let units = units_for(
            r#"<html><body><p class="lede intro" id="first">Opening paragraph text.</p></body></html>"#,
        );
        assert_eq!(units[0].classes, vec!["lede".to_string(), "intro".to_string()]);
        assert_eq!(units[0].id.as_deref(), Some("first"));
    }
}
