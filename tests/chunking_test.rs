//! End-to-end chunking tests over realistic page markup.

use sitechunk::{chunk, chunk_bytes, chunk_with_options, ChunkType, Error, Options};

const PRODUCT_PAGE: &str = r#"<html>
<head>
    <title>Argan Oil Shampoo</title>
    <meta charset="utf-8">
</head>
<body>
    <header class="site-header"><h1>HairCare Store</h1></header>
    <nav><ul><li>Home</li><li>Products</li><li>About</li></ul></nav>
    <div class="cookie-banner">We use cookies to improve your experience.</div>
    <main>
        <div class="product-description">
            <h1>Argan Oil Shampoo</h1>
            <p>Our argan oil shampoo restores moisture to dry and damaged hair
               while protecting color-treated strands from fading.</p>
            <section>
                <h2>Care Tips</h2>
                <p>Apply a small amount to wet hair and massage gently into the
                   scalp before rinsing with lukewarm water.</p>
                <ul>
                    <li>Avoid very hot water because it strips natural oils from hair.</li>
                    <li>Repeat twice weekly for persistently dry or brittle hair.</li>
                </ul>
            </section>
        </div>
    </main>
    <aside class="related">You may also like these other products.</aside>
    <footer><p>Copyright 2026 HairCare Store. All rights reserved.</p></footer>
</body>
</html>"#;

#[test]
fn product_page_yields_only_main_content() {
    let result = chunk(PRODUCT_PAGE);

    assert!(!result.chunks.is_empty());
    let all_text: String = result
        .chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    assert!(all_text.contains("restores moisture"));
    assert!(all_text.contains("lukewarm water"));
    assert!(!all_text.contains("cookies"));
    assert!(!all_text.contains("Copyright"));
    assert!(!all_text.contains("You may also like"));
}

#[test]
fn section_paragraphs_carry_their_heading() {
    let options = Options {
        merge_small_chunks: false,
        ..Options::default()
    };
    let result = chunk_with_options(PRODUCT_PAGE, &options);

    let Some(tips) = result
        .chunks
        .iter()
        .find(|c| c.text.contains("massage gently"))
    else {
        panic!("expected the care-tips paragraph to be emitted");
    };
    assert_eq!(tips.heading.as_deref(), Some("Care Tips"));
    assert_eq!(tips.chunk_type, ChunkType::Paragraph);
}

#[test]
fn list_items_are_separate_chunks_in_document_order() {
    let options = Options {
        merge_small_chunks: false,
        ..Options::default()
    };
    let result = chunk_with_options(PRODUCT_PAGE, &options);

    let items: Vec<&str> = result
        .chunks
        .iter()
        .filter(|c| c.chunk_type == ChunkType::ListItem)
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(items.len(), 2);
    assert!(items[0].starts_with("Avoid very hot water"));
    assert!(items[1].starts_with("Repeat twice weekly"));
}

#[test]
fn ids_are_dense_from_zero_after_merging() {
    let result = chunk(PRODUCT_PAGE);
    for (i, c) in result.chunks.iter().enumerate() {
        assert_eq!(c.id, i);
    }
}

#[test]
fn emitted_text_is_whitespace_normalized() {
    let result = chunk(PRODUCT_PAGE);
    for c in &result.chunks {
        assert_eq!(c.text, c.text.trim());
        // Merged chunks join their pieces with a blank line; within a piece
        // every whitespace run is a single space.
        for piece in c.text.split("\n\n") {
            assert!(
                !piece.contains("  ") && !piece.contains('\t') && !piece.contains('\n'),
                "chunk {} has an unnormalized whitespace run: {piece:?}",
                c.id
            );
        }
    }
}

#[test]
fn no_chunk_text_contains_another() {
    let options = Options {
        merge_small_chunks: false,
        ..Options::default()
    };
    let result = chunk_with_options(PRODUCT_PAGE, &options);

    for a in &result.chunks {
        for b in &result.chunks {
            if a.id != b.id {
                assert!(
                    !a.text.contains(&b.text),
                    "chunk {} contains chunk {}",
                    a.id,
                    b.id
                );
            }
        }
    }
}

#[test]
fn repeated_description_is_emitted_once() {
    let para = "<p>This product description repeats verbatim in mobile and desktop markup.</p>";
    let html = format!(
        r#"<html><body>
            <div class="desktop-view"><main>{para}</main></div>
            <div class="mobile-view">{para}</div>
        </body></html>"#
    );
    let result = chunk(&html);

    let repeats = result
        .chunks
        .iter()
        .filter(|c| c.text.contains("repeats verbatim"))
        .count();
    assert_eq!(repeats, 1);
}

#[test]
fn fuller_version_supersedes_truncated_preview() {
    let options = Options {
        merge_small_chunks: false,
        ..Options::default()
    };
    let html = r#"<html><body><main>
        <p>Apply to wet hair and massage into the scalp.</p>
        <p>Apply to wet hair and massage into the scalp. Rinse with lukewarm water and repeat if needed.</p>
    </main></body></html>"#;
    let result = chunk_with_options(html, &options);

    assert_eq!(result.chunks.len(), 1);
    assert!(result.chunks[0].text.ends_with("repeat if needed."));
    assert_eq!(result.chunks[0].id, 0);
}

#[test]
fn short_duplicates_collapse_to_the_superset_sentence() {
    let html = "<nav>Home</nav><main><h2>Care Tips</h2>\
        <p>Wash your hair gently.</p>\
        <p>Wash your hair gently.</p>\
        <p>Wash your hair gently every day for best results.</p></main>";
    let result = chunk(html);

    assert_eq!(result.chunks.len(), 1);
    assert_eq!(result.chunks[0].heading.as_deref(), Some("Care Tips"));
    assert_eq!(
        result.chunks[0].text,
        "Wash your hair gently every day for best results."
    );
}

#[test]
fn merging_never_drops_or_adds_words() {
    let unmerged = chunk_with_options(
        PRODUCT_PAGE,
        &Options {
            merge_small_chunks: false,
            ..Options::default()
        },
    );
    let merged = chunk(PRODUCT_PAGE);

    let words = |chunks: &[sitechunk::Chunk]| {
        let mut words: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.text.split_whitespace().map(str::to_string))
            .collect();
        words.sort();
        words
    };
    assert_eq!(words(&unmerged.chunks), words(&merged.chunks));
}

#[test]
fn empty_document_warns_instead_of_failing() {
    let result = chunk("<html><body><nav><ul><li>Only navigation here</li></ul></nav></body></html>");
    assert!(result.chunks.is_empty());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("no extractable content")));
}

#[test]
fn small_chunks_merge_to_word_floor() {
    let html = r#"<html><body><main>
        <p>Short sentence number one here.</p>
        <p>Short sentence number two here.</p>
        <p>Short sentence number three here.</p>
        <p>Short sentence number four here.</p>
    </main></body></html>"#;
    let result = chunk(html);

    assert_eq!(result.chunks.len(), 1);
    assert_eq!(result.chunks[0].chunk_type, ChunkType::Merged);
    assert_eq!(result.chunks[0].word_count, 20);
    assert!(result.chunks[0].text.contains("one here.\n\nShort"));
}

#[test]
fn extra_exclusion_patterns_remove_custom_boilerplate() {
    let html = r#"<html><body><main>
        <div class="promo-ribbon"><p>Limited time offer on everything in the store today.</p></div>
        <p>The actual product description has plenty of words to survive chunking.</p>
    </main></body></html>"#;
    let options = Options {
        extra_exclusion_patterns: vec!["promo".to_string()],
        ..Options::default()
    };
    let result = chunk_with_options(html, &options);

    assert_eq!(result.chunks.len(), 1);
    assert!(result.chunks[0].text.starts_with("The actual product"));
}

#[test]
fn declared_legacy_encoding_is_decoded() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><main><p>Le caf\xE9 au lait se pr\xE9pare avec du lait chaud.</p></main></body></html>";
    let result = match chunk_bytes(html, &Options::default()) {
        Ok(r) => r,
        Err(e) => panic!("decode should succeed: {e}"),
    };
    assert!(result.chunks[0].text.contains("café au lait"));
}

#[test]
fn undecodable_bytes_are_a_hard_error() {
    let html = b"<html><body><main><p>Broken \xFF\xFE bytes in an undeclared document.</p></main></body></html>";
    let result = chunk_bytes(html, &Options::default());
    assert!(matches!(result, Err(Error::Decode { .. })));
}
