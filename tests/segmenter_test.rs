//! Integration tests for threshold inference and topic segmentation.

use topicize::{segment, segment_with, Document, ImageMap, Page, SegmentOptions, Topicize};

fn page_with_lines(lines: &[(&str, f32)]) -> Page {
    let mut page = Page::new();
    for (text, size) in lines {
        page = page.with_text(*text, *size);
    }
    page
}

#[test]
fn test_uniform_document_yields_one_topic_titled_after_it() {
    let mut page = Page::new();
    for i in 0..20 {
        page = page.with_text(format!("plain body line number {} of the text", i), 10.0);
    }
    let doc = Document::new().with_page(page);

    let topics = segment(&doc, "field notes");
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].title, "field notes");
    assert_eq!(topics[0].slug, "field-notes");
    assert_eq!(topics[0].description, "Notes from field notes");
    assert_eq!(topics[0].tags, vec!["field-notes"]);
    assert_eq!(topics[0].created_at, None);
}

#[test]
fn test_oversize_line_cuts_exactly_one_boundary() {
    let mut page = Page::new();
    for i in 0..100 {
        page = page.with_text(format!("filler line {} with some extra words", i), 10.0);
    }
    page = page.with_text("Section Break", 16.0);
    for i in 0..50 {
        page = page.with_text(format!("tail line {} with more words", i), 10.0);
    }
    let doc = Document::new().with_page(page);

    let topics = segment(&doc, "manual");
    assert_eq!(topics.len(), 2);

    assert_eq!(topics[0].title, "manual");
    assert_eq!(topics[0].slug, "manual");
    assert!(topics[0].content.contains("filler line 99"));
    assert!(!topics[0].content.contains("tail line"));

    assert_eq!(topics[1].title, "Section Break");
    assert_eq!(topics[1].slug, "manual-section-break");
    assert_eq!(topics[1].description, "Module from manual: Section Break");
    assert!(topics[1].content.starts_with("# Section Break\n\n"));
    assert!(topics[1].content.contains("tail line 49"));
    assert!(!topics[1].content.contains("filler line"));
}

#[test]
fn test_topics_preserve_reading_order() {
    let doc = Document::new()
        .with_page(
            page_with_lines(&[("Alpha Section", 18.0)])
                .with_text("alpha body ".repeat(12), 10.0)
                .with_text("alpha tail ".repeat(12), 10.0),
        )
        .with_page(
            page_with_lines(&[("Beta Section", 18.0)])
                .with_text("beta body ".repeat(12), 10.0)
                .with_text("beta tail ".repeat(12), 10.0),
        )
        .with_page(
            page_with_lines(&[("Gamma Section", 18.0)])
                .with_text("gamma body ".repeat(12), 10.0)
                .with_text("gamma tail ".repeat(12), 10.0),
        );

    let topics = segment(&doc, "ordered");
    let titles: Vec<_> = topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha Section", "Beta Section", "Gamma Section"]);

    assert!(topics[0].content.contains("alpha body"));
    assert!(!topics[0].content.contains("beta body"));
    assert!(!topics[0].content.contains("gamma body"));
    assert!(topics[1].content.contains("beta body"));
    assert!(!topics[1].content.contains("gamma body"));
    assert!(topics[2].content.contains("gamma body"));
}

#[test]
fn test_segmentation_is_byte_for_byte_deterministic() {
    let doc = Document::new()
        .with_page(
            page_with_lines(&[("Intro", 18.0), ("Details", 14.0)])
                .with_text("first page body ".repeat(10), 10.0)
                .with_text("more of the body ".repeat(10), 10.0),
        )
        .with_page(
            page_with_lines(&[("Next Part", 18.0)])
                .with_text("second page body ".repeat(10), 10.0)
                .with_text("closing words here ".repeat(10), 10.0),
        );

    let first = serde_json::to_string(&segment(&doc, "stable")).unwrap();
    let second = serde_json::to_string(&segment(&doc, "stable")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_document_of_only_short_headings_yields_nothing() {
    // Two lone lines: with nothing else on the page they are also the
    // modal size, but either way the output dies at the length filter.
    let doc = Document::new().with_page(page_with_lines(&[
        ("Short One", 18.0),
        ("Short Two", 18.0),
    ]));
    assert!(segment(&doc, "stub").is_empty());

    // Same headings backed by a few tiny body lines, so they really do
    // classify as H1 and cut boundaries. Every fragment is still short.
    let doc = Document::new().with_page(page_with_lines(&[
        ("a", 10.0),
        ("b", 10.0),
        ("c", 10.0),
        ("Short One", 18.0),
        ("Short Two", 18.0),
    ]));
    assert!(segment(&doc, "stub").is_empty());
}

#[test]
fn test_repeated_heading_does_not_cut_twice() {
    let doc = Document::new()
        .with_page(
            page_with_lines(&[("Chapter 1", 18.0)]).with_text("alpha content ".repeat(10), 10.0),
        )
        .with_page(Page::new().with_text("beta content ".repeat(10), 10.0))
        .with_page(Page::new().with_text("gamma content ".repeat(10), 10.0))
        .with_page(
            page_with_lines(&[("CHAPTER 1", 18.0)]).with_text("delta content ".repeat(10), 10.0),
        );

    let topics = segment(&doc, "book");
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].title, "Chapter 1");
    assert!(topics[0].content.contains("\n# CHAPTER 1\n"));
    assert!(topics[0].content.contains("delta content"));
}

#[test]
fn test_image_ref_lands_before_its_page_text() {
    let doc = Document::new()
        .with_page(
            page_with_lines(&[("Guide Heading", 18.0)]).with_text("alpha ".repeat(30), 10.0),
        )
        .with_page(Page::new().with_text("middle text here", 10.0))
        .with_page(Page::new().with_text("page two marker", 10.0));

    let mut images = ImageMap::new();
    images.insert(2, vec!["/img/fig.png".to_string()]);

    let topics = segment_with(&doc, "guide", &images, &SegmentOptions::default());
    assert_eq!(topics.len(), 1);

    let content = &topics[0].content;
    let image_pos = content.find("![Image](/img/fig.png)").unwrap();
    let middle_pos = content.find("middle text here").unwrap();
    let marker_pos = content.find("page two marker").unwrap();
    assert!(middle_pos < image_pos);
    assert!(image_pos < marker_pos);
}

#[test]
fn test_builder_options_flow_through() {
    let doc = Document::new().with_page(
        page_with_lines(&[("Setup", 18.0)])
            .with_text("install the thing ".repeat(8), 10.0)
            .with_text("configure the thing ".repeat(8), 10.0),
    );

    let topics = Topicize::new()
        .with_created_at("2026-02-17")
        .with_tag("Premium")
        .segment(&doc, "install guide");

    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].tags, vec!["install-guide", "Premium"]);
    assert_eq!(topics[0].created_at.as_deref(), Some("2026-02-17"));

    let json = serde_json::to_string(&topics[0]).unwrap();
    assert!(json.contains("\"createdAt\":\"2026-02-17\""));
}
