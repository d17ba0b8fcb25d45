//! Heading inference and topic segmentation.
//!
//! This module is the core of the crate: [`fonts`] derives per-document
//! heading thresholds from the font-size population, and [`segmenter`]
//! walks pages in reading order, classifying lines against those
//! thresholds and cutting the stream into [`Topic`] records at level-1
//! boundaries.
//!
//! The thresholds are a heuristic. They assume body text is the most
//! common size on the page and that headings are strictly larger;
//! multi-column layouts, rasterized scans without real font metadata,
//! and documents with erratic typography will produce poor splits.

pub mod fonts;
pub mod options;
pub mod segmenter;

pub use fonts::{FontHistogram, HeadingThresholds, LineClass, DEFAULT_BODY_SIZE};
pub use options::{
    ClassifyStrategy, SegmentOptions, DEFAULT_MAX_HEADING_CHARS, DEFAULT_MIN_TOPIC_CHARS,
};
pub use segmenter::{TopicDraft, TopicSegmenter};

use crate::images::ImageMap;
use crate::model::{Document, Topic};

/// Segment a document into topics with explicit image refs and options.
///
/// Thresholds are derived from the document itself; pages are processed
/// in order with their registered image refs.
pub fn segment_with(
    document: &Document,
    name: &str,
    images: &ImageMap,
    options: &SegmentOptions,
) -> Vec<Topic> {
    let thresholds = HeadingThresholds::from_document(document);
    let mut segmenter = TopicSegmenter::new(name, thresholds, options.clone());
    for (index, page) in document.pages.iter().enumerate() {
        let refs = images.get(&index).map(Vec::as_slice).unwrap_or(&[]);
        segmenter.process_page(page, refs);
    }
    segmenter.finish()
}

/// Segment a document with no images and default options.
pub fn segment(document: &Document, name: &str) -> Vec<Topic> {
    segment_with(document, name, &ImageMap::new(), &SegmentOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    #[test]
    fn test_segment_empty_document() {
        assert!(segment(&Document::new(), "empty").is_empty());
    }

    #[test]
    fn test_segment_is_deterministic() {
        let doc = Document::new()
            .with_page(
                Page::new()
                    .with_text("Introduction", 18.0)
                    .with_text("alpha ".repeat(15), 10.0)
                    .with_text("alpha again ".repeat(10), 10.0),
            )
            .with_page(
                Page::new()
                    .with_text("Usage", 18.0)
                    .with_text("beta ".repeat(15), 10.0)
                    .with_text("beta again ".repeat(10), 10.0),
            );

        let first = segment(&doc, "guide");
        let second = segment(&doc, "guide");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].title, "Introduction");
        assert_eq!(first[1].title, "Usage");
    }
}
