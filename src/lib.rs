//! # topicize
//!
//! Topic segmentation for paginated documents, driven by font metadata.
//!
//! This library reconstructs document structure (headings, body text,
//! inline images) from the font sizes attached to text spans, and cuts
//! the document into topic-scoped markdown records at level-1 heading
//! boundaries.
//!
//! ## Quick Start
//!
//! ```
//! use topicize::{segment, Document, Page};
//!
//! let doc = Document::new().with_page(
//!     Page::new()
//!         .with_text("Getting Started", 18.0)
//!         .with_text("Body text long enough to keep around. ".repeat(4), 10.0)
//!         .with_text("More body text follows on the page. ".repeat(4), 10.0),
//! );
//!
//! let topics = segment(&doc, "handbook");
//! assert_eq!(topics.len(), 1);
//! assert_eq!(topics[0].title, "Getting Started");
//! assert_eq!(topics[0].slug, "handbook-getting-started");
//! ```
//!
//! ## Features
//!
//! - **Threshold inference**: body/heading font sizes derived per document
//! - **Single-pass segmentation**: topics cut at H1 boundaries, in reading order
//! - **Running-header suppression**: repeated headings never fragment a topic
//! - **Image interleaving**: per-page image refs placed before page text
//! - **Batch isolation**: one bad document never aborts a batch
//! - **Parallel batches**: uses Rayon across documents, never within one

pub mod batch;
pub mod error;
pub mod images;
pub mod model;
pub mod segment;
pub mod slug;

// Re-export commonly used types
pub use batch::{
    process_document, run_batch, run_batch_parallel, DocumentOutcome, DocumentReport,
};
pub use error::{Error, Result};
pub use images::{FixedImages, ImageExporter, ImageLocator, ImageMap, NoImages};
pub use model::{Document, Line, Page, PageImage, Span, Topic};
pub use segment::{
    segment, segment_with, ClassifyStrategy, FontHistogram, HeadingThresholds, LineClass,
    SegmentOptions, TopicSegmenter,
};
pub use slug::slugify;

/// Derive heading thresholds for a document.
///
/// # Example
///
/// ```
/// use topicize::{analyze, Document, Page};
///
/// let doc = Document::new().with_page(
///     Page::new()
///         .with_text("Title", 20.0)
///         .with_text("body", 10.0)
///         .with_text("body", 10.0),
/// );
///
/// let thresholds = analyze(&doc);
/// assert_eq!(thresholds.body, 10.0);
/// assert_eq!(thresholds.h1, 20.0);
/// ```
pub fn analyze(document: &Document) -> HeadingThresholds {
    HeadingThresholds::from_document(document)
}

/// Builder for configuring and running segmentation.
///
/// # Example
///
/// ```
/// use topicize::{Document, Page, Topicize};
///
/// let doc = Document::new().with_page(
///     Page::new()
///         .with_text("Intro", 18.0)
///         .with_text("line one", 10.0)
///         .with_text("line two", 10.0),
/// );
///
/// let topics = Topicize::new()
///     .with_min_topic_chars(1)
///     .with_tag("Handbook")
///     .segment(&doc, "guide");
/// assert_eq!(topics[0].tags, vec!["guide", "Handbook"]);
/// ```
pub struct Topicize {
    options: SegmentOptions,
    locator: Box<dyn ImageLocator + Sync>,
    parallel: bool,
}

impl Topicize {
    /// Create a new builder with default options and no image locator.
    pub fn new() -> Self {
        Self {
            options: SegmentOptions::default(),
            locator: Box::new(NoImages),
            parallel: false,
        }
    }

    /// Set the line classification strategy.
    pub fn with_strategy(mut self, strategy: ClassifyStrategy) -> Self {
        self.options = self.options.with_strategy(strategy);
        self
    }

    /// Classify each span independently instead of whole lines.
    pub fn per_span(mut self) -> Self {
        self.options = self.options.per_span();
        self
    }

    /// Set the minimum trimmed content length a topic must reach.
    pub fn with_min_topic_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_min_topic_chars(chars);
        self
    }

    /// Set the maximum length a line may have and still head a section.
    pub fn with_max_heading_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_max_heading_chars(chars);
        self
    }

    /// Stamp emitted topics with a creation date string.
    pub fn with_created_at(mut self, stamp: impl Into<String>) -> Self {
        self.options = self.options.with_created_at(stamp);
        self
    }

    /// Add a tag appended after the document-prefix tag on every topic.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.options = self.options.with_tag(tag);
        self
    }

    /// Supply the image locator consulted before segmentation.
    pub fn with_locator(mut self, locator: impl ImageLocator + Sync + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    /// Fan batch documents across the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The segmentation options accumulated so far.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Segment a document, with image refs from the configured locator.
    pub fn segment(&self, document: &Document, name: &str) -> Vec<Topic> {
        let images = self.locator.locate(document, &slugify(name));
        segment_with(document, name, &images, &self.options)
    }

    /// Run the full pipeline for one acquired document.
    pub fn process(&self, name: &str, acquired: Result<Document>) -> DocumentReport {
        process_document(name, acquired, &self.locator, &self.options)
    }

    /// Process a batch of acquired documents, reports in input order.
    ///
    /// Documents run one after another unless
    /// [`with_parallel`](Self::with_parallel) was set.
    pub fn run_batch(&self, inputs: Vec<(String, Result<Document>)>) -> Vec<DocumentReport> {
        if self.parallel {
            run_batch_parallel(inputs, &self.locator, &self.options)
        } else {
            run_batch(inputs, &self.locator, &self.options)
        }
    }
}

impl Default for Topicize {
    fn default() -> Self {
        Self::new()
    }
}
