//! Segmentation options and configuration.

/// Default minimum trimmed content length for an emitted topic.
pub const DEFAULT_MIN_TOPIC_CHARS: usize = 100;

/// Default length at which a line stops qualifying as a heading.
pub const DEFAULT_MAX_HEADING_CHARS: usize = 100;

/// How classification units are formed from a line.
///
/// The two heuristics disagree on lines mixing font sizes: a drop-cap
/// line classifies once by its largest span under [`LineMax`], but splits
/// into a heading unit and a body unit under [`PerSpan`].
///
/// [`LineMax`]: ClassifyStrategy::LineMax
/// [`PerSpan`]: ClassifyStrategy::PerSpan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifyStrategy {
    /// Classify the whole trimmed line once, using the largest span size
    /// in it. Guards against a large leading glyph being diluted by
    /// smaller trailing punctuation.
    #[default]
    LineMax,
    /// Classify every span independently by its own size and trimmed text.
    PerSpan,
}

/// Options for topic segmentation.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Classification unit strategy
    pub strategy: ClassifyStrategy,

    /// Minimum trimmed content length (in chars) for an emitted topic;
    /// shorter topics are dropped as noise (cover pages, orphan headers)
    pub min_topic_chars: usize,

    /// Units at or above this length (in chars) never classify as
    /// headings, regardless of size
    pub max_heading_chars: usize,

    /// `createdAt` stamp copied onto every emitted topic
    pub created_at: Option<String>,

    /// Tags appended after the document slug on every topic
    pub extra_tags: Vec<String>,
}

impl SegmentOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classification strategy.
    pub fn with_strategy(mut self, strategy: ClassifyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Classify each span independently.
    pub fn per_span(mut self) -> Self {
        self.strategy = ClassifyStrategy::PerSpan;
        self
    }

    /// Set the minimum viable topic length in chars.
    pub fn with_min_topic_chars(mut self, chars: usize) -> Self {
        self.min_topic_chars = chars;
        self
    }

    /// Set the maximum heading length in chars.
    pub fn with_max_heading_chars(mut self, chars: usize) -> Self {
        self.max_heading_chars = chars;
        self
    }

    /// Set the `createdAt` stamp for emitted topics.
    pub fn with_created_at(mut self, stamp: impl Into<String>) -> Self {
        self.created_at = Some(stamp.into());
        self
    }

    /// Append a tag to every emitted topic.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.extra_tags.push(tag.into());
        self
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            strategy: ClassifyStrategy::default(),
            min_topic_chars: DEFAULT_MIN_TOPIC_CHARS,
            max_heading_chars: DEFAULT_MAX_HEADING_CHARS,
            created_at: None,
            extra_tags: Vec::new(),
        }
    }
}
