//! The topic segmenter: single-pass heading classification over a document.

use std::collections::HashSet;

use regex::Regex;

use crate::model::{Line, Page, Topic};
use crate::segment::fonts::{HeadingThresholds, LineClass};
use crate::segment::options::{ClassifyStrategy, SegmentOptions};
use crate::slug::slugify;

/// Accumulator for the topic currently being built.
///
/// Drafts are explicit values owned by the segmenter. A heading boundary
/// consumes the current draft through [`TopicDraft::flush`] and installs
/// the replacement it hands back; nothing else mutates a draft once it is
/// flushed.
#[derive(Debug, Clone, Default)]
pub struct TopicDraft {
    title: String,
    slug: String,
    description: String,
    tags: Vec<String>,
    content: String,
    created_at: Option<String>,
}

impl TopicDraft {
    /// The implicit draft opened at document start, titled after the
    /// document itself.
    fn document_root(name: &str, prefix: &str, options: &SegmentOptions) -> Self {
        Self {
            title: name.to_string(),
            slug: prefix.to_string(),
            description: format!("Notes from {}", name),
            tags: Self::base_tags(prefix, options),
            content: String::new(),
            created_at: options.created_at.clone(),
        }
    }

    /// A draft opened at an H1 boundary. Content is seeded with the raw
    /// heading line so the emitted markdown is self-titled.
    fn for_heading(
        title: &str,
        raw_line: &str,
        name: &str,
        prefix: &str,
        options: &SegmentOptions,
    ) -> Self {
        Self {
            title: title.to_string(),
            slug: slugify(&format!("{}-{}", prefix, title)),
            description: format!("Module from {}: {}", name, title),
            tags: Self::base_tags(prefix, options),
            content: format!("# {}\n\n", raw_line),
            created_at: options.created_at.clone(),
        }
    }

    fn base_tags(prefix: &str, options: &SegmentOptions) -> Vec<String> {
        let mut tags = Vec::with_capacity(1 + options.extra_tags.len());
        tags.push(prefix.to_string());
        tags.extend(options.extra_tags.iter().cloned());
        tags
    }

    fn push(&mut self, text: &str) {
        self.content.push_str(text);
    }

    fn title_matches(&self, lowered: &str) -> bool {
        self.title.to_lowercase() == lowered
    }

    /// Finalize this draft and hand back its replacement.
    ///
    /// Yields `Some(Topic)` only when the draft accumulated non-whitespace
    /// content; a draft that never saw content vanishes without a trace.
    pub fn flush(self, next: TopicDraft) -> (Option<Topic>, TopicDraft) {
        let topic = if self.content.trim().is_empty() {
            None
        } else {
            Some(Topic {
                title: self.title,
                slug: self.slug,
                description: self.description,
                tags: self.tags,
                content: self.content,
                created_at: self.created_at,
            })
        };
        (topic, next)
    }
}

/// Single-pass topic segmentation over pages, lines, and spans.
///
/// The segmenter owns the current [`TopicDraft`] plus a case-insensitive
/// set of heading titles that already opened a topic; repeats of those
/// titles are treated as running headers and folded into the current
/// content instead of splitting it. Feed pages in document order with
/// [`process_page`], then call [`finish`].
///
/// [`process_page`]: TopicSegmenter::process_page
/// [`finish`]: TopicSegmenter::finish
#[derive(Debug)]
pub struct TopicSegmenter {
    thresholds: HeadingThresholds,
    options: SegmentOptions,
    name: String,
    prefix: String,
    draft: TopicDraft,
    seen_titles: HashSet<String>,
    topics: Vec<Topic>,
    page_artifact: Regex,
}

impl TopicSegmenter {
    /// Create a segmenter for one document.
    ///
    /// `name` is the document's display name (typically the file stem);
    /// its slug becomes the document prefix used in topic slugs and tags.
    pub fn new(name: &str, thresholds: HeadingThresholds, options: SegmentOptions) -> Self {
        let prefix = slugify(name);
        let draft = TopicDraft::document_root(name, &prefix, &options);
        Self {
            thresholds,
            options,
            name: name.to_string(),
            prefix,
            draft,
            seen_titles: HashSet::new(),
            topics: Vec::new(),
            page_artifact: Regex::new(r"(?i)\s+Page\s+\d+\s*$").unwrap(),
        }
    }

    /// The document prefix (slug of the document name).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Process one page: image refs registered for the page come first,
    /// then its lines in order, then a blank-line separator.
    pub fn process_page(&mut self, page: &Page, images: &[String]) {
        for image in images {
            self.draft.push(&format!("\n![Image]({})\n", image));
        }
        for line in &page.lines {
            self.process_line(line);
        }
        self.draft.push("\n");
    }

    fn process_line(&mut self, line: &Line) {
        let appended = match self.options.strategy {
            ClassifyStrategy::LineMax => {
                let text = line.text();
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    false
                } else {
                    // A non-empty trim implies at least one span exists.
                    let size = line.max_font_size().unwrap_or_default();
                    self.process_unit(trimmed, size);
                    true
                }
            }
            ClassifyStrategy::PerSpan => {
                let mut any = false;
                for span in &line.spans {
                    let trimmed = span.text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    self.process_unit(trimmed, span.font_size);
                    any = true;
                }
                any
            }
        };

        if appended {
            self.draft.push("\n");
        }
    }

    fn process_unit(&mut self, text: &str, size: f32) {
        // Long lines are never headings, whatever their size.
        let class = if text.chars().count() < self.options.max_heading_chars {
            self.thresholds.classify(size)
        } else {
            LineClass::Body
        };

        match class {
            LineClass::H1 => self.heading_boundary(text),
            LineClass::H2 => self.draft.push(&format!("\n## {}\n", text)),
            LineClass::H3 => self.draft.push(&format!("\n### {}\n", text)),
            LineClass::Body => {
                self.draft.push(text);
                self.draft.push(" ");
            }
        }
    }

    /// Handle an H1 unit: either fold a repeated running header into the
    /// current draft or close it and open a new one.
    fn heading_boundary(&mut self, raw: &str) {
        let clean = self.page_artifact.replace(raw, "").trim().to_string();
        let lowered = clean.to_lowercase();

        if self.seen_titles.contains(&lowered) || self.draft.title_matches(&lowered) {
            self.draft.push(&format!("\n# {}\n", raw));
            return;
        }

        let next = TopicDraft::for_heading(&clean, raw, &self.name, &self.prefix, &self.options);
        let (finished, next) = std::mem::take(&mut self.draft).flush(next);
        self.draft = next;
        if let Some(topic) = finished {
            self.topics.push(topic);
        }
        self.seen_titles.insert(lowered);
    }

    /// Flush the last draft and apply the minimum-viability filter.
    pub fn finish(mut self) -> Vec<Topic> {
        let (finished, _) = std::mem::take(&mut self.draft).flush(TopicDraft::default());
        if let Some(topic) = finished {
            self.topics.push(topic);
        }

        let min = self.options.min_topic_chars;
        self.topics.retain(|t| t.content_chars() >= min);
        self.topics
    }
}
