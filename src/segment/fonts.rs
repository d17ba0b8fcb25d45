//! Font-size statistics and heading thresholds.
//!
//! Body text is taken to be the most common rounded span size in a
//! document; heading levels 1-3 are the largest distinct sizes above it.
//! This is a heuristic with known failure modes (multi-column layouts,
//! rasterized pages without real font metadata, documents with
//! inconsistent typography) and is preserved as such.

use std::collections::HashMap;

use crate::model::Document;

/// Body size assumed for a document with no spans.
pub const DEFAULT_BODY_SIZE: f32 = 10.0;

// Fallback deltas over the body size for underived heading levels.
const H1_FALLBACK: f32 = 4.0;
const H2_FALLBACK: f32 = 2.0;
const H3_FALLBACK: f32 = 1.0;

fn round_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

fn key_size(key: i32) -> f32 {
    key as f32 / 10.0
}

/// Frequency histogram over span font sizes, rounded to one decimal.
#[derive(Debug, Clone, Default)]
pub struct FontHistogram {
    counts: HashMap<i32, usize>,
}

impl FontHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from every span of a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut histogram = Self::new();
        for span in doc.spans() {
            histogram.add_size(span.font_size);
        }
        histogram
    }

    /// Record one font size observation.
    pub fn add_size(&mut self, size: f32) {
        *self.counts.entry(round_key(size)).or_insert(0) += 1;
    }

    /// Number of distinct rounded sizes observed.
    pub fn distinct_sizes(&self) -> usize {
        self.counts.len()
    }

    /// Total number of observations.
    pub fn observations(&self) -> usize {
        self.counts.values().sum()
    }

    /// Derive heading thresholds from the observations so far.
    ///
    /// The mode becomes the body size; ties prefer the larger size so the
    /// result does not depend on hash iteration order. Candidate heading
    /// sizes are the distinct sizes strictly greater than the body size,
    /// largest first; missing levels fall back to body + 4/2/1.
    pub fn thresholds(&self) -> HeadingThresholds {
        let body_key = match self.counts.iter().max_by_key(|(key, count)| (**count, **key)) {
            Some((key, _)) => *key,
            None => return HeadingThresholds::default(),
        };

        let mut candidates: Vec<i32> = self
            .counts
            .keys()
            .copied()
            .filter(|key| *key > body_key)
            .collect();
        candidates.sort_unstable_by(|a, b| b.cmp(a));

        let body = key_size(body_key);
        let level = |idx: usize, fallback: f32| {
            candidates.get(idx).map(|k| key_size(*k)).unwrap_or(body + fallback)
        };
        let thresholds = HeadingThresholds {
            body,
            h1: level(0, H1_FALLBACK),
            h2: level(1, H2_FALLBACK),
            h3: level(2, H3_FALLBACK),
        };

        log::debug!(
            "font analysis: body({}) h1({}) h2({}) h3({}) over {} spans",
            thresholds.body,
            thresholds.h1,
            thresholds.h2,
            thresholds.h3,
            self.observations()
        );

        thresholds
    }
}

/// Font-size cutoffs separating body text from heading levels 1-3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingThresholds {
    /// Most common span size (the body text size)
    pub body: f32,
    /// Minimum size classified as a level-1 heading
    pub h1: f32,
    /// Minimum size classified as a level-2 heading
    pub h2: f32,
    /// Minimum size classified as a level-3 heading
    pub h3: f32,
}

impl Default for HeadingThresholds {
    fn default() -> Self {
        Self {
            body: DEFAULT_BODY_SIZE,
            h1: DEFAULT_BODY_SIZE + H1_FALLBACK,
            h2: DEFAULT_BODY_SIZE + H2_FALLBACK,
            h3: DEFAULT_BODY_SIZE + H3_FALLBACK,
        }
    }
}

impl HeadingThresholds {
    /// Analyze a whole document in one step.
    pub fn from_document(doc: &Document) -> Self {
        FontHistogram::from_document(doc).thresholds()
    }

    /// Classify a font size against the thresholds.
    ///
    /// The size is rounded to one decimal, the same rounding the histogram
    /// applies, then compared in H1 > H2 > H3 priority order.
    pub fn classify(&self, size: f32) -> LineClass {
        let size = key_size(round_key(size));
        if size >= self.h1 {
            LineClass::H1
        } else if size >= self.h2 {
            LineClass::H2
        } else if size >= self.h3 {
            LineClass::H3
        } else {
            LineClass::Body
        }
    }
}

/// Heading level assigned to one classification unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Level-1 heading: opens or folds into a topic
    H1,
    /// Level-2 heading
    H2,
    /// Level-3 heading
    H3,
    /// Body text
    Body,
}
