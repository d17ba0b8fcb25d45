//! Batch processing across documents.
//!
//! One failing document never aborts the batch: acquisition and
//! validation failures are captured as [`DocumentOutcome::Skipped`]
//! reports and the run moves on. Documents share no mutable state, so
//! the parallel runner is a drop-in for the sequential one; both return
//! reports in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::images::ImageLocator;
use crate::model::{Document, Topic};
use crate::segment::{segment_with, SegmentOptions};
use crate::slug::slugify;

/// What became of one document in a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DocumentOutcome {
    /// Segmentation ran; an empty list means nothing survived the
    /// minimum-length filter, which is not an error.
    Segmented { topics: Vec<Topic> },

    /// The document never reached segmentation.
    Skipped { reason: String },
}

/// Per-document result of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    /// Display name the document was processed under
    pub name: String,

    /// Outcome for this document
    pub outcome: DocumentOutcome,
}

impl DocumentReport {
    /// Check if segmentation ran for this document.
    pub fn is_segmented(&self) -> bool {
        matches!(self.outcome, DocumentOutcome::Segmented { .. })
    }

    /// Topics produced, if segmentation ran.
    pub fn topics(&self) -> Option<&[Topic]> {
        match &self.outcome {
            DocumentOutcome::Segmented { topics } => Some(topics),
            DocumentOutcome::Skipped { .. } => None,
        }
    }

    /// Skip reason, if the document was skipped.
    pub fn skip_reason(&self) -> Option<&str> {
        match &self.outcome {
            DocumentOutcome::Segmented { .. } => None,
            DocumentOutcome::Skipped { reason } => Some(reason),
        }
    }

    /// Number of topics produced, zero when skipped.
    pub fn topic_count(&self) -> usize {
        self.topics().map_or(0, <[Topic]>::len)
    }
}

/// Run the full pipeline for one acquired document.
///
/// An acquisition error or a validation failure turns into a skip
/// report; a well-formed document is segmented with image refs from the
/// locator.
pub fn process_document<L: ImageLocator>(
    name: &str,
    acquired: Result<Document>,
    locator: &L,
    options: &SegmentOptions,
) -> DocumentReport {
    let document = match acquired.and_then(|doc| doc.validate().map(|_| doc)) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Skipping {}: {}", name, e);
            return DocumentReport {
                name: name.to_string(),
                outcome: DocumentOutcome::Skipped {
                    reason: e.to_string(),
                },
            };
        }
    };

    let prefix = slugify(name);
    let images = locator.locate(&document, &prefix);
    let topics = segment_with(&document, name, &images, options);
    log::debug!("{}: {} topics", name, topics.len());

    DocumentReport {
        name: name.to_string(),
        outcome: DocumentOutcome::Segmented { topics },
    }
}

/// Process documents one after another, reports in input order.
pub fn run_batch<L: ImageLocator>(
    inputs: Vec<(String, Result<Document>)>,
    locator: &L,
    options: &SegmentOptions,
) -> Vec<DocumentReport> {
    inputs
        .into_iter()
        .map(|(name, acquired)| process_document(&name, acquired, locator, options))
        .collect()
}

/// Process documents across the rayon pool, reports in input order.
pub fn run_batch_parallel<L: ImageLocator + Sync>(
    inputs: Vec<(String, Result<Document>)>,
    locator: &L,
    options: &SegmentOptions,
) -> Vec<DocumentReport> {
    inputs
        .into_par_iter()
        .map(|(name, acquired)| process_document(&name, acquired, locator, options))
        .collect()
}
