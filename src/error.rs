//! Error types for the topicize library.

use std::io;
use thiserror::Error;

/// Result type alias for topicize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while acquiring documents or persisting output.
///
/// Segmentation itself is total over well-formed input and never returns
/// these; they belong to the acquisition and persistence edges of the
/// pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing or producing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A collaborator failed to supply a document. Fatal for that document
    /// only; batch processing continues with the next one.
    #[error("Document acquisition failed: {0}")]
    Acquisition(String),

    /// The document violates a model precondition (e.g. non-finite font
    /// sizes).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}
