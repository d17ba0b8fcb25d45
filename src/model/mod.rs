//! Model types for paginated documents and emitted topics.
//!
//! The input side (spans, lines, pages, documents) mirrors the contract
//! collaborators hand over after acquisition; the output side is the
//! [`Topic`] record. Both serialize with camelCase wire names.

mod document;
mod topic;

pub use document::{Document, Line, Page, PageImage, Span};
pub use topic::Topic;
