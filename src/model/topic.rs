//! The emitted topic record.

use serde::{Deserialize, Serialize};

/// One inferred section of a document, carrying markdown content.
///
/// Topics are created at level-1 heading boundaries (or implicitly at
/// document start), filled while body and sub-heading lines are scanned,
/// and immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Section title, pagination artifacts stripped
    pub title: String,

    /// URL-safe identifier derived from the document prefix and title
    pub slug: String,

    /// Human-readable provenance line
    pub description: String,

    /// Document slug plus any caller-supplied labels
    pub tags: Vec<String>,

    /// Markdown content
    pub content: String,

    /// Optional creation stamp, caller-defined format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Topic {
    /// Trimmed content length in characters. This is the measure used by
    /// the minimum-viability filter.
    pub fn content_chars(&self) -> usize {
        self.content.trim().chars().count()
    }
}
