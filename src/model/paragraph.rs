//! Paragraph and classification tag definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision attached to a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParagraphTag {
    /// Tabular content, never cleaned
    Table,
    /// Contains business keywords or identifiers, never cleaned
    Protected,
    /// Eligible for noise removal and kept
    Cleanable,
    /// Dropped by the header/footer cleaner as a thread header
    RemovedHeader,
    /// Dropped by the header/footer cleaner as footer noise
    RemovedFooter,
    /// Dropped by the disclaimer cleaner
    RemovedDisclaimer,
}

impl ParagraphTag {
    /// Returns true if the paragraph is part of the cleaned output.
    pub fn is_retained(self) -> bool {
        matches!(self, Self::Table | Self::Protected | Self::Cleanable)
    }

    /// Returns true if no cleaner may touch the paragraph.
    pub fn is_shielded(self) -> bool {
        matches!(self, Self::Table | Self::Protected)
    }
}

impl fmt::Display for ParagraphTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "Table",
            Self::Protected => "Protected",
            Self::Cleanable => "Cleanable",
            Self::RemovedHeader => "RemovedHeader",
            Self::RemovedFooter => "RemovedFooter",
            Self::RemovedDisclaimer => "RemovedDisclaimer",
        };
        f.write_str(name)
    }
}

/// A blank-line delimited span of the preprocessed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Position in the segmented input; stable across the pipeline
    pub ordinal: usize,
    /// Trimmed text content
    pub content: String,
    /// Current decision
    pub tag: ParagraphTag,
    /// Why the decision was made (for audit)
    pub reason: Option<String>,
}

impl Paragraph {
    /// Creates an untagged (cleanable) paragraph.
    pub fn new(ordinal: usize, content: impl Into<String>) -> Self {
        Self {
            ordinal,
            content: content.into(),
            tag: ParagraphTag::Cleanable,
            reason: None,
        }
    }

    /// Sets the tag and reason.
    pub fn tagged(mut self, tag: ParagraphTag, reason: impl Into<String>) -> Self {
        self.tag = tag;
        self.reason = Some(reason.into());
        self
    }

    /// Non-empty, trimmed lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        non_empty_lines(&self.content)
    }

    /// Returns the first `max_chars` characters, with an ellipsis if cut.
    pub fn preview(&self, max_chars: usize) -> String {
        preview(&self.content, max_chars)
    }
}

/// Non-empty, trimmed lines of `text`.
pub(crate) fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Truncates to `max_chars` characters on a char boundary.
pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
