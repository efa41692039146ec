//! Stage 3: paragraph segmentation.

use crate::model::Paragraph;
use regex::Regex;
use std::sync::LazyLock;

static RE_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Split text on blank lines into trimmed, non-empty paragraphs.
///
/// Ordinals are assigned in order of appearance, starting at zero.
pub fn segment_paragraphs(text: &str) -> Vec<Paragraph> {
    RE_BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .enumerate()
        .map(|(ordinal, chunk)| Paragraph::new(ordinal, chunk))
        .collect()
}
