//! Stage 5a: thread header and footer removal.
//!
//! Runs on the cleanable pool only. Shielded paragraphs have already been set
//! aside, so adjacency here is adjacency among cleanable paragraphs.

use crate::error::Result;
use crate::model::{non_empty_lines, Paragraph, ParagraphTag};
use crate::options::CleanerOptions;
use crate::patterns::{
    compile_set, FOOTER_PATTERNS, HEADER_LINE_PATTERNS, RE_METADATA_LINE, THREAD_START_PATTERNS,
};
use regex::Regex;
use tracing::debug;

/// Paragraphs kept and dropped by [`HeaderFooterCleaner::clean`].
#[derive(Debug, Clone, Default)]
pub struct HeaderFooterOutcome {
    pub kept: Vec<Paragraph>,
    /// Tagged `RemovedHeader` or `RemovedFooter`
    pub removed: Vec<Paragraph>,
}

impl HeaderFooterOutcome {
    pub fn headers_removed(&self) -> usize {
        self.count(ParagraphTag::RemovedHeader)
    }

    pub fn footers_removed(&self) -> usize {
        self.count(ParagraphTag::RemovedFooter)
    }

    fn count(&self, tag: ParagraphTag) -> usize {
        self.removed.iter().filter(|p| p.tag == tag).count()
    }
}

/// Header and footer detector.
#[derive(Debug, Clone)]
pub struct HeaderFooterCleaner {
    thread_markers: Vec<Regex>,
    header_lines: Vec<Regex>,
    footers: Vec<Regex>,
    header_line_ratio: f64,
    short_header_max_lines: usize,
    preview_chars: usize,
}

impl HeaderFooterCleaner {
    pub fn new(options: &CleanerOptions) -> Result<Self> {
        Ok(Self {
            thread_markers: compile_set(
                "thread start markers",
                "",
                THREAD_START_PATTERNS.iter().copied(),
            )?,
            header_lines: compile_set("header lines", "", HEADER_LINE_PATTERNS.iter().copied())?,
            footers: compile_set("footer patterns", "", FOOTER_PATTERNS.iter().copied())?,
            header_line_ratio: options.header_line_ratio,
            short_header_max_lines: options.short_header_max_lines,
            preview_chars: options.preview_chars,
        })
    }

    /// Drop headers, then footers, from the cleanable pool. Order is kept.
    pub fn clean(&self, pool: Vec<Paragraph>) -> HeaderFooterOutcome {
        let mut outcome = HeaderFooterOutcome::default();

        for paragraph in pool {
            if let Some(reason) = self.header_reason(&paragraph.content) {
                debug!(
                    ordinal = paragraph.ordinal,
                    preview = %paragraph.preview(self.preview_chars),
                    "removed header"
                );
                outcome
                    .removed
                    .push(paragraph.tagged(ParagraphTag::RemovedHeader, reason));
            } else if let Some(reason) = self.footer_reason(&paragraph.content) {
                debug!(
                    ordinal = paragraph.ordinal,
                    preview = %paragraph.preview(self.preview_chars),
                    "removed footer"
                );
                outcome
                    .removed
                    .push(paragraph.tagged(ParagraphTag::RemovedFooter, reason));
            } else {
                outcome.kept.push(paragraph);
            }
        }

        outcome
    }

    /// Returns why the paragraph is a thread header, if it is one.
    pub fn header_reason(&self, content: &str) -> Option<String> {
        let lines: Vec<&str> = non_empty_lines(content).collect();
        if lines.is_empty() {
            return None;
        }

        if let Some(marker) = self.thread_markers.iter().find(|re| re.is_match(content)) {
            return Some(format!("thread marker {}", marker.as_str()));
        }

        let header_lines = lines.iter().filter(|l| self.is_header_line(l)).count();

        if lines.len() == 1 {
            return (header_lines == 1).then(|| "single header line".to_string());
        }

        let ratio = header_lines as f64 / lines.len() as f64;
        if ratio >= self.header_line_ratio {
            return Some(format!("{header_lines}/{} header lines", lines.len()));
        }

        let has_metadata = lines.iter().any(|l| RE_METADATA_LINE.is_match(l));
        (has_metadata && lines.len() < self.short_header_max_lines)
            .then(|| "short block with metadata line".to_string())
    }

    /// Returns the footer pattern the paragraph matches, if any.
    pub fn footer_reason(&self, content: &str) -> Option<String> {
        self.footers
            .iter()
            .find(|re| re.is_match(content))
            .map(|re| format!("footer pattern {}", re.as_str()))
    }

    fn is_header_line(&self, line: &str) -> bool {
        self.header_lines.iter().any(|re| re.is_match(line))
    }
}
