//! Stage 4: paragraph classification.
//!
//! A single pure mapping from paragraph text to [`Classification`]. Tables are
//! tested before keywords so a table row carrying "Invoice" as a column
//! header is shielded as a table and counted once.

use crate::error::Result;
use crate::model::non_empty_lines;
use crate::options::CleanerOptions;
use crate::patterns::{compile_set, BUSINESS_IDENTIFIERS, PROTECTED_KEYWORDS, RE_EMAIL};
use regex::Regex;
use std::sync::LazyLock;

/// Two word runs separated by a wide gap, as in whitespace-aligned columns.
static RE_ALIGNED_COLUMNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w{2,}\s{3,}\w{2,}").unwrap());

/// How a table was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Markdown-style pipe rows
    Pipe,
    /// Whitespace or tab aligned columns
    Aligned,
}

/// Outcome of classifying one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Table(TableKind),
    /// Carries the source of the first pattern that matched
    Protected(String),
    Cleanable,
}

impl Classification {
    /// Human-readable reason for the audit log.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Table(TableKind::Pipe) => Some("pipe table".to_string()),
            Self::Table(TableKind::Aligned) => Some("aligned columns".to_string()),
            Self::Protected(pattern) => Some(format!("protected pattern {pattern}")),
            Self::Cleanable => None,
        }
    }
}

/// Table / Protected / Cleanable classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: Vec<Regex>,
    identifiers: Vec<Regex>,
    alignment_ratio: f64,
}

impl Classifier {
    /// Compiles the protected keyword set, including user additions.
    pub fn new(options: &CleanerOptions) -> Result<Self> {
        let keyword_sources = PROTECTED_KEYWORDS
            .iter()
            .copied()
            .chain(options.extra_protected_patterns.iter().map(String::as_str));

        Ok(Self {
            keywords: compile_set("protected keywords", "(?i)", keyword_sources)?,
            identifiers: compile_set(
                "business identifiers",
                "",
                BUSINESS_IDENTIFIERS.iter().copied(),
            )?,
            alignment_ratio: options.table_alignment_ratio,
        })
    }

    /// Classify one paragraph.
    pub fn classify(&self, content: &str) -> Classification {
        if let Some(kind) = self.table_kind(content) {
            return Classification::Table(kind);
        }

        match self.protected_match(content) {
            Some(pattern) => Classification::Protected(pattern),
            None => Classification::Cleanable,
        }
    }

    /// Detect pipe tables and column-aligned tables.
    pub fn table_kind(&self, content: &str) -> Option<TableKind> {
        let lines: Vec<&str> = non_empty_lines(content).collect();
        if lines.is_empty() {
            return None;
        }

        let pipe_lines = lines
            .iter()
            .filter(|line| line.matches('|').count() >= 2)
            .count();
        if pipe_lines >= 2 {
            return Some(TableKind::Pipe);
        }

        let aligned_lines = lines
            .iter()
            .filter(|line| RE_ALIGNED_COLUMNS.is_match(line) || line.contains('\t'))
            .count();
        let ratio = aligned_lines as f64 / lines.len() as f64;
        (lines.len() > 1 && ratio >= self.alignment_ratio).then_some(TableKind::Aligned)
    }

    /// Source of the first protected pattern matching the paragraph once
    /// email addresses are stripped out.
    pub fn protected_match(&self, content: &str) -> Option<String> {
        let without_emails = RE_EMAIL.replace_all(content, "");

        self.keywords
            .iter()
            .chain(self.identifiers.iter())
            .find(|re| re.is_match(&without_emails))
            .map(|re| re.as_str().trim_start_matches("(?i)").to_string())
    }
}
