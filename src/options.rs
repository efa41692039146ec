//! Cleaner configuration.
//!
//! Every threshold the pipeline uses lives here as an explicit value. The
//! defaults reproduce the tuned figures; nothing is learned from data.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerOptions {
    /// Fraction of lines (exclusive lower bound is 0) that must show column
    /// alignment for a paragraph to count as a whitespace table.
    pub table_alignment_ratio: f64,

    /// Minimum number of distinct legal keywords for a paragraph to count
    /// as a disclaimer.
    pub disclaimer_density_threshold: usize,

    /// Upper bound on disclaimer-block removals per document.
    ///
    /// Repeated disclaimers in quoted history are removed up to this many
    /// times; any further occurrences stay in the text for manual review.
    pub max_disclaimer_iterations: usize,

    /// How far past an end marker to look for the closing sentence
    /// punctuation, in characters.
    pub sentence_lookahead_chars: usize,

    /// Fraction of non-empty lines that must look like header lines for a
    /// paragraph to count as a header.
    pub header_line_ratio: f64,

    /// Paragraphs with a metadata line and fewer lines than this are headers.
    pub short_header_max_lines: usize,

    /// Number of characters kept in audit previews.
    pub preview_chars: usize,

    /// Also strip `From:` / `To:` address blocks during preprocessing.
    pub strip_address_headers: bool,

    /// Additional case-insensitive patterns that mark a paragraph protected.
    pub extra_protected_patterns: Vec<String>,

    /// Additional case-insensitive boilerplate patterns.
    pub extra_boilerplate_patterns: Vec<String>,

    /// Additional disclaimer vocabulary (matched as lowercase substrings).
    pub extra_disclaimer_keywords: Vec<String>,
}

impl Default for CleanerOptions {
    fn default() -> Self {
        Self {
            table_alignment_ratio: 0.5,
            disclaimer_density_threshold: 3,
            max_disclaimer_iterations: 10,
            sentence_lookahead_chars: 200,
            header_line_ratio: 0.5,
            short_header_max_lines: 5,
            preview_chars: 50,
            strip_address_headers: false,
            extra_protected_patterns: Vec::new(),
            extra_boilerplate_patterns: Vec::new(),
            extra_disclaimer_keywords: Vec::new(),
        }
    }
}

impl CleanerOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that remove less (more keywords needed per disclaimer)
    pub fn conservative() -> Self {
        Self {
            disclaimer_density_threshold: 4,
            ..Self::default()
        }
    }

    /// Creates options for aggressive cleanup (maximum purification)
    pub fn aggressive() -> Self {
        Self {
            disclaimer_density_threshold: 2, // Lower threshold = more aggressive
            strip_address_headers: true,
            ..Self::default()
        }
    }

    /// Parses options from a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Sets the table alignment ratio.
    pub fn with_table_alignment_ratio(mut self, ratio: f64) -> Self {
        self.table_alignment_ratio = ratio;
        self
    }

    /// Sets the disclaimer keyword density threshold.
    pub fn with_disclaimer_density(mut self, threshold: usize) -> Self {
        self.disclaimer_density_threshold = threshold;
        self
    }

    /// Sets the disclaimer block iteration cap.
    pub fn with_max_disclaimer_iterations(mut self, cap: usize) -> Self {
        self.max_disclaimer_iterations = cap;
        self
    }

    /// Enables `From:` / `To:` block stripping.
    pub fn with_address_header_stripping(mut self) -> Self {
        self.strip_address_headers = true;
        self
    }

    /// Adds a protected pattern.
    pub fn with_protected_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_protected_patterns.push(pattern.into());
        self
    }

    /// Adds a boilerplate pattern.
    pub fn with_boilerplate_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_boilerplate_patterns.push(pattern.into());
        self
    }

    /// Adds a disclaimer keyword.
    pub fn with_disclaimer_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.extra_disclaimer_keywords.push(keyword.into());
        self
    }

    /// Checks that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        check_ratio("table_alignment_ratio", self.table_alignment_ratio)?;
        check_ratio("header_line_ratio", self.header_line_ratio)?;

        if self.disclaimer_density_threshold == 0 {
            return Err(Error::InvalidConfig(
                "disclaimer_density_threshold must be at least 1".into(),
            ));
        }
        if self.max_disclaimer_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_disclaimer_iterations must be at least 1".into(),
            ));
        }
        if self.short_header_max_lines < 2 {
            return Err(Error::InvalidConfig(
                "short_header_max_lines must be at least 2".into(),
            ));
        }
        if self
            .extra_disclaimer_keywords
            .iter()
            .any(|k| k.trim().is_empty())
        {
            return Err(Error::InvalidConfig(
                "disclaimer keywords must not be blank".into(),
            ));
        }

        Ok(())
    }
}

fn check_ratio(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name} must be in (0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CleanerOptions::default();
        assert_eq!(options.disclaimer_density_threshold, 3);
        assert_eq!(options.max_disclaimer_iterations, 10);
        assert_eq!(options.sentence_lookahead_chars, 200);
        assert!((options.table_alignment_ratio - 0.5).abs() < f64::EPSILON);
        assert!(!options.strip_address_headers);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let conservative = CleanerOptions::conservative();
        let aggressive = CleanerOptions::aggressive();
        assert!(conservative.disclaimer_density_threshold > 3);
        assert!(aggressive.disclaimer_density_threshold < 3);
        assert!(aggressive.strip_address_headers);
        assert!(conservative.validate().is_ok());
        assert!(aggressive.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let options = CleanerOptions::new()
            .with_disclaimer_density(5)
            .with_protected_pattern(r"\bgrn\b")
            .with_address_header_stripping();
        assert_eq!(options.disclaimer_density_threshold, 5);
        assert_eq!(options.extra_protected_patterns, vec![r"\bgrn\b"]);
        assert!(options.strip_address_headers);
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        let options = CleanerOptions::new().with_table_alignment_ratio(1.5);
        assert!(matches!(options.validate(), Err(Error::InvalidConfig(_))));

        let options = CleanerOptions::new().with_table_alignment_ratio(0.0);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_caps() {
        assert!(CleanerOptions::new()
            .with_max_disclaimer_iterations(0)
            .validate()
            .is_err());
        assert!(CleanerOptions::new()
            .with_disclaimer_density(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            CleanerOptions::from_json_str(r#"{"disclaimer_density_threshold": 4}"#).unwrap();
        assert_eq!(options.disclaimer_density_threshold, 4);
        assert_eq!(options.max_disclaimer_iterations, 10);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            CleanerOptions::from_json_str("{not json"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            CleanerOptions::from_json_str(r#"{"header_line_ratio": 2.0}"#),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"strip_address_headers": true}"#).unwrap();
        let options = CleanerOptions::load(&path).unwrap();
        assert!(options.strip_address_headers);
    }
}
