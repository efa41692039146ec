//! Stage 5b: disclaimer paragraph removal.
//!
//! Two signals, either one sufficient:
//! 1. keyword density: enough distinct legal terms in one paragraph
//! 2. a direct boilerplate phrase

use crate::error::Result;
use crate::model::{DisclaimerMatch, Paragraph, ParagraphTag};
use crate::options::CleanerOptions;
use crate::patterns::{compile_set, BOILERPLATE_PATTERNS, DISCLAIMER_KEYWORDS};
use regex::Regex;
use tracing::debug;

/// Why a paragraph was judged a disclaimer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisclaimerSignal {
    /// Distinct keywords found, in vocabulary order
    Density(Vec<String>),
    /// Source of the boilerplate pattern that matched
    Boilerplate(String),
}

/// Paragraphs kept and dropped by [`DisclaimerCleaner::clean`].
#[derive(Debug, Clone, Default)]
pub struct DisclaimerOutcome {
    pub kept: Vec<Paragraph>,
    /// Tagged `RemovedDisclaimer`
    pub removed: Vec<Paragraph>,
    /// Keyword evidence for density-triggered removals
    pub matches: Vec<DisclaimerMatch>,
}

/// Legal boilerplate detector.
#[derive(Debug, Clone)]
pub struct DisclaimerCleaner {
    keywords: Vec<String>,
    boilerplate: Vec<Regex>,
    density_threshold: usize,
    preview_chars: usize,
}

impl DisclaimerCleaner {
    pub fn new(options: &CleanerOptions) -> Result<Self> {
        let mut keywords: Vec<String> =
            DISCLAIMER_KEYWORDS.iter().map(|k| k.to_string()).collect();
        for extra in &options.extra_disclaimer_keywords {
            let extra = extra.trim().to_lowercase();
            if !keywords.contains(&extra) {
                keywords.push(extra);
            }
        }

        let boilerplate_sources = BOILERPLATE_PATTERNS
            .iter()
            .copied()
            .chain(options.extra_boilerplate_patterns.iter().map(String::as_str));

        Ok(Self {
            keywords,
            boilerplate: compile_set("boilerplate patterns", "(?i)", boilerplate_sources)?,
            density_threshold: options.disclaimer_density_threshold,
            preview_chars: options.preview_chars,
        })
    }

    /// Drop disclaimer paragraphs. Order of the kept ones is unchanged.
    pub fn clean(&self, pool: Vec<Paragraph>) -> DisclaimerOutcome {
        let mut outcome = DisclaimerOutcome::default();

        for paragraph in pool {
            match self.assess(&paragraph.content) {
                Some(DisclaimerSignal::Density(keywords)) => {
                    debug!(
                        ordinal = paragraph.ordinal,
                        keywords = keywords.len(),
                        preview = %paragraph.preview(self.preview_chars),
                        "removed disclaimer"
                    );
                    outcome.matches.push(DisclaimerMatch {
                        preview: paragraph.preview(self.preview_chars * 2),
                        keywords: keywords.clone(),
                    });
                    let reason = format!("keywords: {}", keywords.join(", "));
                    outcome
                        .removed
                        .push(paragraph.tagged(ParagraphTag::RemovedDisclaimer, reason));
                }
                Some(DisclaimerSignal::Boilerplate(pattern)) => {
                    debug!(
                        ordinal = paragraph.ordinal,
                        pattern = %pattern,
                        "removed boilerplate"
                    );
                    let reason = format!("boilerplate {pattern}");
                    outcome
                        .removed
                        .push(paragraph.tagged(ParagraphTag::RemovedDisclaimer, reason));
                }
                None => outcome.kept.push(paragraph),
            }
        }

        outcome
    }

    /// Judge a single paragraph.
    pub fn assess(&self, content: &str) -> Option<DisclaimerSignal> {
        let lower = content.to_lowercase();
        let found: Vec<String> = self
            .keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .cloned()
            .collect();

        if found.len() >= self.density_threshold {
            return Some(DisclaimerSignal::Density(found));
        }

        self.boilerplate
            .iter()
            .find(|re| re.is_match(content))
            .map(|re| {
                let source = re.as_str().trim_start_matches("(?i)");
                DisclaimerSignal::Boilerplate(source.to_string())
            })
    }
}
