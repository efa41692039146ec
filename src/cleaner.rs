//! The cleaning engine.

use crate::classify::{Classification, Classifier};
use crate::combine::{combine, StageResults};
use crate::disclaimer::DisclaimerCleaner;
use crate::error::Result;
use crate::header_footer::HeaderFooterCleaner;
use crate::model::{CleaningReport, CleaningStats, ParagraphTag};
use crate::normalize::normalize_text;
use crate::options::CleanerOptions;
use crate::preprocess::BlockPreprocessor;
use crate::segment::segment_paragraphs;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, trace};

/// Cleaned text and the statistics of the run that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutput {
    pub text: String,
    pub stats: CleaningStats,
    original_length: usize,
}

impl CleanOutput {
    /// Input vs. output length comparison.
    pub fn report(&self) -> CleaningReport {
        CleaningReport::new(self.original_length, self.text.chars().count())
    }
}

/// Immutable, reusable cleaning engine.
///
/// All patterns are compiled once in [`ContentCleaner::new`]; cleaning a
/// document allocates a fresh statistics record, so one engine can be shared
/// across threads.
///
/// # Example
///
/// ```
/// use mailscrub::{CleanerOptions, ContentCleaner};
///
/// let cleaner = ContentCleaner::new(CleanerOptions::default())?;
/// let output = cleaner.clean("Subject: Hi\n\nPlease check invoice INV-2041.\n\n1/2");
/// assert_eq!(output.text, "Please check invoice INV-2041.");
/// assert_eq!(output.stats.removed, 2);
/// # Ok::<(), mailscrub::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ContentCleaner {
    options: CleanerOptions,
    preprocessor: BlockPreprocessor,
    classifier: Classifier,
    header_footer: HeaderFooterCleaner,
    disclaimer: DisclaimerCleaner,
}

impl ContentCleaner {
    /// Validates the options and compiles every pattern set.
    pub fn new(options: CleanerOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            preprocessor: BlockPreprocessor::new(&options)?,
            classifier: Classifier::new(&options)?,
            header_footer: HeaderFooterCleaner::new(&options)?,
            disclaimer: DisclaimerCleaner::new(&options)?,
            options,
        })
    }

    /// Returns the options this engine was built with.
    pub fn options(&self) -> &CleanerOptions {
        &self.options
    }

    /// Runs the full pipeline on one document.
    ///
    /// Normalize, preprocess blocks, segment, classify, clean the cleanable
    /// pool, combine. Never fails.
    pub fn clean(&self, input: &str) -> CleanOutput {
        let original_length = input.chars().count();
        let normalized = normalize_text(input);

        // Stage 2: block preprocessing
        let mut block_removals = Vec::new();
        let cc = self.preprocessor.remove_cc_blocks(&normalized);
        block_removals.extend(cc.removals);
        let mut text = cc.text;

        if self.options.strip_address_headers {
            let address = self.preprocessor.remove_address_blocks(&text);
            block_removals.extend(address.removals);
            text = address.text;
        }

        let disclaimers = self.preprocessor.remove_disclaimer_blocks(&text);
        block_removals.extend(disclaimers.removals);

        // Stage 3 + 4: segment and classify
        let mut shielded = Vec::new();
        let mut cleanable = Vec::new();

        for paragraph in segment_paragraphs(&disclaimers.text) {
            let classification = self.classifier.classify(&paragraph.content);
            trace!(ordinal = paragraph.ordinal, ?classification, "classified");

            let reason = classification.reason().unwrap_or_default();
            let tag = match classification {
                Classification::Table(_) => ParagraphTag::Table,
                Classification::Protected(_) => ParagraphTag::Protected,
                Classification::Cleanable => {
                    cleanable.push(paragraph);
                    continue;
                }
            };
            shielded.push(paragraph.tagged(tag, reason));
        }

        // Stage 5: specialist cleaners, cleanable pool only
        let header_footer = self.header_footer.clean(cleanable);
        let disclaimer = self.disclaimer.clean(header_footer.kept);

        let mut removed = header_footer.removed;
        removed.extend(disclaimer.removed);

        // Stage 6: combine
        let (text, stats) = combine(
            StageResults {
                shielded,
                survivors: disclaimer.kept,
                removed,
                block_removals,
                disclaimer_matches: disclaimer.matches,
            },
            self.options.preview_chars,
        );

        debug!(
            retained = stats.retained,
            removed = stats.removed,
            blocks = stats.blocks_removed(),
            "cleaned document"
        );

        CleanOutput {
            text,
            stats,
            original_length,
        }
    }

    /// Cleans many documents in parallel. Output order matches input order.
    pub fn clean_batch<S>(&self, inputs: &[S]) -> Vec<CleanOutput>
    where
        S: AsRef<str> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.clean(input.as_ref()))
            .collect()
    }

    /// Reads a UTF-8 text file and cleans it.
    pub fn clean_file(&self, path: impl AsRef<Path>) -> Result<CleanOutput> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.clean(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> ContentCleaner {
        ContentCleaner::new(CleanerOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        for input in ["", "   ", "\n\n\t\n"] {
            let output = cleaner().clean(input);
            assert_eq!(output.text, "");
            assert_eq!(output.stats, CleaningStats::default());
        }
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = CleanerOptions::default().with_table_alignment_ratio(-1.0);
        assert!(ContentCleaner::new(options).is_err());
    }

    #[test]
    fn test_protected_moved_ahead_of_cleanable() {
        let input = "Hello team,\n\nPlease confirm the PO quantity.\n\nThanks";
        let output = cleaner().clean(input);
        assert_eq!(
            output.text,
            "Please confirm the PO quantity.\n\nHello team,\n\nThanks"
        );
        assert_eq!(output.stats.protected_count, 1);
        assert_eq!(output.stats.retained, 3);
        assert_eq!(output.stats.removed, 0);
    }

    #[test]
    fn test_specialists_never_see_shielded() {
        // header-shaped but carries a business identifier
        let input = "Subject: INV-2041 reminder\n\nSubject: Hello";
        let output = cleaner().clean(input);
        assert_eq!(output.text, "Subject: INV-2041 reminder");
        assert_eq!(output.stats.headers_removed, 1);
        assert_eq!(output.stats.protected_count, 1);
    }

    #[test]
    fn test_address_stripping_option() {
        let input = "From: a@x.com\nTo: b@y.com\n\nHello there";
        let plain = cleaner().clean(input);
        assert_eq!(plain.stats.address_blocks_removed, 0);
        assert_eq!(plain.stats.headers_removed, 1);

        let aggressive = ContentCleaner::new(CleanerOptions::aggressive()).unwrap();
        let output = aggressive.clean(input);
        assert_eq!(output.text, "Hello there");
        assert_eq!(output.stats.address_blocks_removed, 2);
        assert_eq!(output.stats.headers_removed, 0);
    }

    #[test]
    fn test_report() {
        let output = cleaner().clean("Subject: Hi\n\nKeep me");
        let report = output.report();
        assert_eq!(report.original_length, 20);
        assert_eq!(report.cleaned_length, 7);
        assert_eq!(report.reduction_chars, 13);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let c = cleaner();
        let inputs = vec![
            "Subject: A\n\nInvoice INV-1001 attached".to_string(),
            "Hello\n\n1/3".to_string(),
            String::new(),
        ];
        let batch = c.clean_batch(&inputs);
        assert_eq!(batch.len(), 3);
        for (input, output) in inputs.iter().zip(&batch) {
            assert_eq!(&c.clean(input), output);
        }
    }

    #[test]
    fn test_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mail.txt");
        std::fs::write(&path, "Cc: x@y.com\nPrice revised to ₹499").unwrap();
        let output = cleaner().clean_file(&path).unwrap();
        assert_eq!(output.text, "Price revised to ₹499");
        assert_eq!(output.stats.cc_blocks_removed, 1);
    }

    #[test]
    fn test_clean_file_missing() {
        assert!(cleaner().clean_file("/nonexistent/mail.txt").is_err());
    }
}
