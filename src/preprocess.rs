//! Stage 2: block preprocessing.
//!
//! Multi-line noise is removed on the raw text, before paragraph segmentation,
//! because a wrapped Cc list or a disclaimer can span several blank-line
//! separated chunks.
//!
//! - Cc blocks: line-level, a `Cc:` line plus wrapped address continuations
//! - Address blocks (optional): the same for `From:` / `To:`
//! - Disclaimer blocks: start marker through nearest end marker, bounded by
//!   an iteration cap

use crate::error::Result;
use crate::model::{preview, BlockKind, BlockRemoval};
use crate::options::CleanerOptions;
use crate::patterns::{
    compile_set, DISCLAIMER_END_MARKERS, DISCLAIMER_START_MARKERS, RE_EMAIL, RE_METADATA_LINE,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_CC_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^Cc\s*:").unwrap());

static RE_ADDRESS_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:From|To)\s*:").unwrap());

/// Text after one preprocessing pass, with what the pass removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessOutcome {
    pub text: String,
    pub removals: Vec<BlockRemoval>,
}

/// Line- and block-level noise remover.
#[derive(Debug, Clone)]
pub struct BlockPreprocessor {
    start_markers: Vec<Regex>,
    end_markers: Vec<Regex>,
    max_iterations: usize,
    lookahead_chars: usize,
    preview_chars: usize,
}

impl BlockPreprocessor {
    /// Compiles the disclaimer marker pairs.
    pub fn new(options: &CleanerOptions) -> Result<Self> {
        Ok(Self {
            start_markers: compile_set(
                "disclaimer start markers",
                "(?i)",
                DISCLAIMER_START_MARKERS.iter().copied(),
            )?,
            end_markers: compile_set(
                "disclaimer end markers",
                "(?i)",
                DISCLAIMER_END_MARKERS.iter().copied(),
            )?,
            max_iterations: options.max_disclaimer_iterations,
            lookahead_chars: options.sentence_lookahead_chars,
            preview_chars: options.preview_chars,
        })
    }

    /// Drops `Cc:` lines and their wrapped continuation lines.
    ///
    /// A continuation line contains an email address or ends in `,` / `;`.
    /// The first line that is neither, or that starts another header field,
    /// ends the block and is kept.
    pub fn remove_cc_blocks(&self, text: &str) -> PreprocessOutcome {
        self.remove_line_blocks(text, BlockKind::Cc, &RE_CC_START, |line| {
            RE_EMAIL.is_match(line) || line.ends_with([',', ';'])
        })
    }

    /// Drops `From:` / `To:` lines and their continuations.
    ///
    /// Continuations may also be bare `Name <address>` fragments.
    pub fn remove_address_blocks(&self, text: &str) -> PreprocessOutcome {
        self.remove_line_blocks(text, BlockKind::Address, &RE_ADDRESS_START, |line| {
            RE_EMAIL.is_match(line)
                || line.ends_with([',', ';'])
                || line.contains('<')
                || line.contains('>')
        })
    }

    fn remove_line_blocks(
        &self,
        text: &str,
        kind: BlockKind,
        start: &Regex,
        is_continuation: impl Fn(&str) -> bool,
    ) -> PreprocessOutcome {
        let mut kept: Vec<&str> = Vec::new();
        let mut removals: Vec<BlockRemoval> = Vec::new();
        let mut in_block = false;

        for line in text.split('\n') {
            let trimmed = line.trim();

            if start.is_match(trimmed) {
                debug!(kind = ?kind, line = %preview(trimmed, self.preview_chars), "removing block");
                removals.push(BlockRemoval {
                    kind,
                    preview: preview(trimmed, self.preview_chars),
                    chars: trimmed.chars().count(),
                });
                in_block = true;
                continue;
            }

            if in_block {
                // Another header field never belongs to the address list
                if !trimmed.is_empty()
                    && !RE_METADATA_LINE.is_match(trimmed)
                    && is_continuation(trimmed)
                {
                    if let Some(current) = removals.last_mut() {
                        current.chars += trimmed.chars().count();
                    }
                    continue;
                }
                in_block = false;
            }

            kept.push(line);
        }

        PreprocessOutcome {
            text: kept.join("\n"),
            removals,
        }
    }

    /// Deletes disclaimer spans.
    ///
    /// Start markers are tried in order; for the first one found, the span
    /// runs to the nearest end marker after it, extended through the next
    /// `.` or newline within the lookahead window. Without an end marker the
    /// span runs to the end of the text. At most `max_disclaimer_iterations`
    /// spans are removed.
    pub fn remove_disclaimer_blocks(&self, text: &str) -> PreprocessOutcome {
        let mut text = text.to_string();
        let mut removals = Vec::new();

        for _ in 0..self.max_iterations {
            let Some(start) = self
                .start_markers
                .iter()
                .find_map(|re| re.find(&text))
                .map(|m| m.start())
            else {
                break;
            };

            let end = self.resolve_block_end(&text, start);
            let span = &text[start..end];

            debug!(
                chars = span.chars().count(),
                preview = %preview(span, self.preview_chars),
                "removing disclaimer block"
            );
            removals.push(BlockRemoval {
                kind: BlockKind::Disclaimer,
                preview: preview(span, self.preview_chars),
                chars: span.chars().count(),
            });

            text.replace_range(start..end, "");
        }

        if removals.len() == self.max_iterations
            && self.start_markers.iter().any(|re| re.is_match(&text))
        {
            debug!(
                cap = self.max_iterations,
                "disclaimer iteration cap reached, leaving remaining blocks in text"
            );
        }

        PreprocessOutcome { text, removals }
    }

    /// Byte offset one past the end of the disclaimer starting at `start`.
    fn resolve_block_end(&self, text: &str, start: usize) -> usize {
        let nearest = self
            .end_markers
            .iter()
            .filter_map(|re| re.find_at(text, start))
            .min_by_key(|m| m.start());

        let Some(end_match) = nearest else {
            return text.len();
        };

        let end = end_match.end();
        text[end..]
            .char_indices()
            .take(self.lookahead_chars)
            .find(|(_, c)| *c == '.' || *c == '\n')
            .map_or(end, |(offset, c)| end + offset + c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocessor() -> BlockPreprocessor {
        BlockPreprocessor::new(&CleanerOptions::default()).unwrap()
    }

    #[test]
    fn test_cc_block_with_continuation() {
        let input = "From: a@x.com\nCc: b@y.com, c@y.com,\n    d@y.com\nSubject: S";
        let outcome = preprocessor().remove_cc_blocks(input);
        assert_eq!(outcome.text, "From: a@x.com\nSubject: S");
        assert_eq!(outcome.removals.len(), 1);
        assert_eq!(outcome.removals[0].kind, BlockKind::Cc);
    }

    #[test]
    fn test_cc_block_ends_at_plain_line() {
        let input = "Cc: ops team;\nsales desk,\nPlease review the note below.";
        let outcome = preprocessor().remove_cc_blocks(input);
        assert_eq!(outcome.text, "Please review the note below.");
    }

    #[test]
    fn test_cc_block_does_not_eat_next_header() {
        let input = "Cc: b@y.com\nTo: d@y.com\nBody";
        let outcome = preprocessor().remove_cc_blocks(input);
        assert_eq!(outcome.text, "To: d@y.com\nBody");
    }

    #[test]
    fn test_cc_case_insensitive_and_repeated() {
        let input = "CC: a@b.com\n\nhello\ncc : c@d.com\nbye";
        let outcome = preprocessor().remove_cc_blocks(input);
        assert_eq!(outcome.text, "\nhello\nbye");
        assert_eq!(outcome.removals.len(), 2);
    }

    #[test]
    fn test_address_block_removal() {
        let input = "From: Name <a@x.com>\nTo: Recipient One <r1@x.com>,\n    Recipient Two <r2@x.com>\nSubject: Hello";
        let outcome = preprocessor().remove_address_blocks(input);
        assert_eq!(outcome.text, "Subject: Hello");
        assert_eq!(outcome.removals.len(), 2);
        assert!(outcome
            .removals
            .iter()
            .all(|r| r.kind == BlockKind::Address));
    }

    #[test]
    fn test_address_block_ends_at_blank_line() {
        let input = "To: a@x.com\n\nr2@x.com is the other contact";
        let outcome = preprocessor().remove_address_blocks(input);
        assert_eq!(outcome.text, "\nr2@x.com is the other contact");
    }

    #[test]
    fn test_disclaimer_block_between_paragraphs() {
        let input = concat!(
            "Please process the claim.\n\n",
            "This e-mail message may contain confidential or legally privileged information ",
            "and should not be construed as confirmation of any transaction or contract. ",
            "\n\nKindly share the invoice."
        );
        let outcome = preprocessor().remove_disclaimer_blocks(input);
        assert!(!outcome.text.contains("confidential"));
        assert!(outcome.text.contains("Please process the claim."));
        assert!(outcome.text.contains("Kindly share the invoice."));
        assert_eq!(outcome.removals.len(), 1);
        assert_eq!(outcome.removals[0].kind, BlockKind::Disclaimer);
    }

    #[test]
    fn test_disclaimer_includes_trailing_sentence() {
        let input = "A\nThis message contains confidential information. Copying is strictly prohibited by law. Keep\nB";
        let outcome = preprocessor().remove_disclaimer_blocks(input);
        assert_eq!(outcome.text, "A\n Keep\nB");
    }

    #[test]
    fn test_disclaimer_nearest_end_marker_wins() {
        let input = concat!(
            "This message contains confidential information. Use is strictly prohibited.",
            "\nMiddle line.\n",
            "No confirmation of any transaction or contract.\nTail"
        );
        let outcome = preprocessor().remove_disclaimer_blocks(input);
        assert!(outcome.text.starts_with("\nMiddle line."));
        assert!(outcome.text.ends_with("Tail"));
    }

    #[test]
    fn test_disclaimer_without_end_runs_to_end() {
        let input = "Keep this.\nThis message contains confidential information and more";
        let outcome = preprocessor().remove_disclaimer_blocks(input);
        assert_eq!(outcome.text, "Keep this.\n");
    }

    #[test]
    fn test_disclaimer_repeated_blocks() {
        let block = "This message contains confidential information; copying is strictly prohibited.\n";
        let input = format!("one\n{block}two\n{block}three");
        let outcome = preprocessor().remove_disclaimer_blocks(&input);
        assert_eq!(outcome.text, "one\n\ntwo\n\nthree");
        assert_eq!(outcome.removals.len(), 2);
    }

    #[test]
    fn test_disclaimer_iteration_cap() {
        let options = CleanerOptions::default().with_max_disclaimer_iterations(2);
        let pre = BlockPreprocessor::new(&options).unwrap();
        let block = "This message contains confidential information; strictly prohibited.\n";
        let input = block.repeat(3);
        let outcome = pre.remove_disclaimer_blocks(&input);
        assert_eq!(outcome.removals.len(), 2);
        assert!(outcome.text.contains("This message contains confidential information"));
    }

    #[test]
    fn test_disclaimer_multilingual_marker() {
        let input = "付款已确认\n本电子邮件及其附件含有华为公司的保密信息，仅限于发送给上面地址中列出的个人或群组。";
        let outcome = preprocessor().remove_disclaimer_blocks(input);
        assert_eq!(outcome.text, "付款已确认\n");
    }

    #[test]
    fn test_no_markers_is_identity() {
        let input = "Plain text\n\nwith paragraphs";
        let outcome = preprocessor().remove_disclaimer_blocks(input);
        assert_eq!(outcome.text, input);
        assert!(outcome.removals.is_empty());
    }
}
