//! Per-run statistics and audit records.

use super::ParagraphTag;
use serde::{Deserialize, Serialize};

/// Kind of multi-line block removed before segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// `Cc:` line with its wrapped continuation lines
    Cc,
    /// `From:` / `To:` line with its wrapped continuation lines
    Address,
    /// Disclaimer span between a start and end marker
    Disclaimer,
}

/// One block removed by the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRemoval {
    pub kind: BlockKind,
    /// Leading characters of the removed span
    pub preview: String,
    /// Length of the removed span in characters
    pub chars: usize,
}

/// A per-paragraph decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub ordinal: usize,
    pub preview: String,
    pub tag: ParagraphTag,
    pub reason: Option<String>,
}

/// Keywords that pushed a paragraph over the disclaimer density threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclaimerMatch {
    pub preview: String,
    pub keywords: Vec<String>,
}

/// Summary of one `clean` run.
///
/// `removed` counts paragraphs dropped by the specialist cleaners and
/// `retained` counts paragraphs in the output, so together they equal the
/// number of segmented paragraphs. Blocks removed before segmentation are
/// counted separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub removed: usize,
    pub retained: usize,
    pub protected_count: usize,
    pub table_count: usize,
    pub cc_blocks_removed: usize,
    pub address_blocks_removed: usize,
    pub headers_removed: usize,
    pub footers_removed: usize,
    pub disclaimer_blocks_removed: usize,
    pub disclaimers_removed: usize,
    pub audit_log: Vec<AuditEntry>,
    pub block_removals: Vec<BlockRemoval>,
    pub disclaimer_matches: Vec<DisclaimerMatch>,
}

impl CleaningStats {
    /// Number of paragraphs produced by segmentation.
    pub fn segmented(&self) -> usize {
        self.retained + self.removed
    }

    /// Number of blocks removed before segmentation.
    pub fn blocks_removed(&self) -> usize {
        self.cc_blocks_removed + self.address_blocks_removed + self.disclaimer_blocks_removed
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Length comparison between input and cleaned output, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub original_length: usize,
    pub cleaned_length: usize,
    pub reduction_chars: i64,
    pub reduction_percent: f64,
}

impl CleaningReport {
    /// Builds the report from the two lengths.
    pub fn new(original_length: usize, cleaned_length: usize) -> Self {
        let reduction_chars = original_length as i64 - cleaned_length as i64;
        let reduction_percent = if original_length > 0 {
            (reduction_chars as f64 / original_length as f64 * 10000.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            original_length,
            cleaned_length,
            reduction_chars,
            reduction_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_rounding() {
        let report = CleaningReport::new(300, 200);
        assert_eq!(report.reduction_chars, 100);
        assert!((report.reduction_percent - 33.33).abs() < 1e-9);
    }

    #[test]
    fn test_report_empty_input() {
        let report = CleaningReport::new(0, 0);
        assert_eq!(report.reduction_chars, 0);
        assert_eq!(report.reduction_percent, 0.0);
    }

    #[test]
    fn test_stats_json_field_names() {
        let stats = CleaningStats {
            removed: 2,
            retained: 5,
            cc_blocks_removed: 1,
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();
        for field in [
            "removed",
            "retained",
            "protected_count",
            "table_count",
            "cc_blocks_removed",
            "headers_removed",
            "footers_removed",
            "disclaimer_blocks_removed",
            "disclaimers_removed",
            "audit_log",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["retained"], 5);
        assert_eq!(stats.segmented(), 7);
        assert_eq!(stats.blocks_removed(), 1);
    }

    #[test]
    fn test_stats_json_roundtrip_pretty() {
        let stats = CleaningStats {
            audit_log: vec![AuditEntry {
                ordinal: 0,
                preview: "Invoice INV-1001".into(),
                tag: ParagraphTag::Protected,
                reason: Some("keyword".into()),
            }],
            ..Default::default()
        };
        let back: CleaningStats = serde_json::from_str(&stats.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, stats);
    }
}
