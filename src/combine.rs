//! Stage 6: reassembly and statistics merge.

use crate::model::{
    preview, AuditEntry, BlockKind, BlockRemoval, CleaningStats, DisclaimerMatch, Paragraph,
    ParagraphTag,
};

/// Everything the earlier stages produced for one document.
#[derive(Debug, Clone, Default)]
pub struct StageResults {
    /// Table and Protected paragraphs, in classification order
    pub shielded: Vec<Paragraph>,
    /// Cleanable paragraphs that survived both cleaners, in order
    pub survivors: Vec<Paragraph>,
    /// Paragraphs dropped by either cleaner
    pub removed: Vec<Paragraph>,
    /// Blocks dropped before segmentation
    pub block_removals: Vec<BlockRemoval>,
    /// Keyword evidence from the disclaimer cleaner
    pub disclaimer_matches: Vec<DisclaimerMatch>,
}

/// Shielded paragraphs first, then survivors, separated by blank lines.
pub fn combine_text(shielded: &[Paragraph], survivors: &[Paragraph]) -> String {
    shielded
        .iter()
        .chain(survivors)
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Final text plus the merged statistics record.
pub fn combine(results: StageResults, preview_chars: usize) -> (String, CleaningStats) {
    let text = combine_text(&results.shielded, &results.survivors);

    let mut stats = CleaningStats {
        block_removals: results.block_removals,
        disclaimer_matches: results.disclaimer_matches,
        ..Default::default()
    };

    for removal in &stats.block_removals {
        match removal.kind {
            BlockKind::Cc => stats.cc_blocks_removed += 1,
            BlockKind::Address => stats.address_blocks_removed += 1,
            BlockKind::Disclaimer => stats.disclaimer_blocks_removed += 1,
        }
    }

    let mut decided: Vec<&Paragraph> = results
        .shielded
        .iter()
        .chain(&results.survivors)
        .chain(&results.removed)
        .collect();
    decided.sort_by_key(|p| p.ordinal);

    for paragraph in decided {
        match paragraph.tag {
            ParagraphTag::Table => stats.table_count += 1,
            ParagraphTag::Protected => stats.protected_count += 1,
            ParagraphTag::Cleanable => {}
            ParagraphTag::RemovedHeader => stats.headers_removed += 1,
            ParagraphTag::RemovedFooter => stats.footers_removed += 1,
            ParagraphTag::RemovedDisclaimer => stats.disclaimers_removed += 1,
        }
        if paragraph.tag.is_retained() {
            stats.retained += 1;
        } else {
            stats.removed += 1;
        }

        stats.audit_log.push(AuditEntry {
            ordinal: paragraph.ordinal,
            preview: preview(&paragraph.content, preview_chars),
            tag: paragraph.tag,
            reason: paragraph.reason.clone(),
        });
    }

    (text, stats)
}
