//! # mailscrub
//!
//! A deterministic cleaner for business email text. It strips thread headers,
//! Cc lists, legal disclaimers and webmail footers while guaranteeing that
//! paragraphs carrying business content (amounts, identifiers, tables, dates)
//! survive untouched.
//!
//! ## Pipeline
//!
//! 1. Normalize Unicode and line endings
//! 2. Remove Cc blocks and disclaimer blocks from the raw text
//! 3. Split into paragraphs
//! 4. Classify each paragraph as Table, Protected or Cleanable
//! 5. Run the header/footer and disclaimer cleaners on the Cleanable pool
//! 6. Reassemble and merge statistics
//!
//! ## Quick Start
//!
//! ```
//! let output = mailscrub::clean("Subject: Hello\n\nScheme CLM-00123 is live.\n\n1/2");
//!
//! assert_eq!(output.text, "Scheme CLM-00123 is live.");
//! assert_eq!(output.stats.protected_count, 1);
//! ```
//!
//! ## Features
//!
//! - `async`: Tokio file helpers in [`async_api`]
//! - `python`: Python bindings built with PyO3

pub mod classify;
pub mod cleaner;
pub mod combine;
pub mod disclaimer;
pub mod error;
pub mod header_footer;
pub mod model;
pub mod normalize;
pub mod options;
pub mod patterns;
pub mod preprocess;
pub mod segment;

#[cfg(feature = "async")]
pub mod async_api;

#[cfg(feature = "python")]
mod python;

// Re-exports
pub use cleaner::{CleanOutput, ContentCleaner};
pub use error::{Error, Result};
pub use model::{
    AuditEntry, BlockKind, BlockRemoval, CleaningReport, CleaningStats, DisclaimerMatch,
    Paragraph, ParagraphTag,
};
pub use normalize::normalize_text;
pub use options::CleanerOptions;

use std::sync::LazyLock;

// The built-in pattern tables are constant, so compiling them cannot fail.
static DEFAULT_CLEANER: LazyLock<ContentCleaner> = LazyLock::new(|| {
    ContentCleaner::new(CleanerOptions::default()).expect("built-in patterns compile")
});

/// Cleans one document with the default options.
///
/// # Example
///
/// ```
/// let output = mailscrub::clean("Cc: ops@vendor.com\nPrice revised to ₹499");
/// assert_eq!(output.text, "Price revised to ₹499");
/// assert_eq!(output.stats.cc_blocks_removed, 1);
/// ```
pub fn clean(input: &str) -> CleanOutput {
    DEFAULT_CLEANER.clean(input)
}

/// Cleans many documents in parallel with the default options.
pub fn clean_batch<S>(inputs: &[S]) -> Vec<CleanOutput>
where
    S: AsRef<str> + Sync,
{
    DEFAULT_CLEANER.clean_batch(inputs)
}

/// Returns the shared default engine.
pub fn default_cleaner() -> &'static ContentCleaner {
    &DEFAULT_CLEANER
}
