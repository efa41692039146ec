//! Cleaning model.
//!
//! This module defines the paragraph unit that flows between pipeline stages
//! and the statistics record returned to the caller.

mod paragraph;
mod stats;

pub use paragraph::*;
pub use stats::*;
