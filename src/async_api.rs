//! Async API for non-blocking email cleaning.
//!
//! Enable the `async` feature to use these APIs:
//!
//! ```toml
//! [dependencies]
//! mailscrub = { version = "0.1", features = ["async"] }
//! ```

use crate::cleaner::{CleanOutput, ContentCleaner};
use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Asynchronously reads and cleans a UTF-8 text file.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> mailscrub::Result<()> {
/// use std::sync::Arc;
/// use mailscrub::{CleanerOptions, ContentCleaner};
///
/// let cleaner = Arc::new(ContentCleaner::new(CleanerOptions::default())?);
/// let output = mailscrub::async_api::clean_file("mail.txt", cleaner).await?;
/// println!("{}", output.text);
/// # Ok(())
/// # }
/// ```
pub async fn clean_file(path: impl AsRef<Path>, cleaner: Arc<ContentCleaner>) -> Result<CleanOutput> {
    let text = fs::read_to_string(path).await?;
    clean_text(text, cleaner).await
}

/// Cleans text on the blocking pool.
pub async fn clean_text(text: String, cleaner: Arc<ContentCleaner>) -> Result<CleanOutput> {
    // Cleaning is CPU-bound
    tokio::task::spawn_blocking(move || cleaner.clean(&text))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
}

/// Reads an async source to the end and cleans it.
pub async fn clean_reader<R: AsyncRead + Unpin>(
    mut reader: R,
    cleaner: Arc<ContentCleaner>,
) -> Result<CleanOutput> {
    let mut text = String::new();
    reader.read_to_string(&mut text).await?;
    clean_text(text, cleaner).await
}
