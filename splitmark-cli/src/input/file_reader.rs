//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    ///
    /// A leading byte order mark is dropped so it never counts as a character.
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        match content.strip_prefix('\u{feff}') {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(content),
        }
    }
}
