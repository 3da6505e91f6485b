//! File pattern resolution using glob

use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Resolve file patterns to actual file paths
///
/// Office lock files (`~$name`) are never returned.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths =
            glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern}: {e}")))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() && !is_lock_file(&path) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();

    Ok(files)
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("~$"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "text").unwrap();
        path
    }

    #[test]
    fn test_resolve_sorted_and_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let b = touch(temp_dir.path(), "b.txt");
        let a = touch(temp_dir.path(), "a.txt");

        let pattern = format!("{}/*.txt", temp_dir.path().display());
        let files = resolve_patterns(&[pattern, b.display().to_string()]).unwrap();

        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_lock_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let doc = touch(temp_dir.path(), "report.txt");
        touch(temp_dir.path(), "~$report.txt");

        let pattern = format!("{}/*", temp_dir.path().display());
        assert_eq!(resolve_patterns(&[pattern]).unwrap(), vec![doc]);
    }

    #[test]
    fn test_directories_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("nested.txt")).unwrap();
        let doc = touch(temp_dir.path(), "doc.txt");

        let pattern = format!("{}/*.txt", temp_dir.path().display());
        assert_eq!(resolve_patterns(&[pattern]).unwrap(), vec![doc]);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let err = resolve_patterns(&["/nonexistent/dir/*.txt".to_string()]).unwrap_err();
        assert!(err.to_string().contains("No files found"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_patterns(&["[invalid".to_string()]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid file pattern"));
    }
}
