//! Validate command implementation

use anyhow::Result;
use clap::Args;
use splitmark_core::SegmentationEngine;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let checked = CliConfig::load(&self.config).and_then(|config| {
            SegmentationEngine::new(config.segment_config())?;
            Ok(config)
        });

        match checked {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!(
                    "  Segment length: {} to {} characters",
                    config.document.min_length, config.document.max_length
                );
                println!("  Search window: {}", config.advanced.search_window);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {:#}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validate_valid_config() {
        let file = config_file("[document]\nmax_length = 800\nmin_length = 200\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };

        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_inverted_bounds() {
        let file = config_file("[document]\nmax_length = 50\nmin_length = 100\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };

        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("must not exceed max_length"));
    }

    #[test]
    fn test_validate_empty_abbreviation() {
        let file = config_file("[advanced]\nabbreviations = [\"\"]\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };

        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/config.toml"),
        };

        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
