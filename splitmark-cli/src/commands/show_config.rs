//! Show config command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the show-config command
#[derive(Debug, Args)]
pub struct ShowConfigArgs {
    /// Configuration file (default: built-in defaults)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ShowConfigArgs {
    /// Execute the show-config command
    pub fn execute(&self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }

    /// Effective configuration as TOML
    fn render(&self) -> Result<String> {
        CliConfig::load_or_default(self.config.as_deref())?.to_toml()
    }
}
