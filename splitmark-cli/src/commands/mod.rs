//! CLI command implementations

use clap::Subcommand;

use crate::output::OutputFormat;

pub mod generate_config;
pub mod process;
pub mod show_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment paragraph files into bounded chunks
    Process(process::ProcessArgs),

    /// Write a commented default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),

    /// Print the effective configuration
    ShowConfig(show_config::ShowConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::ShowConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Print the requested listing
    pub fn execute(&self) {
        match self {
            ListCommands::Formats => {
                println!("Available output formats:");
                for format in OutputFormat::ALL {
                    println!(
                        "  {:<10} {} (.{})",
                        format.name(),
                        format.description(),
                        format.extension()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_commands_debug_format() {
        let generate = Commands::GenerateConfig(generate_config::GenerateConfigArgs {
            output: PathBuf::from("splitmark.toml"),
        });

        let debug_str = format!("{:?}", generate);
        assert!(debug_str.contains("GenerateConfig"));
        assert!(debug_str.contains("splitmark.toml"));

        let list_cmd = Commands::List {
            subcommand: ListCommands::Formats,
        };

        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Formats"));
    }

    #[test]
    fn test_list_formats_runs() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Formats,
        };
        assert!(list_cmd.execute().is_ok());
    }

    #[test]
    fn test_show_config_runs_with_defaults() {
        let show = Commands::ShowConfig(show_config::ShowConfigArgs { config: None });
        assert!(show.execute().is_ok());
    }
}
