use crate::app::config::SuffixStrategy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Combine the markdown files of a folder into a single document"
)]
pub struct Cli {
    /// Root directory of the vault (defaults to the current directory)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Settings file to load (and write with --save)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Persist the effective settings after applying overrides
    #[arg(long, global = true)]
    pub save: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Combine the markdown files below one folder
    Folder {
        /// Folder inside the vault
        path: PathBuf,
    },
    /// Combine every markdown file in the vault
    Vault,
    /// Print the effective settings
    Settings,
}

#[derive(Args, Debug, Default)]
pub struct SettingsOverrides {
    /// Prepend a directory tree to the output
    #[arg(long, global = true, conflicts_with = "no_context")]
    pub context: bool,

    /// Do not prepend a directory tree
    #[arg(long, global = true)]
    pub no_context: bool,

    /// How the output file name is made unique
    #[arg(long, value_enum, global = true)]
    pub suffix: Option<SuffixStrategy>,

    /// strftime pattern for timestamp suffixes (e.g. '%Y-%m-%d-%H%M%S')
    #[arg(long, global = true)]
    pub timestamp_format: Option<String>,

    /// Length of random suffixes (clamped to 1..=32)
    #[arg(long, global = true)]
    pub random_length: Option<usize>,

    /// Characters random suffixes are drawn from
    #[arg(long, global = true)]
    pub random_chars: Option<String>,
}

impl SettingsOverrides {
    pub fn include_directory_context(&self) -> Option<bool> {
        if self.context {
            Some(true)
        } else if self.no_context {
            Some(false)
        } else {
            None
        }
    }
}
