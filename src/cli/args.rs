//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `transform`: rewrite user-facing text into translation calls (dry run
//!   unless `--apply`)
//! - `init`: write a default `.i18n-transform.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "i18n-transform", author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Arguments shared by commands that scan the source tree.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root to search for the config file and sources
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct TransformArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the rewritten files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Write a JSON report of every transformed string to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print every skipped candidate with its reason
    #[arg(long, env = "I18N_TRANSFORM_DEBUG")]
    pub debug: bool,
}

#[derive(Debug, Args)]
pub struct TransformCommand {
    #[command(flatten)]
    pub args: TransformArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite user-facing text into translation calls
    Transform(TransformCommand),
    /// Initialize a new .i18n-transform.json configuration file
    Init,
}
