//! CLI argument definitions for Trestle.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "trestle",
    version,
    about = "Resolve multi-project build configuration into a build plan",
    long_about = "Trestle evaluates a Trestle.toml settings manifest: it lays out the build \
                  output directories, plans plugin and dependency repositories, validates \
                  plugin declarations and orders subproject evaluation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory containing Trestle.toml (default: nearest ancestor of the current directory)
    #[arg(long, global = true, env = "TRESTLE_SETTINGS_DIR")]
    pub settings_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and print the build plan
    Plan {
        /// Print the plan as JSON for a build executor
        #[arg(long)]
        json: bool,
    },

    /// List subprojects in evaluation order with their output directories
    Projects,

    /// Remove the build output directory
    Clean {
        /// Clean a single subproject's output directory only
        #[arg(short, long)]
        project: Option<String>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
