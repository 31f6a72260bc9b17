//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for backlog-poker
#[derive(Parser, Debug)]
#[command(name = "backlog-poker")]
#[command(author, version, about = "Planning-poker estimation for a prioritized backlog")]
#[command(long_about = r#"
backlog-poker runs one shared voting room against a priority-ordered backlog.

Participants join with their pseudo ("po" and "sm" are the facilitators,
everyone else estimates), vote simultaneously on the feature under
consideration, reveal, and validate under the feature's voting mode
(unanimity, average, or median).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./poker.toml        Project-level config
3. ~/.config/backlog-poker/config.toml   Global config

Example:
  backlog-poker                      # open the interactive room
  backlog-poker list                 # print the backlog
  backlog-poker add "checkout" -d "one-click checkout" -p 1 -m unanimite \
      --participant hugo --participant lina
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Override the backlog file location
    #[arg(long, value_name = "PATH", global = true)]
    pub backlog: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive voting room (default)
    Room,

    /// Print the backlog in priority order
    List,

    /// Print the feature currently under consideration
    Next,

    /// Add a feature to the backlog
    Add {
        /// Feature name
        name: String,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority (lower is more urgent)
        #[arg(short, long)]
        priority: i64,

        /// Difficulty estimate, if already known
        #[arg(long)]
        difficulty: Option<i64>,

        /// Workflow label
        #[arg(short, long)]
        status: Option<String>,

        /// Voting mode: unanimite|moyenne|mediane (or unanimity|average|median)
        #[arg(short, long, default_value = "unanimite")]
        mode: String,

        /// Expected voter (repeatable)
        #[arg(long = "participant", value_name = "PSEUDO")]
        participants: Vec<String>,
    },

    /// Edit a feature; only the provided fields change
    Edit {
        /// Feature id
        id: u32,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        priority: Option<i64>,

        #[arg(long)]
        difficulty: Option<i64>,

        #[arg(short, long)]
        status: Option<String>,

        /// Replace the expected voter list (repeatable)
        #[arg(long = "participant", value_name = "PSEUDO")]
        participants: Vec<String>,
    },

    /// Remove a feature by id
    Remove {
        /// Feature id
        id: u32,
    },
}
