//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "injdiary")]
#[command(about = "Browse an injection diary export week by week", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Diary export to read ('-' reads stdin); overrides the config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Config file (default: ./injdiary.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail on malformed diary blocks instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every entry, newest first
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the entries of one week
    Week {
        /// Week to start from, as YYYY-Www (default: newest week with entries)
        #[arg(value_name = "WEEK", conflicts_with = "date")]
        week: Option<String>,

        /// Start from the week containing this date (DD-MM-YYYY)
        #[arg(short, long)]
        date: Option<String>,

        /// Navigation steps applied in order (next, previous)
        #[arg(short, long = "go", value_name = "DIRECTION")]
        go: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the weeks that have entries, newest first
    Weeks {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
