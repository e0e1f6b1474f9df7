//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for rostr using the `clap`
//! crate. Every command maps onto one operation against the record server;
//! `browse` composes them into an interactive session.
//!
//! # Commands
//!
//! - **browse**: Interactive paging, searching and selection (default)
//! - **page**: Print a single page of records
//! - **search**: Search records by name or date window
//! - **delete**: Delete records by id (with confirmation)
//! - **upload**: Upload a CSV of records
//! - **export**: Download the table export
//! - **filter**: Fetch records inside a date window
//! - **config**: Manage configuration settings

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "rostr")]
#[command(about = "A terminal client for browsing and managing employee rosters", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse records interactively (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Page to open first
        #[arg(short, long)]
        page: Option<u32>,

        /// Records per page (overrides config)
        #[arg(long = "page-size", value_name = "N")]
        page_size: Option<u32>,
    },

    /// Print one page of records
    Page {
        /// Page number (1-based)
        #[arg(default_value_t = 1)]
        page: u32,

        /// Records per page (overrides config)
        #[arg(long = "page-size", value_name = "N")]
        page_size: Option<u32>,
    },

    /// Search records by name, optionally inside a date window
    #[command(visible_alias = "s")]
    Search {
        /// Search term (matched against record names)
        term: Option<String>,

        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Window end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Delete records by id
    #[command(visible_alias = "rm")]
    Delete {
        /// Record ids to delete
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Upload a CSV of records
    Upload {
        /// CSV file to submit
        file: PathBuf,
    },

    /// Download the table export as a file
    Export {
        /// Page to export
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Search term to scope the export
        #[arg(long, default_value = "")]
        term: String,
    },

    /// Fetch records inside a date window
    Filter {
        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Window end (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value (key=value)
    Set {
        /// Setting in key=value format
        setting: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            page: None,
            page_size: None,
        })
    }
}
