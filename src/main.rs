//! Rostr CLI application entry point
//!
//! This is the main executable for rostr, a terminal client for browsing
//! and managing employee rosters over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Browse records interactively (default command)
//! rostr
//! rostr browse
//!
//! # Print a page
//! rostr page 2 --page-size 10
//!
//! # Search by name or date window
//! rostr search alice
//! rostr search --from 2024-01-01 --to 2024-06-30
//!
//! # Delete records
//! rostr delete 3 4 -y
//!
//! # Upload a CSV, download the table export
//! rostr upload people.csv
//! rostr export --page 2 --term alice
//!
//! # Quiet mode (only output results)
//! rostr -q page
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/rostr/config.toml` on Linux). The server to talk to is set
//! with `rostr config set base_url=...`.

use chrono::NaiveDate;
use rostr::{
    api::{HttpApi, SearchQuery},
    cli::{Cli, Commands, ConfigCommands},
    commands,
    config::RostrConfig,
    host::ConsoleHost,
    RostrError,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, RostrError>;

/// Handle the config command - manage application settings
///
/// # Errors
/// Returns `RostrError` if the key is unknown or the file cannot be saved.
fn handle_config_command(
    mut config: RostrConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            config.apply_setting(setting)?;
            config.save()?;
            if !quiet {
                println!("Updated {setting}");
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get_value(key)?);
        }
    }
    Ok(())
}

/// Build the search query for the search command
fn search_query(term: Option<String>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> SearchQuery {
    SearchQuery {
        term: term.unwrap_or_default(),
        from,
        to,
    }
}

/// Main entry point
///
/// # Errors
/// Returns `RostrError` if configuration loading fails or any command
/// handler returns an error.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = RostrConfig::load()?;

    let cli = Cli::parse_args();

    let quiet = cli.quiet || config.quiet;

    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        return handle_config_command(config, command, quiet);
    }

    let api = HttpApi::new(&config.base_url)?;
    let host = ConsoleHost::new(config.download_dir());

    match command {
        Commands::Browse { page, page_size } => commands::browse(
            &api,
            &host,
            page.unwrap_or(1),
            page_size.unwrap_or(config.page_size),
            config.web_url(),
            quiet,
        ),
        Commands::Page { page, page_size } => {
            commands::page(&api, page, page_size.unwrap_or(config.page_size), quiet)
        }
        Commands::Search { term, from, to } => {
            commands::search(&api, search_query(term, from, to), quiet)
        }
        Commands::Delete { ids, yes } => commands::delete(&api, &host, &ids, yes, quiet),
        Commands::Upload { file } => commands::upload(&api, file, quiet),
        Commands::Export { page, term } => commands::export(&api, &host, page, &term, quiet),
        Commands::Filter { from, to } => commands::filter(&api, from, to, quiet),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
