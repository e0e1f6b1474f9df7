//! Rostr - a terminal client for browsing and managing employee rosters
//!
//! This library provides the state machines behind the CLI: a paginated
//! record browser with search and multi-select, a single-file uploader and
//! a table export trigger, all speaking to a record server over HTTP.

use thiserror::Error;

pub mod api;
pub mod browser;
pub mod cli;
pub mod commands;
pub mod config;
pub mod export;
pub mod host;
pub mod output;
pub mod upload;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum RostrError {
    /// Record server error
    #[error("API error: {0}")]
    ApiError(#[from] api::ApiError),
    /// Host environment error
    #[error("Host error: {0}")]
    HostError(#[from] host::HostError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
