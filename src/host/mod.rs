//! Host environment abstraction
//!
//! The browser needs a handful of capabilities from its surroundings:
//! user prompts, saving a downloaded file, and opening an external route.
//! Bundling them behind one trait keeps the state machines testable
//! without a terminal or a browser; [`mock::MockHost`] provides a scripted
//! implementation for tests.

pub mod mock;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors that can occur in host operations
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// IO error during a prompt or file save
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// Capabilities the record browser borrows from its environment
pub trait Host: Send + Sync {
    /// Blocking yes/no prompt
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be displayed or read.
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Prompt for a line of text; `Ok(None)` means the user cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be displayed or read.
    fn prompt_text(&self, prompt: &str, allow_empty: bool) -> Result<Option<String>>;

    /// Prompt to pick one of `items`; `Ok(None)` means the user cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be displayed or read.
    fn prompt_select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

    /// Persist `bytes` under `name`, returning where they landed
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save_file(&self, bytes: &[u8], name: &str) -> Result<PathBuf>;

    /// Hand a URL off to the environment (external navigation)
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot open the URL.
    fn open_route(&self, url: &str) -> Result<()>;
}

/// Terminal host backed by dialoguer prompts and the local filesystem
pub struct ConsoleHost {
    theme: dialoguer::theme::ColorfulTheme,
    download_dir: PathBuf,
}

impl ConsoleHost {
    /// Create a console host saving downloads into `download_dir`
    #[must_use]
    pub fn new(download_dir: impl AsRef<Path>) -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
            download_dir: download_dir.as_ref().to_path_buf(),
        }
    }
}

impl Host for ConsoleHost {
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        use dialoguer::Confirm;

        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| HostError::Io(io::Error::other(e)))
    }

    fn prompt_text(&self, prompt: &str, allow_empty: bool) -> Result<Option<String>> {
        use dialoguer::Input;

        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .map(Some)
            .map_err(|e| HostError::Io(io::Error::other(e)))
    }

    fn prompt_select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        use dialoguer::Select;

        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(|e| HostError::Io(io::Error::other(e)))
    }

    fn save_file(&self, bytes: &[u8], name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(name);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    fn open_route(&self, url: &str) -> Result<()> {
        open::that(url).map_err(HostError::Io)
    }
}
