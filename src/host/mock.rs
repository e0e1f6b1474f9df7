//! Mock host environment for testing

use super::{Host, Result};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

/// Scripted [`Host`] that records every outward effect
///
/// Confirmations return a fixed answer; text and select prompts pop
/// pre-loaded answers (an empty queue reads as a cancel). Saved files and
/// opened routes are captured for assertions.
pub struct MockHost {
    confirm_answer: bool,
    text_answers: Mutex<VecDeque<String>>,
    select_answers: Mutex<VecDeque<usize>>,
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    opened: Mutex<Vec<String>>,
}

impl MockHost {
    /// Host that answers every confirmation with `answer`
    #[must_use]
    pub fn confirming(answer: bool) -> Self {
        Self {
            confirm_answer: answer,
            text_answers: Mutex::new(VecDeque::new()),
            select_answers: Mutex::new(VecDeque::new()),
            saved: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Queue an answer for the next text prompt
    pub fn push_text(&self, answer: impl Into<String>) {
        self.text_answers.lock().unwrap().push_back(answer.into());
    }

    /// Queue an answer for the next select prompt
    pub fn push_select(&self, index: usize) {
        self.select_answers.lock().unwrap().push_back(index);
    }

    /// Files saved so far as `(name, bytes)` pairs
    #[must_use]
    pub fn saved_files(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }

    /// Routes opened so far
    #[must_use]
    pub fn opened_routes(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::confirming(true)
    }
}

impl Host for MockHost {
    fn prompt_confirm(&self, _prompt: &str, _default: bool) -> Result<bool> {
        Ok(self.confirm_answer)
    }

    fn prompt_text(&self, _prompt: &str, _allow_empty: bool) -> Result<Option<String>> {
        Ok(self.text_answers.lock().unwrap().pop_front())
    }

    fn prompt_select(&self, _prompt: &str, _items: &[String]) -> Result<Option<usize>> {
        Ok(self.select_answers.lock().unwrap().pop_front())
    }

    fn save_file(&self, bytes: &[u8], name: &str) -> Result<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(name))
    }

    fn open_route(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
