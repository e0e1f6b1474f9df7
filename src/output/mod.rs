//! Output formatting for CLI display
//!
//! This module provides utilities for formatting output in the CLI,
//! including record rows, paging lines and upload status messages.

use crate::api::Record;
use crate::browser::SelectionSet;
use crate::upload::UploadState;
use colored::Colorize;

/// Format a record row with its selection marker
#[must_use]
pub fn record_row(record: &Record, selection: &SelectionSet, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", record.id, record.name);
    }

    let marker = if selection.contains(record.id) {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    format!("  {marker} {:>4}  {}", record.id, record.name)
}

/// Format the "Page N of M" footer
#[must_use]
pub fn page_line(current_page: u32, total_pages: u32, quiet: bool) -> String {
    if quiet {
        format!("{current_page}/{total_pages}")
    } else {
        format!("Page {current_page} of {total_pages}").bold().to_string()
    }
}

/// Format the header shown above search results
#[must_use]
pub fn search_summary(term: &str, hits: usize, quiet: bool) -> String {
    if quiet {
        format!("{hits}")
    } else {
        format!(
            "  {} result(s) for '{}'",
            hits.to_string().bold(),
            term.cyan()
        )
    }
}

/// Format a fetch or search error for display
#[must_use]
pub fn error_line(message: &str, quiet: bool) -> String {
    if quiet {
        message.to_string()
    } else {
        message.red().to_string()
    }
}

/// Format the upload status line
#[must_use]
pub fn upload_status(state: &UploadState, quiet: bool) -> String {
    let text = match state {
        UploadState::Idle => "No file selected",
        UploadState::FileChosen(path) => {
            return if quiet {
                path.display().to_string()
            } else {
                format!("Ready to upload: {}", path.display())
            };
        }
        UploadState::Uploading => "Uploading...",
        UploadState::Success => "File uploaded successfully",
        UploadState::Failed(_) => "File upload failed",
    };

    if quiet {
        return text.to_string();
    }
    match state {
        UploadState::Success => text.green().to_string(),
        UploadState::Failed(_) => text.red().to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(id: u64, name: &str) -> Record {
        Record {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_record_row_quiet_is_tab_separated() {
        let selection = SelectionSet::new();
        assert_eq!(record_row(&record(7, "Ada"), &selection, true), "7\tAda");
    }

    #[test]
    fn test_record_row_marks_selected() {
        let mut selection = SelectionSet::new();
        selection.toggle(7);

        let row = record_row(&record(7, "Ada"), &selection, false);
        assert!(row.contains("[x]"));

        let row = record_row(&record(8, "Grace"), &selection, false);
        assert!(row.contains("[ ]"));
    }

    #[test]
    fn test_page_line() {
        assert_eq!(page_line(2, 9, true), "2/9");
        assert!(page_line(2, 9, false).contains("Page 2 of 9"));
    }

    #[test]
    fn test_upload_status_texts() {
        assert_eq!(upload_status(&UploadState::Idle, true), "No file selected");
        assert_eq!(
            upload_status(&UploadState::FileChosen(PathBuf::from("a.csv")), true),
            "a.csv"
        );
        assert_eq!(
            upload_status(&UploadState::Failed("500".into()), true),
            "File upload failed"
        );
    }
}
