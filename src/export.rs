//! Table export trigger
//!
//! One fire-and-forget operation: fetch the binary export for the current
//! page and search term, then save it under the server-provided filename.
//! Failures are logged and swallowed; unlike the list and search errors
//! there is deliberately no user-visible error surface here.

use crate::api::RecordApi;
use crate::host::Host;
use std::path::PathBuf;
use tracing::{debug, error};

/// Fallback when the server sends no usable `Content-Disposition`
pub const DEFAULT_EXPORT_FILENAME: &str = "employee-list.pdf";

/// Extract the filename from a `Content-Disposition` header value
///
/// Takes everything after `filename=` verbatim; anything without that
/// marker falls back to [`DEFAULT_EXPORT_FILENAME`].
#[must_use]
pub fn filename_from_disposition(disposition: Option<&str>) -> &str {
    disposition
        .and_then(|value| value.split_once("filename="))
        .map_or(DEFAULT_EXPORT_FILENAME, |(_, name)| name)
}

/// Busy-guarded export widget
#[derive(Debug, Default)]
pub struct ExportTrigger {
    busy: bool,
}

impl ExportTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an export round trip is in progress
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Request the export for `page`/`search_term` and save the result
    ///
    /// Returns the saved path on success and `None` on any failure or
    /// while already busy. Errors never surface to the user; the trigger
    /// simply re-enables itself.
    pub fn request_export(
        &mut self,
        api: &dyn RecordApi,
        host: &dyn Host,
        page: u32,
        search_term: &str,
    ) -> Option<PathBuf> {
        if self.busy {
            return None;
        }
        self.busy = true;

        let saved = match api.export_table(page, search_term) {
            Ok(doc) => {
                let name = filename_from_disposition(doc.content_disposition.as_deref());
                match host.save_file(&doc.bytes, name) {
                    Ok(path) => {
                        debug!(file = %path.display(), "export saved");
                        Some(path)
                    }
                    Err(err) => {
                        error!(%err, "saving export failed");
                        None
                    }
                }
            }
            Err(err) => {
                error!(page, %err, "export download failed");
                None
            }
        };

        self.busy = false;
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::api::{ApiError, ExportDoc};
    use crate::host::mock::MockHost;

    #[test]
    fn test_filename_defaults_without_disposition() {
        assert_eq!(filename_from_disposition(None), DEFAULT_EXPORT_FILENAME);
        assert_eq!(
            filename_from_disposition(Some("attachment")),
            DEFAULT_EXPORT_FILENAME
        );
    }

    #[test]
    fn test_filename_is_substring_after_marker() {
        assert_eq!(
            filename_from_disposition(Some("attachment; filename=roster.pdf")),
            "roster.pdf"
        );
    }

    #[test]
    fn test_export_saves_under_server_name() {
        let api = MockApi::new();
        api.push_export(Ok(ExportDoc {
            bytes: b"%PDF".to_vec(),
            content_disposition: Some("attachment; filename=march.pdf".into()),
        }));
        let host = MockHost::default();
        let mut trigger = ExportTrigger::new();

        let saved = trigger.request_export(&api, &host, 2, "smith");

        assert_eq!(saved, Some(PathBuf::from("march.pdf")));
        assert_eq!(host.saved_files(), vec![("march.pdf".into(), b"%PDF".to_vec())]);
        assert!(!trigger.is_busy());
    }

    #[test]
    fn test_export_uses_default_name_without_disposition() {
        let api = MockApi::new();
        api.push_export(Ok(ExportDoc {
            bytes: vec![1, 2, 3],
            content_disposition: None,
        }));
        let host = MockHost::default();
        let mut trigger = ExportTrigger::new();

        trigger.request_export(&api, &host, 1, "");

        assert_eq!(host.saved_files()[0].0, DEFAULT_EXPORT_FILENAME);
    }

    #[test]
    fn test_export_failure_is_silent_and_re_enables() {
        let api = MockApi::new();
        api.push_export(Err(ApiError::Status { status: 500 }));
        let host = MockHost::default();
        let mut trigger = ExportTrigger::new();

        let saved = trigger.request_export(&api, &host, 1, "");

        assert!(saved.is_none());
        assert!(host.saved_files().is_empty());
        assert!(!trigger.is_busy());
    }
}
