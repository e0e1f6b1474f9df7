//! CSV upload state machine
//!
//! Holds exactly one candidate file at a time; choosing again replaces the
//! previous choice. No client-side validation happens before submission,
//! the server is trusted to reject invalid content. Success and failure
//! are display states only and never block choosing a new file.

use crate::api::RecordApi;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// State of the uploader
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    /// A file has been picked but not submitted yet
    FileChosen(PathBuf),
    /// Submission in flight
    Uploading,
    Success,
    /// Failed; the reason stays internal, the user sees a generic message
    Failed(String),
}

/// Single-file uploader widget
#[derive(Debug, Default)]
pub struct Uploader {
    state: UploadState,
}

impl Uploader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &UploadState {
        &self.state
    }

    /// The currently chosen file, if any
    #[must_use]
    pub fn chosen_file(&self) -> Option<&Path> {
        match &self.state {
            UploadState::FileChosen(path) => Some(path),
            _ => None,
        }
    }

    /// Pick a file, replacing any previous choice
    ///
    /// Allowed from every state except mid-upload.
    pub fn choose(&mut self, path: PathBuf) {
        if matches!(self.state, UploadState::Uploading) {
            return;
        }
        self.state = UploadState::FileChosen(path);
    }

    /// Submit the chosen file
    ///
    /// A no-op unless a file is chosen. The state afterwards is `Success`
    /// or `Failed`; either way a new file may be chosen next.
    pub fn upload(&mut self, api: &dyn RecordApi) {
        let UploadState::FileChosen(path) = &self.state else {
            return;
        };
        let path = path.clone();

        self.state = UploadState::Uploading;
        self.state = match api.upload(&path) {
            Ok(()) => {
                debug!(file = %path.display(), "file uploaded");
                UploadState::Success
            }
            Err(err) => {
                error!(file = %path.display(), %err, "upload failed");
                UploadState::Failed(err.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::api::ApiError;

    #[test]
    fn test_choosing_replaces_previous_file() {
        let mut uploader = Uploader::new();
        uploader.choose(PathBuf::from("first.csv"));
        uploader.choose(PathBuf::from("second.csv"));

        assert_eq!(
            uploader.chosen_file(),
            Some(Path::new("second.csv")),
            "second drop must replace, not append"
        );
    }

    #[test]
    fn test_upload_without_file_is_a_no_op() {
        let api = MockApi::new();
        let mut uploader = Uploader::new();

        uploader.upload(&api);

        assert_eq!(*uploader.state(), UploadState::Idle);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_successful_upload() {
        let api = MockApi::new();
        let mut uploader = Uploader::new();
        uploader.choose(PathBuf::from("people.csv"));

        uploader.upload(&api);

        assert_eq!(*uploader.state(), UploadState::Success);
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn test_failed_upload_keeps_reason_internal() {
        let api = MockApi::new();
        api.fail_upload(ApiError::Status { status: 400 });
        let mut uploader = Uploader::new();
        uploader.choose(PathBuf::from("people.csv"));

        uploader.upload(&api);

        assert!(matches!(uploader.state(), UploadState::Failed(_)));
    }

    #[test]
    fn test_upload_from_terminal_states_keeps_them() {
        let api = MockApi::new();
        let mut uploader = Uploader::new();
        uploader.choose(PathBuf::from("people.csv"));
        uploader.upload(&api);
        assert_eq!(*uploader.state(), UploadState::Success);

        // Submitting again without a new file must not reset the state
        uploader.upload(&api);
        assert_eq!(*uploader.state(), UploadState::Success);
        assert_eq!(api.calls().len(), 1);

        api.fail_upload(ApiError::Status { status: 400 });
        uploader.choose(PathBuf::from("bad.csv"));
        uploader.upload(&api);
        assert!(matches!(uploader.state(), UploadState::Failed(_)));

        uploader.upload(&api);
        assert!(matches!(uploader.state(), UploadState::Failed(_)));
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn test_new_file_may_be_chosen_after_failure() {
        let api = MockApi::new();
        api.fail_upload(ApiError::Status { status: 400 });
        let mut uploader = Uploader::new();
        uploader.choose(PathBuf::from("bad.csv"));
        uploader.upload(&api);

        uploader.choose(PathBuf::from("good.csv"));
        uploader.upload(&api);

        assert_eq!(*uploader.state(), UploadState::Success);
    }
}
