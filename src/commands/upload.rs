//! Upload command - submit a CSV of records

use crate::api::RecordApi;
use crate::output;
use crate::upload::{UploadState, Uploader};
use crate::RostrError;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, RostrError>;

/// Execute the upload command
///
/// # Errors
/// Returns an error if the file does not exist or the upload fails.
pub fn execute(api: &dyn RecordApi, file: PathBuf, quiet: bool) -> Result<()> {
    if !file.exists() {
        return Err(RostrError::InvalidInput(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let mut uploader = Uploader::new();
    uploader.choose(file);
    uploader.upload(api);

    let status = output::upload_status(uploader.state(), quiet);
    match uploader.state() {
        UploadState::Success => {
            if !quiet {
                println!("{status}");
            }
            Ok(())
        }
        _ => {
            eprintln!("{status}");
            Err(RostrError::InvalidInput("Upload failed".to_string()))
        }
    }
}
