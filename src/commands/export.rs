//! Export command - download the table export as a file

use crate::api::RecordApi;
use crate::export::ExportTrigger;
use crate::host::Host;
use crate::RostrError;

type Result<T> = std::result::Result<T, RostrError>;

/// Execute the export command
///
/// # Errors
/// Returns an error if the export cannot be downloaded or saved.
pub fn execute(
    api: &dyn RecordApi,
    host: &dyn Host,
    page: u32,
    term: &str,
    quiet: bool,
) -> Result<()> {
    let mut trigger = ExportTrigger::new();
    match trigger.request_export(api, host, page, term) {
        Some(path) => {
            if !quiet {
                println!("Saved {}", path.display());
            }
            Ok(())
        }
        None => Err(RostrError::InvalidInput("Export failed".to_string())),
    }
}
