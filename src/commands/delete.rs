//! Delete command - remove records by id after confirmation

use crate::api::RecordApi;
use crate::host::Host;
use crate::RostrError;
use tracing::error;

type Result<T> = std::result::Result<T, RostrError>;

/// Prompt shown before a bulk delete
pub const CONFIRM_DELETE_PROMPT: &str = "Do you want to remove selected records?";

/// Delete `ids` one request at a time, pressing on past failures
///
/// Returns the number of records the server confirmed deleted. Individual
/// failures are logged; a batch is never aborted halfway.
pub fn delete_batch(api: &dyn RecordApi, ids: &[u64]) -> usize {
    let mut deleted = 0;
    for &id in ids {
        match api.delete_record(id) {
            Ok(()) => deleted += 1,
            Err(err) => error!(id, %err, "delete failed"),
        }
    }
    deleted
}

/// Execute the delete command
///
/// # Errors
/// Returns an error if the confirmation prompt fails.
pub fn execute(
    api: &dyn RecordApi,
    host: &dyn Host,
    ids: &[u64],
    yes: bool,
    quiet: bool,
) -> Result<()> {
    if ids.is_empty() {
        return Err(RostrError::InvalidInput("No record ids given".to_string()));
    }

    if !yes && !host.prompt_confirm(CONFIRM_DELETE_PROMPT, false)? {
        if !quiet {
            println!("Delete cancelled.");
        }
        return Ok(());
    }

    let deleted = delete_batch(api, ids);
    if !quiet {
        println!("Deleted {deleted} of {} record(s)", ids.len());
    }
    Ok(())
}
