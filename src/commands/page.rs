//! Page command - print one page of records

use crate::api::RecordApi;
use crate::browser::{BrowserSession, SelectionSet};
use crate::output;
use crate::RostrError;

type Result<T> = std::result::Result<T, RostrError>;

/// Execute the page command
///
/// # Errors
/// Returns an error if the page cannot be fetched.
pub fn execute(api: &dyn RecordApi, page: u32, page_size: u32, quiet: bool) -> Result<()> {
    let mut session = BrowserSession::new();
    let ticket = session.begin_load_page(page, page_size);
    let result = api.fetch_page(ticket.page, ticket.page_size);
    session.apply_page_result(&ticket, result);

    if let Some(message) = session.page_error() {
        eprintln!("{}", output::error_line(message, quiet));
        return Err(RostrError::InvalidInput(message.to_string()));
    }

    let selection = SelectionSet::new();
    for record in session.active_list() {
        println!("{}", output::record_row(record, &selection, quiet));
    }
    if let Some(meta) = session.page_meta() {
        println!("{}", output::page_line(meta.current_page, meta.total_pages, quiet));
    }
    Ok(())
}
