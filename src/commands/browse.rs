//! Browse command - interactive paging, searching and selection

use crate::api::{RecordApi, SearchQuery};
use crate::browser::{BrowserSession, SelectionSet};
use crate::commands::delete::{delete_batch, CONFIRM_DELETE_PROMPT};
use crate::export::ExportTrigger;
use crate::host::Host;
use crate::output;
use crate::upload::Uploader;
use crate::RostrError;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, RostrError>;

/// One entry in the dynamic action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Previous,
    Search,
    ClearSearch,
    Toggle,
    ToggleAll,
    RemoveSelected,
    Upload,
    Export,
    EditRecord,
    AddRecord,
    Reload,
    Quit,
}

/// Execute the browse command
///
/// Drives the interactive loop: render the active list, offer the actions
/// that are valid in the current state, apply the chosen one, repeat.
/// Cancelling the menu quits.
///
/// # Errors
/// Returns an error if a prompt fails; server errors are shown in the
/// list view instead of aborting the loop.
pub fn execute(
    api: &dyn RecordApi,
    host: &dyn Host,
    start_page: u32,
    page_size: u32,
    web_url: &str,
    quiet: bool,
) -> Result<()> {
    let mut session = BrowserSession::new();
    let mut uploader = Uploader::new();
    let mut exporter = ExportTrigger::new();

    load_page(api, &mut session, start_page, page_size);

    loop {
        render(&session, quiet);

        let actions = available_actions(&session);
        let labels: Vec<String> = actions
            .iter()
            .map(|action| label(*action, &session))
            .collect();
        let Some(choice) = host.prompt_select("Action", &labels)? else {
            break;
        };

        match actions[choice] {
            Action::Next => {
                if let Some((page, size)) = session.next_page() {
                    load_page(api, &mut session, page, size);
                }
            }
            Action::Previous => {
                if let Some((page, size)) = session.previous_page() {
                    load_page(api, &mut session, page, size);
                }
            }
            Action::Search => {
                if let Some(query) = prompt_search_query(host, quiet)? {
                    run_search(api, &mut session, query);
                }
            }
            Action::ClearSearch => session.clear_search(),
            Action::Toggle => {
                if let Some(input) = host.prompt_text("Record id", false)? {
                    match input.trim().parse::<u64>() {
                        Ok(id) if session.toggle_select(id) => {}
                        Ok(id) => {
                            if !quiet {
                                println!("Record {id} is not in the current list");
                            }
                        }
                        Err(_) => {
                            if !quiet {
                                println!("Not a record id: {input}");
                            }
                        }
                    }
                }
            }
            Action::ToggleAll => session.toggle_select_all(),
            Action::RemoveSelected => {
                if host.prompt_confirm(CONFIRM_DELETE_PROMPT, false)? {
                    let ids = session.take_selection();
                    let deleted = delete_batch(api, &ids);
                    if !quiet {
                        println!("Deleted {deleted} of {} record(s)", ids.len());
                    }
                    refresh(api, &mut session, page_size);
                }
            }
            Action::Upload => {
                if let Some(input) = host.prompt_text("CSV file to upload", false)? {
                    uploader.choose(PathBuf::from(input));
                    uploader.upload(api);
                    if !quiet {
                        println!("{}", output::upload_status(uploader.state(), quiet));
                    }
                    refresh(api, &mut session, page_size);
                }
            }
            Action::Export => {
                let page = session.page_meta().map_or(1, |meta| meta.current_page);
                match exporter.request_export(api, host, page, session.search_term()) {
                    Some(path) => {
                        if !quiet {
                            println!("Saved {}", path.display());
                        }
                    }
                    None => {
                        if !quiet {
                            println!("Export failed");
                        }
                    }
                }
            }
            Action::EditRecord => {
                if let Some(input) = host.prompt_text("Record id", false)? {
                    match input.trim().parse::<u64>() {
                        Ok(id) => host.open_route(&format!("{web_url}/employee/edit/{id}"))?,
                        Err(_) => {
                            if !quiet {
                                println!("Not a record id: {input}");
                            }
                        }
                    }
                }
            }
            Action::AddRecord => host.open_route(&format!("{web_url}/employee/create"))?,
            Action::Reload => refresh(api, &mut session, page_size),
            Action::Quit => break,
        }
    }
    Ok(())
}

fn load_page(api: &dyn RecordApi, session: &mut BrowserSession, page: u32, page_size: u32) {
    let ticket = session.begin_load_page(page, page_size);
    let result = api.fetch_page(ticket.page, ticket.page_size);
    session.apply_page_result(&ticket, result);
}

fn refresh(api: &dyn RecordApi, session: &mut BrowserSession, page_size: u32) {
    let (page, size) = session
        .current_page_request()
        .unwrap_or((1, page_size));
    load_page(api, session, page, size);
}

/// Collect a search query: a term plus an optional from/to date window
///
/// Returns `None` when any prompt is cancelled or a date does not parse;
/// a query with neither term nor complete window is filtered out later by
/// the session's gating.
fn prompt_search_query(host: &dyn Host, quiet: bool) -> Result<Option<SearchQuery>> {
    let Some(term) = host.prompt_text("Search term (optional)", true)? else {
        return Ok(None);
    };
    let Some(from_input) = host.prompt_text("From date (YYYY-MM-DD, optional)", true)? else {
        return Ok(None);
    };
    let Some(to_input) = host.prompt_text("To date (YYYY-MM-DD, optional)", true)? else {
        return Ok(None);
    };

    let (from, to) = match (parse_date(&from_input), parse_date(&to_input)) {
        (Ok(from), Ok(to)) => (from, to),
        (Err(message), _) | (_, Err(message)) => {
            if !quiet {
                println!("{message}");
            }
            return Ok(None);
        }
    };
    Ok(Some(SearchQuery { term, from, to }))
}

/// Parse a date prompt answer; empty input means "no bound"
fn parse_date(input: &str) -> std::result::Result<Option<chrono::NaiveDate>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<chrono::NaiveDate>()
        .map(Some)
        .map_err(|_| format!("Not a date (YYYY-MM-DD): {input}"))
}

fn run_search(api: &dyn RecordApi, session: &mut BrowserSession, query: SearchQuery) {
    let Some(ticket) = session.begin_search(query) else {
        return;
    };
    let result = api.search(&ticket.query);
    session.apply_search_result(&ticket, result);
}

/// Actions valid in the session's current state, in menu order
fn available_actions(session: &BrowserSession) -> Vec<Action> {
    let mut actions = Vec::new();

    if session.next_page().is_some() {
        actions.push(Action::Next);
    }
    if session.previous_page().is_some() {
        actions.push(Action::Previous);
    }
    actions.push(Action::Search);
    if session.showing_search_results() || !session.search_term().is_empty() {
        actions.push(Action::ClearSearch);
    }
    if !session.active_list().is_empty() {
        actions.push(Action::Toggle);
        actions.push(Action::ToggleAll);
    }
    if session.selection_len() > 0 {
        actions.push(Action::RemoveSelected);
    }
    actions.extend([
        Action::Upload,
        Action::Export,
        Action::EditRecord,
        Action::AddRecord,
        Action::Reload,
        Action::Quit,
    ]);
    actions
}

fn label(action: Action, session: &BrowserSession) -> String {
    match action {
        Action::Next => "Next page".to_string(),
        Action::Previous => "Previous page".to_string(),
        Action::Search => "Search".to_string(),
        Action::ClearSearch => "Clear search".to_string(),
        Action::Toggle => "Toggle selection".to_string(),
        Action::ToggleAll => "Select all / none".to_string(),
        Action::RemoveSelected => format!("Remove selected ({})", session.selection_len()),
        Action::Upload => "Upload CSV".to_string(),
        Action::Export => "Download PDF".to_string(),
        Action::EditRecord => "Edit record".to_string(),
        Action::AddRecord => "Add record".to_string(),
        Action::Reload => "Reload".to_string(),
        Action::Quit => "Quit".to_string(),
    }
}

fn render(session: &BrowserSession, quiet: bool) {
    if let Some(message) = session.page_error() {
        println!("{}", output::error_line(message, quiet));
        return;
    }
    if let Some(message) = session.search_error() {
        println!("{}", output::error_line(message, quiet));
    }

    let mut selection = SelectionSet::new();
    for id in session.selected_ids() {
        selection.toggle(id);
    }
    if session.showing_search_results() && !quiet {
        println!(
            "{}",
            output::search_summary(session.search_term(), session.active_list().len(), quiet)
        );
    }
    for record in session.active_list() {
        println!("{}", output::record_row(record, &selection, quiet));
    }
    if !session.showing_search_results()
        && let Some(meta) = session.page_meta()
    {
        println!(
            "{}",
            output::page_line(meta.current_page, meta.total_pages, quiet)
        );
    }
}
