//! Record browser session management
//!
//! This module implements the core view state machine for listing,
//! searching, selecting and deleting records. The session is deliberately
//! transport-free: every network operation is split into a `begin_*` call
//! that hands out a generation-stamped ticket and an `apply_*` call that
//! feeds the transport's result back in. A response carrying an outdated
//! ticket is discarded, which makes response ordering deterministic even
//! when a slow request is superseded by a faster one.
//!
//! # State machines
//!
//! ```text
//! Page:    Loading ──→ Loaded ⟲ (re-entrant, implicit busy)
//!              └─────→ Errored ──(fresh load)──→ Loading
//!
//! Search:  Idle/Loaded ⇄ Errored      (independent of the page machine)
//! ```
//!
//! The *active list* shown to the user is the search result set when the
//! last applied search produced at least one record; otherwise it is the
//! current page. The selection set is reconciled against the active list
//! every time the active list changes.

use crate::api::{ApiError, Page, PageMeta, Record, SearchQuery};
use crate::browser::selection::SelectionSet;
use tracing::error;

/// The one user-visible message for page and search fetch failures
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

/// State of the page fetch machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// No page loaded yet (or recovering from an error)
    Loading,
    /// A page is loaded and displayed
    Loaded,
    /// The last fetch failed; only a fresh load exits this state
    Errored(String),
}

/// Ticket for an in-flight page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTicket {
    generation: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Ticket for an in-flight search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    pub query: SearchQuery,
}

/// Whether an `apply_*` call changed session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response was current and has been applied
    Updated,
    /// A newer request was issued meanwhile; the response was dropped
    Stale,
}

/// View state machine for the record browser
#[derive(Debug, Default)]
pub struct BrowserSession {
    page: Option<Page>,
    page_state: Option<PageState>,
    page_generation: u64,

    search_results: Vec<Record>,
    search_term: String,
    search_error: Option<String>,
    search_generation: u64,

    selection: SelectionSet,
}

impl BrowserSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            page_state: Some(PageState::Loading),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Page machine
    // ------------------------------------------------------------------

    /// Start a page load, superseding any in-flight one
    ///
    /// From `Loaded` the session stays displayable while the request is in
    /// flight; from the initial or errored state it shows as loading.
    pub fn begin_load_page(&mut self, page: u32, page_size: u32) -> PageTicket {
        if !matches!(self.page_state, Some(PageState::Loaded)) {
            self.page_state = Some(PageState::Loading);
        }
        self.page_generation += 1;
        PageTicket {
            generation: self.page_generation,
            page,
            page_size,
        }
    }

    /// Feed a page response back into the session
    ///
    /// Stale tickets are discarded without touching any state. On success
    /// the page is replaced wholesale and the top-level error cleared; on
    /// failure the user-visible state becomes [`FETCH_ERROR_MESSAGE`] and
    /// the cause goes to the diagnostic channel only.
    pub fn apply_page_result(
        &mut self,
        ticket: &PageTicket,
        result: Result<Page, ApiError>,
    ) -> Applied {
        if ticket.generation != self.page_generation {
            return Applied::Stale;
        }

        match result {
            Ok(page) => {
                self.page = Some(page);
                self.page_state = Some(PageState::Loaded);
                self.reconcile_selection();
            }
            Err(err) => {
                error!(page = ticket.page, %err, "page fetch failed");
                self.page_state = Some(PageState::Errored(FETCH_ERROR_MESSAGE.to_string()));
            }
        }
        Applied::Updated
    }

    #[must_use]
    pub fn page_state(&self) -> &PageState {
        // new() always seeds the state; Option only exists for Default
        self.page_state.as_ref().unwrap_or(&PageState::Loading)
    }

    #[must_use]
    pub fn page_error(&self) -> Option<&str> {
        match self.page_state() {
            PageState::Errored(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn page_meta(&self) -> Option<PageMeta> {
        self.page.as_ref().map(|p| p.meta)
    }

    /// Request for the following page, if the Next control is available
    ///
    /// Next is unavailable exactly when `current_page == total_pages`.
    /// The page size is taken from the last successful page; clamping out
    /// of range values is the server's responsibility.
    #[must_use]
    pub fn next_page(&self) -> Option<(u32, u32)> {
        let meta = self.page_meta()?;
        (meta.current_page < meta.total_pages).then_some((meta.current_page + 1, meta.page_size))
    }

    /// Request for the preceding page, if the Previous control is available
    ///
    /// Previous is unavailable exactly when `current_page == 1`.
    #[must_use]
    pub fn previous_page(&self) -> Option<(u32, u32)> {
        let meta = self.page_meta()?;
        (meta.current_page > 1).then_some((meta.current_page - 1, meta.page_size))
    }

    /// Request re-fetching the page currently displayed
    #[must_use]
    pub fn current_page_request(&self) -> Option<(u32, u32)> {
        let meta = self.page_meta()?;
        Some((meta.current_page, meta.page_size))
    }

    // ------------------------------------------------------------------
    // Search machine
    // ------------------------------------------------------------------

    /// Start a search, superseding any in-flight one
    ///
    /// Returns `None` without touching the network when the query has
    /// neither a term nor a complete date range; see
    /// [`SearchQuery::is_satisfiable`].
    pub fn begin_search(&mut self, query: SearchQuery) -> Option<SearchTicket> {
        if !query.is_satisfiable() {
            return None;
        }
        self.search_generation += 1;
        Some(SearchTicket {
            generation: self.search_generation,
            query,
        })
    }

    /// Feed a search response back into the session
    ///
    /// An empty result set clears the search results so the primary page
    /// stays visible. A failure sets the search error to
    /// [`FETCH_ERROR_MESSAGE`] and also clears the results.
    pub fn apply_search_result(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<Record>, ApiError>,
    ) -> Applied {
        if ticket.generation != self.search_generation {
            return Applied::Stale;
        }

        match result {
            Ok(records) => {
                self.search_term = ticket.query.trimmed_term().to_string();
                self.search_results = records;
                self.search_error = None;
            }
            Err(err) => {
                error!(term = %ticket.query.trimmed_term(), %err, "search failed");
                self.search_results.clear();
                self.search_error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        self.reconcile_selection();
        Applied::Updated
    }

    /// Drop search results and error, reverting the active list to the page
    pub fn clear_search(&mut self) {
        self.search_results.clear();
        self.search_term.clear();
        self.search_error = None;
        self.reconcile_selection();
    }

    #[must_use]
    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    /// Term of the last applied search (used by the export trigger)
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    // ------------------------------------------------------------------
    // Active list and selection
    // ------------------------------------------------------------------

    /// Whether the search result set currently supersedes the page
    ///
    /// Every applied search carries a term or a date window (enforced by
    /// [`Self::begin_search`]), so a non-empty result set is sufficient.
    /// Empty results, errors and `clear_search` all empty the set, which
    /// reverts the active list to the page.
    #[must_use]
    pub fn showing_search_results(&self) -> bool {
        !self.search_results.is_empty()
    }

    /// The list the user currently sees
    #[must_use]
    pub fn active_list(&self) -> &[Record] {
        if self.showing_search_results() {
            &self.search_results
        } else {
            self.page.as_ref().map_or(&[], |p| &p.records)
        }
    }

    /// Toggle selection of one record
    ///
    /// Ids outside the active list are rejected; returns whether the id
    /// was accepted.
    pub fn toggle_select(&mut self, id: u64) -> bool {
        if self.active_list().iter().any(|r| r.id == id) {
            self.selection.toggle(id);
            true
        } else {
            false
        }
    }

    /// Select the whole active list, or clear if it is fully selected
    pub fn toggle_select_all(&mut self) {
        let all: Vec<u64> = self.active_list().iter().map(|r| r.id).collect();
        self.selection.toggle_all(&all);
    }

    #[must_use]
    pub fn is_selected(&self, id: u64) -> bool {
        self.selection.contains(id)
    }

    #[must_use]
    pub fn selected_ids(&self) -> Vec<u64> {
        self.selection.ids()
    }

    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Drain the selection for a bulk delete
    ///
    /// Clearing happens here, before any DELETE is issued, so the
    /// selection is empty regardless of how the individual deletes fare.
    pub fn take_selection(&mut self) -> Vec<u64> {
        self.selection.take()
    }

    /// Drop selected ids that are no longer visible in the active list
    fn reconcile_selection(&mut self) {
        let visible: Vec<u64> = self.active_list().iter().map(|r| r.id).collect();
        self.selection.retain(|id| visible.contains(&id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::page_of;
    use crate::api::Record;

    fn loaded_session(ids: &[u64], current: u32, total: u32) -> BrowserSession {
        let mut session = BrowserSession::new();
        let ticket = session.begin_load_page(current, 5);
        session.apply_page_result(&ticket, Ok(page_of(ids, current, 5, total)));
        session
    }

    fn records(ids: &[u64]) -> Vec<Record> {
        ids.iter().map(|&id| Record::new(id, format!("R{id}"))).collect()
    }

    #[test]
    fn test_session_starts_loading_with_empty_list() {
        let session = BrowserSession::new();
        assert_eq!(*session.page_state(), PageState::Loading);
        assert!(session.active_list().is_empty());
        assert!(session.page_meta().is_none());
    }

    #[test]
    fn test_successful_load_replaces_page() {
        let session = loaded_session(&[1, 2], 2, 3);

        assert_eq!(*session.page_state(), PageState::Loaded);
        assert_eq!(session.active_list().len(), 2);
        assert_eq!(session.page_meta().unwrap().current_page, 2);
        // Page 2 of 3: both controls available
        assert_eq!(session.previous_page(), Some((1, 5)));
        assert_eq!(session.next_page(), Some((3, 5)));
    }

    #[test]
    fn test_previous_disabled_on_first_page() {
        let session = loaded_session(&[1], 1, 3);
        assert!(session.previous_page().is_none());
        assert_eq!(session.next_page(), Some((2, 5)));
    }

    #[test]
    fn test_next_disabled_on_last_page() {
        let session = loaded_session(&[9], 3, 3);
        assert_eq!(session.previous_page(), Some((2, 5)));
        assert!(session.next_page().is_none());
    }

    #[test]
    fn test_failed_load_sets_generic_error() {
        let mut session = BrowserSession::new();
        let ticket = session.begin_load_page(1, 5);
        session.apply_page_result(&ticket, Err(ApiError::Status { status: 500 }));

        assert_eq!(session.page_error(), Some(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn test_fresh_load_exits_errored_state() {
        let mut session = BrowserSession::new();
        let ticket = session.begin_load_page(1, 5);
        session.apply_page_result(&ticket, Err(ApiError::Status { status: 500 }));

        let ticket = session.begin_load_page(1, 5);
        assert_eq!(*session.page_state(), PageState::Loading);
        session.apply_page_result(&ticket, Ok(page_of(&[1], 1, 5, 1)));
        assert_eq!(*session.page_state(), PageState::Loaded);
        assert!(session.page_error().is_none());
    }

    #[test]
    fn test_stale_page_response_is_discarded() {
        let mut session = BrowserSession::new();
        let slow = session.begin_load_page(1, 5);
        let fast = session.begin_load_page(2, 5);

        assert_eq!(
            session.apply_page_result(&fast, Ok(page_of(&[3, 4], 2, 5, 3))),
            Applied::Updated
        );
        // The superseded response arrives late and must not overwrite
        assert_eq!(
            session.apply_page_result(&slow, Ok(page_of(&[1, 2], 1, 5, 3))),
            Applied::Stale
        );
        assert_eq!(session.page_meta().unwrap().current_page, 2);
    }

    #[test]
    fn test_stale_search_response_is_discarded() {
        let mut session = loaded_session(&[1], 1, 1);
        let slow = session.begin_search(SearchQuery::term("a")).unwrap();
        let fast = session.begin_search(SearchQuery::term("b")).unwrap();

        session.apply_search_result(&fast, Ok(records(&[20])));
        assert_eq!(
            session.apply_search_result(&slow, Ok(records(&[10]))),
            Applied::Stale
        );
        assert_eq!(session.active_list()[0].id, 20);
    }

    #[test]
    fn test_blank_search_is_a_no_op() {
        let mut session = loaded_session(&[1], 1, 1);
        assert!(session.begin_search(SearchQuery::default()).is_none());
        assert!(session.begin_search(SearchQuery::term("   ")).is_none());
    }

    #[test]
    fn test_search_results_supersede_page() {
        let mut session = loaded_session(&[1, 2], 1, 1);
        let ticket = session.begin_search(SearchQuery::term("R9")).unwrap();
        session.apply_search_result(&ticket, Ok(records(&[9])));

        assert!(session.showing_search_results());
        assert_eq!(session.active_list(), records(&[9]).as_slice());
        // The page is still there underneath
        assert_eq!(session.page_meta().unwrap().current_page, 1);
    }

    #[test]
    fn test_dates_only_search_results_are_shown() {
        let mut session = loaded_session(&[1, 2], 1, 1);
        let query = SearchQuery {
            term: String::new(),
            from: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            to: chrono::NaiveDate::from_ymd_opt(2024, 6, 30),
        };

        let ticket = session.begin_search(query).unwrap();
        session.apply_search_result(&ticket, Ok(records(&[7])));

        assert!(session.showing_search_results());
        assert_eq!(session.active_list().len(), 1);
        assert_eq!(session.active_list()[0].id, 7);
        // The export scope stays empty; only the term feeds into it
        assert_eq!(session.search_term(), "");
    }

    #[test]
    fn test_empty_search_result_leaves_page_visible() {
        let mut session = loaded_session(&[1, 2], 1, 1);
        let ticket = session.begin_search(SearchQuery::term("nobody")).unwrap();
        session.apply_search_result(&ticket, Ok(vec![]));

        assert!(!session.showing_search_results());
        assert_eq!(session.active_list().len(), 2);
        assert!(session.search_error().is_none());
    }

    #[test]
    fn test_failed_search_sets_error_and_clears_results() {
        let mut session = loaded_session(&[1, 2], 1, 1);

        let ticket = session.begin_search(SearchQuery::term("a")).unwrap();
        session.apply_search_result(&ticket, Ok(records(&[9])));

        let ticket = session.begin_search(SearchQuery::term("b")).unwrap();
        session.apply_search_result(&ticket, Err(ApiError::Status { status: 502 }));

        assert_eq!(session.search_error(), Some(FETCH_ERROR_MESSAGE));
        assert!(!session.showing_search_results());
        assert_eq!(session.active_list().len(), 2);
    }

    #[test]
    fn test_clear_search_reverts_to_page() {
        let mut session = loaded_session(&[1, 2], 1, 1);
        let ticket = session.begin_search(SearchQuery::term("R9")).unwrap();
        session.apply_search_result(&ticket, Ok(records(&[9])));

        session.clear_search();
        assert!(!session.showing_search_results());
        assert_eq!(session.active_list().len(), 2);
        assert_eq!(session.search_term(), "");
    }

    #[test]
    fn test_toggle_select_rejects_invisible_id() {
        let mut session = loaded_session(&[1, 2], 1, 1);

        assert!(session.toggle_select(1));
        assert!(!session.toggle_select(99));
        assert_eq!(session.selected_ids(), vec![1]);
    }

    #[test]
    fn test_toggle_select_all_tracks_active_list() {
        let mut session = loaded_session(&[1, 2], 1, 1);
        let ticket = session.begin_search(SearchQuery::term("x")).unwrap();
        session.apply_search_result(&ticket, Ok(records(&[10, 11, 12])));

        session.toggle_select_all();
        assert_eq!(session.selected_ids(), vec![10, 11, 12]);

        session.toggle_select_all();
        assert!(session.selected_ids().is_empty());
    }

    #[test]
    fn test_selection_reconciled_on_page_change() {
        let mut session = loaded_session(&[1, 2, 3], 1, 2);
        session.toggle_select(1);
        session.toggle_select(3);

        let ticket = session.begin_load_page(2, 5);
        session.apply_page_result(&ticket, Ok(page_of(&[3, 4, 5], 2, 5, 2)));

        // Only the id still visible survives the list switch
        assert_eq!(session.selected_ids(), vec![3]);
    }

    #[test]
    fn test_selection_reconciled_when_search_supersedes() {
        let mut session = loaded_session(&[1, 2], 1, 1);
        session.toggle_select(1);
        session.toggle_select(2);

        let ticket = session.begin_search(SearchQuery::term("x")).unwrap();
        session.apply_search_result(&ticket, Ok(records(&[2, 9])));

        assert_eq!(session.selected_ids(), vec![2]);
    }

    #[test]
    fn test_take_selection_clears_immediately() {
        let mut session = loaded_session(&[1, 2], 1, 1);
        session.toggle_select(1);
        session.toggle_select(2);

        assert_eq!(session.take_selection(), vec![1, 2]);
        assert!(session.selected_ids().is_empty());
    }
}
