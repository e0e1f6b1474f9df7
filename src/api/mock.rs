//! Mock record server for testing
//!
//! Returns scripted responses and records every call, so the view state
//! machines can be exercised without a running server.

use super::error::{ApiError, Result};
use super::types::{DatedRecord, ExportDoc, Page, Record, SearchQuery};
use super::RecordApi;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One observed call against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FetchPage { page: u32, page_size: u32 },
    Search(SearchQuery),
    Delete(u64),
    Upload(PathBuf),
    Export { page: u32, search_term: String },
    Filter { from: NaiveDate, to: NaiveDate },
}

/// Mock [`RecordApi`] with per-endpoint response queues
///
/// Responses are consumed in FIFO order; an exhausted queue yields an
/// `InvalidResponse` error so a test that under-scripts fails loudly.
#[derive(Default)]
pub struct MockApi {
    page_responses: Mutex<VecDeque<Result<Page>>>,
    search_responses: Mutex<VecDeque<Result<Vec<Record>>>>,
    delete_failures: Mutex<Vec<u64>>,
    upload_failure: Mutex<Option<ApiError>>,
    export_responses: Mutex<VecDeque<Result<ExportDoc>>>,
    filter_responses: Mutex<VecDeque<Result<Vec<DatedRecord>>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page response
    pub fn push_page(&self, response: Result<Page>) {
        self.page_responses.lock().unwrap().push_back(response);
    }

    /// Queue a search response
    pub fn push_search(&self, response: Result<Vec<Record>>) {
        self.search_responses.lock().unwrap().push_back(response);
    }

    /// Queue an export response
    pub fn push_export(&self, response: Result<ExportDoc>) {
        self.export_responses.lock().unwrap().push_back(response);
    }

    /// Queue a filter response
    pub fn push_filter(&self, response: Result<Vec<DatedRecord>>) {
        self.filter_responses.lock().unwrap().push_back(response);
    }

    /// Make deletes of the given id fail with a 500
    pub fn fail_delete(&self, id: u64) {
        self.delete_failures.lock().unwrap().push(id);
    }

    /// Make the next upload fail with the given error
    pub fn fail_upload(&self, error: ApiError) {
        *self.upload_failure.lock().unwrap() = Some(error);
    }

    /// Every call observed so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Observed calls matching a predicate
    #[must_use]
    pub fn calls_where(&self, predicate: impl Fn(&ApiCall) -> bool) -> Vec<ApiCall> {
        self.calls().into_iter().filter(|c| predicate(c)).collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn exhausted(endpoint: &str) -> ApiError {
        ApiError::InvalidResponse(format!("mock has no scripted response for {endpoint}"))
    }
}

impl RecordApi for MockApi {
    fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page> {
        self.record(ApiCall::FetchPage { page, page_size });
        self.page_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("fetch_page")))
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<Record>> {
        self.record(ApiCall::Search(query.clone()));
        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("search")))
    }

    fn delete_record(&self, id: u64) -> Result<()> {
        self.record(ApiCall::Delete(id));
        if self.delete_failures.lock().unwrap().contains(&id) {
            Err(ApiError::Status { status: 500 })
        } else {
            Ok(())
        }
    }

    fn upload(&self, file: &Path) -> Result<()> {
        self.record(ApiCall::Upload(file.to_path_buf()));
        match self.upload_failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn export_table(&self, page: u32, search_term: &str) -> Result<ExportDoc> {
        self.record(ApiCall::Export {
            page,
            search_term: search_term.to_string(),
        });
        self.export_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("export_table")))
    }

    fn filter_by_dates(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DatedRecord>> {
        self.record(ApiCall::Filter { from, to });
        self.filter_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("filter_by_dates")))
    }
}

/// Build a page for tests: ids are taken in order, names are `R{id}`
#[must_use]
pub fn page_of(ids: &[u64], current_page: u32, page_size: u32, total_pages: u32) -> Page {
    Page {
        records: ids
            .iter()
            .map(|&id| Record::new(id, format!("R{id}")))
            .collect(),
        meta: super::PageMeta {
            current_page,
            page_size,
            total_pages,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_replays_scripted_pages_in_order() {
        let api = MockApi::new();
        api.push_page(Ok(page_of(&[1, 2], 1, 5, 3)));
        api.push_page(Err(ApiError::Status { status: 502 }));

        assert!(api.fetch_page(1, 5).is_ok());
        assert!(matches!(
            api.fetch_page(2, 5),
            Err(ApiError::Status { status: 502 })
        ));
    }

    #[test]
    fn test_mock_fails_loudly_when_unscripted() {
        let api = MockApi::new();
        assert!(matches!(
            api.search(&SearchQuery::term("x")),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_mock_records_calls() {
        let api = MockApi::new();
        let _ = api.delete_record(7);
        let _ = api.delete_record(8);

        assert_eq!(api.calls(), vec![ApiCall::Delete(7), ApiCall::Delete(8)]);
    }

    #[test]
    fn test_mock_delete_failure_is_per_id() {
        let api = MockApi::new();
        api.fail_delete(7);

        assert!(api.delete_record(7).is_err());
        assert!(api.delete_record(8).is_ok());
    }
}
