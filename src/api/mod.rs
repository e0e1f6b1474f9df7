//! Client interface to the external record server
//!
//! The server is a pre-existing collaborator; this module only speaks its
//! HTTP contract. The [`RecordApi`] trait is the seam between the view
//! state machines and the transport, allowing the real HTTP client to be
//! swapped for [`MockApi`] in tests.

mod error;
mod http;
pub mod mock;
mod types;

pub use error::{ApiError, Result};
pub use http::HttpApi;
pub use mock::MockApi;
pub use types::{DatedRecord, ExportDoc, FilterResponse, Page, PageMeta, Record, SearchQuery};

use chrono::NaiveDate;
use std::path::Path;

/// Operations the record server exposes
///
/// Every method maps to exactly one endpoint. Implementations must not
/// retry; retry policy (there is none) belongs to the callers.
pub trait RecordApi {
    /// `GET /employees_pagi?page={page}&pageSize={page_size}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page>;

    /// `GET /search` with only the non-empty parameters of `query`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    fn search(&self, query: &SearchQuery) -> Result<Vec<Record>>;

    /// `DELETE /deleteemployees/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    fn delete_record(&self, id: u64) -> Result<()>;

    /// `POST /upload` with the file as multipart form field `file`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, on transport failure,
    /// or on a non-2xx status.
    fn upload(&self, file: &Path) -> Result<()>;

    /// `GET /get-table-data?page={page}&searchTerm={term}`
    ///
    /// Both parameters are always sent, even when the term is empty.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    fn export_table(&self, page: u32, search_term: &str) -> Result<ExportDoc>;

    /// `POST /filter-records` with JSON body `{from, to}`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    fn filter_by_dates(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DatedRecord>>;
}
