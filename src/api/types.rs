//! Wire types for the record server
//!
//! These are pure data structures mirroring the server's JSON contract.
//! A `Page` is replaced wholesale on every successful fetch and never
//! merged with a previous page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single employee record as the server returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned unique id
    pub id: u64,
    /// Display name
    pub name: String,
}

impl Record {
    /// Create a record (mostly useful in tests and mocks)
    #[must_use]
    pub const fn new(id: u64, name: String) -> Self {
        Self { id, name }
    }
}

/// Pagination metadata attached to every page response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// 1-based page number of this response
    pub current_page: u32,
    /// Number of records per page
    pub page_size: u32,
    /// Total number of pages available
    pub total_pages: u32,
}

/// One page of records plus its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub records: Vec<Record>,
    pub meta: PageMeta,
}

/// Parameters for the free-text / date-range search endpoint
///
/// Only non-empty parameters are sent on the wire: the term is trimmed
/// before encoding and `from`/`to` are omitted individually when unset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub term: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl SearchQuery {
    /// Query with a term only
    #[must_use]
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            from: None,
            to: None,
        }
    }

    /// The search term with surrounding whitespace removed
    #[must_use]
    pub fn trimmed_term(&self) -> &str {
        self.term.trim()
    }

    /// Whether this query is worth sending at all
    ///
    /// A query needs a non-empty term or a complete from/to date range.
    /// Anything less is a no-op client-side and never reaches the network.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        !self.trimmed_term().is_empty() || (self.from.is_some() && self.to.is_some())
    }
}

/// A record returned by the date-range filter endpoint
///
/// The filter endpoint attaches the record's date as an opaque string;
/// the server's formatting is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedRecord {
    pub id: u64,
    pub name: String,
    pub date: String,
}

/// Response envelope of the filter endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResponse {
    pub records: Vec<DatedRecord>,
}

/// Binary export payload with the server's disposition metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDoc {
    /// Raw response body
    pub bytes: Vec<u8>,
    /// Value of the `Content-Disposition` header, if any
    pub content_disposition: Option<String>,
}
