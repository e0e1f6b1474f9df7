//! Blocking HTTP implementation of [`RecordApi`]

use super::error::{ApiError, Result};
use super::types::{DatedRecord, ExportDoc, FilterResponse, Page, Record, SearchQuery};
use super::RecordApi;
use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Url;
use std::path::Path;
use std::time::Duration;

/// Request timeout for every call; nothing here is long-running
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one server base URL
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    /// Create a client for the given base URL (e.g. `http://localhost:3000`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the underlying
    /// client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{path}: {e}")))
    }

    fn page_url(&self, page: u32, page_size: u32) -> Result<Url> {
        let mut url = self.endpoint("employees_pagi")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string());
        Ok(url)
    }

    fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        let mut url = self.endpoint("search")?;
        {
            let mut pairs = url.query_pairs_mut();
            let term = query.trimmed_term();
            if !term.is_empty() {
                pairs.append_pair("q", term);
            }
            if let Some(from) = query.from {
                pairs.append_pair("from", &from.to_string());
            }
            if let Some(to) = query.to {
                pairs.append_pair("to", &to.to_string());
            }
        }
        Ok(url)
    }

    fn export_url(&self, page: u32, search_term: &str) -> Result<Url> {
        let mut url = self.endpoint("get-table-data")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("searchTerm", search_term);
        Ok(url)
    }
}

/// Map any non-2xx status to `ApiError::Status`
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

impl RecordApi for HttpApi {
    fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page> {
        let url = self.page_url(page, page_size)?;
        let response = check_status(self.client.get(url).send()?)?;
        response
            .json::<Page>()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<Record>> {
        let url = self.search_url(query)?;
        let response = check_status(self.client.get(url).send()?)?;
        response
            .json::<Vec<Record>>()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    fn delete_record(&self, id: u64) -> Result<()> {
        let url = self.endpoint(&format!("deleteemployees/{id}"))?;
        check_status(self.client.delete(url).send()?)?;
        Ok(())
    }

    fn upload(&self, file: &Path) -> Result<()> {
        let url = self.endpoint("upload")?;
        let form = reqwest::blocking::multipart::Form::new().file("file", file)?;
        check_status(self.client.post(url).multipart(form).send()?)?;
        Ok(())
    }

    fn export_table(&self, page: u32, search_term: &str) -> Result<ExportDoc> {
        let url = self.export_url(page, search_term)?;
        let response = check_status(self.client.get(url).send()?)?;

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes()?.to_vec();

        Ok(ExportDoc {
            bytes,
            content_disposition,
        })
    }

    fn filter_by_dates(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DatedRecord>> {
        let url = self.endpoint("filter-records")?;
        let body = serde_json::json!({
            "from": from.to_string(),
            "to": to.to_string(),
        });
        let response = check_status(self.client.post(url).json(&body).send()?)?;
        let filtered: FilterResponse = response
            .json()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(filtered.records)
    }
}
