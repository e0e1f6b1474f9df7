//! Search command - find records by name or date window

use crate::api::{RecordApi, SearchQuery};
use crate::browser::{BrowserSession, SelectionSet};
use crate::output;
use crate::RostrError;

type Result<T> = std::result::Result<T, RostrError>;

/// Execute the search command
///
/// # Errors
/// Returns an error if the query is empty or the search fails.
pub fn execute(api: &dyn RecordApi, query: SearchQuery, quiet: bool) -> Result<()> {
    let mut session = BrowserSession::new();
    let Some(ticket) = session.begin_search(query) else {
        return Err(RostrError::InvalidInput(
            "Provide a search term or both --from and --to".to_string(),
        ));
    };

    let result = api.search(&ticket.query);
    session.apply_search_result(&ticket, result);

    if let Some(message) = session.search_error() {
        eprintln!("{}", output::error_line(message, quiet));
        return Err(RostrError::InvalidInput(message.to_string()));
    }

    let hits = session.active_list();
    if !quiet {
        println!(
            "{}",
            output::search_summary(&query_label(&ticket.query), hits.len(), quiet)
        );
    }
    let selection = SelectionSet::new();
    for record in hits {
        println!("{}", output::record_row(record, &selection, quiet));
    }
    Ok(())
}

/// Human label for the summary line: the term, or the date window
fn query_label(query: &SearchQuery) -> String {
    if query.trimmed_term().is_empty() {
        match (query.from, query.to) {
            (Some(from), Some(to)) => format!("{from}..{to}"),
            _ => String::new(),
        }
    } else {
        query.trimmed_term().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{ApiCall, MockApi};
    use crate::api::Record;
    use chrono::NaiveDate;

    fn window() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )
    }

    #[test]
    fn test_dates_only_search_succeeds_with_hits() {
        let api = MockApi::new();
        api.push_search(Ok(vec![Record::new(7, "Greta".into())]));
        let (from, to) = window();
        let query = SearchQuery {
            term: String::new(),
            from: Some(from),
            to: Some(to),
        };

        execute(&api, query.clone(), true).unwrap();

        assert_eq!(api.calls(), vec![ApiCall::Search(query)]);
    }

    #[test]
    fn test_query_label_prefers_term_over_window() {
        let (from, to) = window();
        let dates_only = SearchQuery {
            term: "  ".into(),
            from: Some(from),
            to: Some(to),
        };
        assert_eq!(query_label(&dates_only), "2024-01-01..2024-06-30");
        assert_eq!(query_label(&SearchQuery::term(" ada ")), "ada");
    }
}
