//! Filter command - fetch records inside a date window

use crate::api::RecordApi;
use crate::RostrError;
use chrono::NaiveDate;

type Result<T> = std::result::Result<T, RostrError>;

/// Execute the filter command
///
/// # Errors
/// Returns an error if the window is inverted or the request fails.
pub fn execute(api: &dyn RecordApi, from: NaiveDate, to: NaiveDate, quiet: bool) -> Result<()> {
    if from > to {
        return Err(RostrError::InvalidInput(format!(
            "Invalid date window: {from} is after {to}"
        )));
    }

    let records = api.filter_by_dates(from, to)?;
    if !quiet {
        println!("{} record(s) between {from} and {to}", records.len());
    }
    for record in &records {
        if quiet {
            println!("{}\t{}\t{}", record.id, record.name, record.date);
        } else {
            println!("  {:>4}  {}  {}", record.id, record.name, record.date);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;

    #[test]
    fn test_inverted_window_is_rejected_without_a_request() {
        let api = MockApi::new();
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert!(execute(&api, from, to, true).is_err());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_window_is_forwarded() {
        let api = MockApi::new();
        api.push_filter(Ok(vec![]));
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        execute(&api, from, to, true).unwrap();

        assert_eq!(api.calls().len(), 1);
    }
}
