//! London prayer-time lookup table.
//!
//! Serves published daily prayer times for one city from a date-indexed JSON
//! document and converts the wall-clock strings into UTC instants using the
//! city's zone rules (GMT in winter, BST in summer).
//!
//! The crate ships a 2025 London table that is loaded on first use; callers
//! can swap in their own document at any time.

pub mod convert;
pub mod date;
pub mod record;
pub mod resolve;
pub mod store;

pub use convert::{parse_hhmm, Converter};
pub use date::DateComponents;
pub use record::{DayRecord, FieldIssue, IssueKind, Prayer, RecordError};
pub use resolve::{resolve, ResolvedDay};
pub use store::{parse_document, DefaultSource, Document, Lookup, LookupStore};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::Adjustments;

    #[test]
    fn test_bundled_table_parses_every_day() {
        let store = LookupStore::new();
        let dates = store.dates();
        assert_eq!(dates.len(), 365);
        assert_eq!(dates.first().map(String::as_str), Some("2025-01-01"));
        assert_eq!(dates.last().map(String::as_str), Some("2025-12-31"));
        assert_eq!(store.city().as_deref(), Some("london"));

        for key in &dates {
            let date = chrono::NaiveDate::parse_from_str(key, "%Y-%m-%d").unwrap();
            let day = store.resolve(
                &DateComponents::from(date),
                &Converter::london(),
                &Adjustments::default(),
            );
            let day = day.unwrap_or_else(|| panic!("{key} should resolve"));
            assert!(day.fajr < day.sunrise && day.maghrib < day.isha, "{key}");
        }
    }

    #[test]
    fn test_bundled_summer_day_is_bst() {
        let store = LookupStore::new();
        let date = DateComponents::new(2025, 7, 1);
        let record = store.get_times(&date).unwrap();
        assert_eq!(record.sunrise(), "04:48");

        let sunrise = store.instant(&date, Prayer::Sunrise, &Converter::london());
        assert_eq!(sunrise, Some(Utc.with_ymd_and_hms(2025, 7, 1, 3, 48, 0).unwrap()));
    }
}
