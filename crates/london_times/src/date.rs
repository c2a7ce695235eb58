//! Calendar date queries.

use chrono::{Datelike, NaiveDate};

/// A possibly incomplete calendar date.
///
/// Lookups and conversions need all three parts; any missing part makes them
/// return nothing rather than guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateComponents {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateComponents {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    /// `YYYY-MM-DD` table key, if every part is present.
    ///
    /// The parts are formatted as given, without checking that they name a
    /// real day; such keys never appear in a table and simply miss.
    pub fn key(&self) -> Option<String> {
        let (year, month, day) = (self.year?, self.month?, self.day?);
        Some(format!("{:04}-{:02}-{:02}", year, month, day))
    }

    /// The calendar date, if every part is present and the day exists.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

impl From<NaiveDate> for DateComponents {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_zero_pads() {
        assert_eq!(
            DateComponents::new(2025, 1, 1).key().as_deref(),
            Some("2025-01-01")
        );
        assert_eq!(
            DateComponents::new(987, 12, 9).key().as_deref(),
            Some("0987-12-09")
        );
    }

    #[test]
    fn test_missing_part_has_no_key() {
        let partial = DateComponents {
            year: Some(2025),
            month: None,
            day: Some(1),
        };
        assert!(partial.key().is_none());
        assert!(partial.naive_date().is_none());
        assert!(DateComponents::default().key().is_none());
    }

    #[test]
    fn test_impossible_day_keys_but_has_no_date() {
        let feb30 = DateComponents::new(2025, 2, 30);
        assert_eq!(feb30.key().as_deref(), Some("2025-02-30"));
        assert!(feb30.naive_date().is_none());
    }

    #[test]
    fn test_from_naive_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let parts = DateComponents::from(date);
        assert_eq!(parts, DateComponents::new(2025, 7, 1));
        assert_eq!(parts.naive_date(), Some(date));
    }
}
