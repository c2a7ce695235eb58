//! One city-day of prayer-time strings.
//!
//! Records arrive as loosely typed JSON objects. Decoding checks every field
//! and reports all problems at once; the one field with two accepted spellings
//! (`maghrib` / `magrib`) is folded into its canonical name here and nowhere
//! else.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Canonical key for the sunset prayer.
pub const MAGHRIB: &str = "maghrib";
/// Alternate spelling accepted on input only.
pub const MAGRIB_ALT: &str = "magrib";

/// The six daily times carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Canonical JSON key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Sunrise => "sunrise",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => MAGHRIB,
            Prayer::Isha => "isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    NotString,
}

/// A rejected field, named by its canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub kind: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::Missing => write!(f, "{} (missing)", self.field),
            IssueKind::NotString => write!(f, "{} (not a string)", self.field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("document has no `times` object")]
    MissingTimes,

    #[error("entry for {0} is not an object")]
    NotAnObject(String),

    #[error("invalid fields: {}", join_issues(.0))]
    Fields(Vec<FieldIssue>),
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prayer-time strings for one date, as published.
///
/// Times are kept verbatim (`HH:mm`, 24-hour, city-local); turning them into
/// instants is the converter's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    date: String,
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

impl DayRecord {
    pub fn new(
        date: impl Into<String>,
        fajr: impl Into<String>,
        sunrise: impl Into<String>,
        dhuhr: impl Into<String>,
        asr: impl Into<String>,
        maghrib: impl Into<String>,
        isha: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            fajr: fajr.into(),
            sunrise: sunrise.into(),
            dhuhr: dhuhr.into(),
            asr: asr.into(),
            maghrib: maghrib.into(),
            isha: isha.into(),
        }
    }

    /// Decode from any JSON value; non-objects are rejected with `label` as the key.
    pub fn from_value(label: &str, value: &Value) -> Result<Self, RecordError> {
        match value.as_object() {
            Some(obj) => Self::from_object(obj),
            None => Err(RecordError::NotAnObject(label.to_string())),
        }
    }

    /// Decode from a JSON object, collecting every missing or non-string field.
    pub fn from_object(obj: &Map<String, Value>) -> Result<Self, RecordError> {
        let mut issues = Vec::new();

        let date = required_str(obj, "date", &mut issues);
        let fajr = required_str(obj, "fajr", &mut issues);
        let sunrise = required_str(obj, "sunrise", &mut issues);
        let dhuhr = required_str(obj, "dhuhr", &mut issues);
        let asr = required_str(obj, "asr", &mut issues);
        let maghrib = maghrib_str(obj, &mut issues);
        let isha = required_str(obj, "isha", &mut issues);

        match (date, fajr, sunrise, dhuhr, asr, maghrib, isha) {
            (
                Some(date),
                Some(fajr),
                Some(sunrise),
                Some(dhuhr),
                Some(asr),
                Some(maghrib),
                Some(isha),
            ) => Ok(Self::new(date, fajr, sunrise, dhuhr, asr, maghrib, isha)),
            _ => Err(RecordError::Fields(issues)),
        }
    }

    /// Decode, discarding the diagnostics.
    pub fn try_parse(obj: &Map<String, Value>) -> Option<Self> {
        Self::from_object(obj).ok()
    }

    pub fn date(&self) -> &str {
        &self.date
    }
    pub fn fajr(&self) -> &str {
        &self.fajr
    }
    pub fn sunrise(&self) -> &str {
        &self.sunrise
    }
    pub fn dhuhr(&self) -> &str {
        &self.dhuhr
    }
    pub fn asr(&self) -> &str {
        &self.asr
    }
    pub fn maghrib(&self) -> &str {
        &self.maghrib
    }
    pub fn isha(&self) -> &str {
        &self.isha
    }

    /// Wall-clock string for a prayer.
    pub fn time(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<&'a str> {
    match obj.get(field) {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            issues.push(FieldIssue {
                field,
                kind: IssueKind::NotString,
            });
            None
        }
        None => {
            issues.push(FieldIssue {
                field,
                kind: IssueKind::Missing,
            });
            None
        }
    }
}

/// `maghrib` wins when it is a string; otherwise `magrib` is tried.
fn maghrib_str<'a>(obj: &'a Map<String, Value>, issues: &mut Vec<FieldIssue>) -> Option<&'a str> {
    let canonical = obj.get(MAGHRIB);
    let alternate = obj.get(MAGRIB_ALT);

    for candidate in [canonical, alternate].into_iter().flatten() {
        if let Value::String(s) = candidate {
            return Some(s.as_str());
        }
    }

    let kind = if canonical.is_some() || alternate.is_some() {
        IssueKind::NotString
    } else {
        IssueKind::Missing
    };
    issues.push(FieldIssue {
        field: MAGHRIB,
        kind,
    });
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn jan_first(maghrib_key: &str) -> Map<String, Value> {
        let mut obj = object(json!({
            "date": "2025-01-01",
            "fajr": "06:26",
            "sunrise": "08:03",
            "dhuhr": "12:09",
            "asr": "13:45",
            "isha": "17:41"
        }));
        obj.insert(maghrib_key.to_string(), json!("16:04"));
        obj
    }

    #[test]
    fn test_decodes_canonical_spelling() {
        let record = DayRecord::from_object(&jan_first("maghrib")).unwrap();
        assert_eq!(record.date(), "2025-01-01");
        assert_eq!(record.fajr(), "06:26");
        assert_eq!(record.maghrib(), "16:04");
        assert_eq!(record.isha(), "17:41");
    }

    #[test]
    fn test_alternate_spelling_normalizes() {
        let canonical = DayRecord::from_object(&jan_first("maghrib")).unwrap();
        let alternate = DayRecord::from_object(&jan_first("magrib")).unwrap();
        assert_eq!(alternate.maghrib(), "16:04");
        assert_eq!(canonical, alternate);

        let out = serde_json::to_value(&alternate).unwrap();
        assert_eq!(out["maghrib"], "16:04");
        assert!(out.get("magrib").is_none());
    }

    #[test]
    fn test_canonical_spelling_wins_when_both_present() {
        let mut obj = jan_first("maghrib");
        obj.insert("magrib".into(), json!("16:10"));
        let record = DayRecord::from_object(&obj).unwrap();
        assert_eq!(record.maghrib(), "16:04");
    }

    #[test]
    fn test_mistyped_canonical_falls_back_to_alternate() {
        let mut obj = jan_first("magrib");
        obj.insert("maghrib".into(), json!(1604));
        let record = DayRecord::from_object(&obj).unwrap();
        assert_eq!(record.maghrib(), "16:04");
    }

    #[test]
    fn test_missing_maghrib_rejected() {
        let mut obj = jan_first("maghrib");
        obj.remove("maghrib");
        let err = DayRecord::from_object(&obj).unwrap_err();
        assert_eq!(
            err,
            RecordError::Fields(vec![FieldIssue {
                field: "maghrib",
                kind: IssueKind::Missing,
            }])
        );
        assert!(DayRecord::try_parse(&obj).is_none());
    }

    #[test]
    fn test_reports_every_bad_field() {
        let obj = object(json!({
            "date": "2025-01-01",
            "fajr": 626,
            "sunrise": "08:03",
            "asr": null,
            "magrib": false,
            "isha": "17:41"
        }));
        let err = DayRecord::from_object(&obj).unwrap_err();
        let RecordError::Fields(issues) = &err else {
            panic!("expected field issues, got {err:?}");
        };
        let names: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(names, vec!["fajr", "dhuhr", "asr", "maghrib"]);
        assert_eq!(issues[1].kind, IssueKind::Missing);
        assert_eq!(issues[3].kind, IssueKind::NotString);
        assert_eq!(
            err.to_string(),
            "invalid fields: fajr (not a string), dhuhr (missing), asr (not a string), maghrib (not a string)"
        );
    }

    #[test]
    fn test_non_object_value_rejected() {
        let err = DayRecord::from_value("2025-01-01", &json!(["06:26"])).unwrap_err();
        assert_eq!(err, RecordError::NotAnObject("2025-01-01".into()));
    }

    #[test]
    fn test_time_by_prayer() {
        let record = DayRecord::from_object(&jan_first("maghrib")).unwrap();
        let times: Vec<_> = Prayer::ALL.iter().map(|p| record.time(*p)).collect();
        assert_eq!(times, vec!["06:26", "08:03", "12:09", "13:45", "16:04", "17:41"]);
        assert_eq!(Prayer::Maghrib.to_string(), "maghrib");
    }
}
