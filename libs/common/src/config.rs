//! Lookup configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// City label for the table (informational).
    #[serde(default = "default_city")]
    pub city: String,

    /// IANA zone the table's wall-clock strings are written in.
    #[serde(default = "default_zone")]
    pub zone: String,

    /// JSON file to use as the default resource instead of the bundled table.
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Per-prayer minute deltas applied after zone conversion.
    #[serde(default)]
    pub adjustments: Adjustments,
}

/// Signed minute offsets, one per prayer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustments {
    #[serde(default)]
    pub fajr: i64,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub dhuhr: i64,
    #[serde(default)]
    pub asr: i64,
    #[serde(default)]
    pub maghrib: i64,
    #[serde(default)]
    pub isha: i64,
}

impl Adjustments {
    /// `(name, minutes)` pairs in prayer order.
    pub fn entries(&self) -> [(&'static str, i64); 6] {
        [
            ("fajr", self.fajr),
            ("sunrise", self.sunrise),
            ("dhuhr", self.dhuhr),
            ("asr", self.asr),
            ("maghrib", self.maghrib),
            ("isha", self.isha),
        ]
    }

    /// Mutable slot for a prayer by canonical name.
    pub fn slot_mut(&mut self, name: &str) -> Option<&mut i64> {
        match name {
            "fajr" => Some(&mut self.fajr),
            "sunrise" => Some(&mut self.sunrise),
            "dhuhr" => Some(&mut self.dhuhr),
            "asr" => Some(&mut self.asr),
            "maghrib" => Some(&mut self.maghrib),
            "isha" => Some(&mut self.isha),
            _ => None,
        }
    }
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_city() -> String {
    "london".into()
}

fn default_zone() -> String {
    "Europe/London".into()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            zone: default_zone(),
            data_path: None,
            adjustments: Adjustments::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_london() {
        let config = LookupConfig::default();
        assert_eq!(config.city, "london");
        assert_eq!(config.zone, "Europe/London");
        assert!(config.data_path.is_none());
        assert_eq!(config.adjustments, Adjustments::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: LookupConfig =
            serde_json::from_str(r#"{"adjustments": {"fajr": 5}}"#).unwrap();
        assert_eq!(config.zone, "Europe/London");
        assert_eq!(config.adjustments.fajr, 5);
        assert_eq!(config.adjustments.isha, 0);
    }

    #[test]
    fn test_slot_mut_by_name() {
        let mut adj = Adjustments::default();
        *adj.slot_mut("isha").unwrap() = -3;
        assert_eq!(adj.isha, -3);
        assert!(adj.slot_mut("magrib").is_none());
        assert_eq!(adj.entries()[5], ("isha", -3));
    }
}
