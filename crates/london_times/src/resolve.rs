//! Whole-day conversion for the prayer-time engine.
//!
//! Minute adjustments are added to the converted UTC instants, never to the
//! wall-clock strings, so a delta near a DST change is still exactly that
//! many minutes.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use common::Adjustments;
use serde::Serialize;

use crate::convert::Converter;
use crate::date::DateComponents;
use crate::record::{DayRecord, Prayer};

/// All six times of one day as instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedDay {
    pub date: NaiveDate,
    pub fajr: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub isha: DateTime<Utc>,
}

impl ResolvedDay {
    pub fn time(&self, prayer: Prayer) -> DateTime<Utc> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }
}

/// Minute delta configured for a prayer.
pub fn adjustment_for(adjustments: &Adjustments, prayer: Prayer) -> i64 {
    match prayer {
        Prayer::Fajr => adjustments.fajr,
        Prayer::Sunrise => adjustments.sunrise,
        Prayer::Dhuhr => adjustments.dhuhr,
        Prayer::Asr => adjustments.asr,
        Prayer::Maghrib => adjustments.maghrib,
        Prayer::Isha => adjustments.isha,
    }
}

/// Convert every time in `record` for `date`, then apply `adjustments`.
///
/// Returns `None` if any single time fails to convert.
pub fn resolve(
    record: &DayRecord,
    date: &DateComponents,
    converter: &Converter,
    adjustments: &Adjustments,
) -> Option<ResolvedDay> {
    let at = |prayer: Prayer| -> Option<DateTime<Utc>> {
        let instant = converter.convert(record.time(prayer), date)?;
        let delta = Duration::try_minutes(adjustment_for(adjustments, prayer))?;
        instant.checked_add_signed(delta)
    };

    Some(ResolvedDay {
        date: date.naive_date()?,
        fajr: at(Prayer::Fajr)?,
        sunrise: at(Prayer::Sunrise)?,
        dhuhr: at(Prayer::Dhuhr)?,
        asr: at(Prayer::Asr)?,
        maghrib: at(Prayer::Maghrib)?,
        isha: at(Prayer::Isha)?,
    })
}
