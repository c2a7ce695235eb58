//! Wall-clock strings to absolute instants.
//!
//! Offsets always come from the zone's rule table for the date in question,
//! so the same `HH:mm` lands one hour apart in UTC across a GMT/BST boundary.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use common::Error;

use crate::date::DateComponents;
use crate::record::DayRecord;

/// Parse a 24-hour `HH:mm` string.
pub fn parse_hhmm(time: &str) -> Option<NaiveTime> {
    let mut parts = time.split(':');
    let (hour, minute) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Resolves city-local times in one fixed zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    zone: Tz,
}

impl Default for Converter {
    fn default() -> Self {
        Self::london()
    }
}

impl Converter {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn london() -> Self {
        Self::new(chrono_tz::Europe::London)
    }

    /// Build from an IANA identifier such as `"Europe/London"`.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        name.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|e| Error::Config(format!("unknown time zone {:?}: {}", name, e)))
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Interpret `time` on `date` in this zone and return the UTC instant.
    ///
    /// Returns `None` for a malformed time, an incomplete or impossible date,
    /// or a date-time chrono cannot represent.
    pub fn convert(&self, time: &str, date: &DateComponents) -> Option<DateTime<Utc>> {
        let time = parse_hhmm(time)?;
        let local = date.naive_date()?.and_time(time);
        self.resolve_local(&local)
    }

    /// Map a zone-naive date-time onto the timeline.
    ///
    /// In an autumn fold the earlier instant is taken. In a spring gap the
    /// pre-transition offset applies, which pushes the wall time forward by
    /// the size of the gap.
    pub fn resolve_local(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self.zone.from_local_datetime(local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => {
                let before = local.checked_sub_signed(Duration::days(1))?;
                let offset = self.zone.offset_from_utc_datetime(&before).fix();
                let utc =
                    local.checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))?;
                Some(Utc.from_utc_datetime(&utc))
            }
        }
    }
}

impl DayRecord {
    /// Interpret one of this record's strings as London time on `date`.
    pub fn parse_time(&self, time: &str, date: &DateComponents) -> Option<DateTime<Utc>> {
        Converter::london().convert(time, date)
    }
}
