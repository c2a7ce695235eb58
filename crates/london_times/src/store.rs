//! Date-indexed cache of the prayer-time document.
//!
//! One document is current at a time. Readers take an `Arc` snapshot under a
//! read lock, so a concurrent `load`/`clear` swaps the whole document and
//! never exposes a half-replaced one.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use common::{Adjustments, Error, LookupConfig};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::convert::Converter;
use crate::date::DateComponents;
use crate::record::{DayRecord, Prayer, RecordError};
use crate::resolve::{resolve, ResolvedDay};

/// A parsed document: `{ "city": ..., "times": { "<YYYY-MM-DD>": { ... } } }`.
pub type Document = Map<String, Value>;

/// The London table shipped with the crate.
pub const BUNDLED_TABLE: &str = include_str!("../data/london_prayer_times.json");

const TIMES_KEY: &str = "times";

/// Where the store's default document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSource {
    /// The embedded table.
    Bundled,
    /// A JSON file read on demand.
    File(PathBuf),
    /// No default; only explicitly loaded documents are served.
    None,
}

impl DefaultSource {
    /// Read and parse the default document. Failures are logged, not raised.
    fn fetch(&self) -> Option<Document> {
        let text = match self {
            DefaultSource::Bundled => BUNDLED_TABLE.to_string(),
            DefaultSource::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Default table {} unreadable: {}", path.display(), e);
                    return None;
                }
            },
            DefaultSource::None => return None,
        };

        match parse_document(&text) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Default table ignored: {}", e);
                None
            }
        }
    }
}

/// Outcome of a date lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(DayRecord),
    NotFound,
    Malformed(RecordError),
}

impl Lookup {
    pub fn found(self) -> Option<DayRecord> {
        match self {
            Lookup::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

#[derive(Debug, Clone)]
enum Slot {
    /// Nothing loaded yet; the next read tries the default source.
    Unloaded,
    /// Explicitly emptied; stays empty until the next load or clear.
    Invalidated,
    Loaded(Arc<Document>),
}

/// Owned lookup store. Share it by reference or behind an `Arc`.
#[derive(Debug)]
pub struct LookupStore {
    slot: RwLock<Slot>,
    source: DefaultSource,
}

impl Default for LookupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupStore {
    /// Store backed by the bundled table, loaded on first read.
    pub fn new() -> Self {
        Self::with_source(DefaultSource::Bundled)
    }

    pub fn with_source(source: DefaultSource) -> Self {
        Self {
            slot: RwLock::new(Slot::Unloaded),
            source,
        }
    }

    /// Store whose default comes from `config.data_path`, or the bundled table.
    pub fn from_config(config: &LookupConfig) -> Self {
        match &config.data_path {
            Some(path) => Self::with_source(DefaultSource::File(path.clone())),
            None => Self::new(),
        }
    }

    pub fn source(&self) -> &DefaultSource {
        &self.source
    }

    /// Parse `raw` and make it the current document.
    ///
    /// On error the current document is left untouched.
    pub fn load_str(&self, raw: &str) -> Result<(), Error> {
        let doc = parse_document(raw)?;
        self.load_document(doc);
        Ok(())
    }

    /// Make an already-parsed document current.
    pub fn load_document(&self, doc: Document) {
        debug!("Loaded prayer-time document ({} dates)", count_dates(&doc));
        *self.write() = Slot::Loaded(Arc::new(doc));
    }

    /// Drop the current document and reload the default source.
    ///
    /// If the default is unavailable the store is left unloaded, and later
    /// reads will try the default again.
    pub fn clear(&self) {
        let fetched = self.source.fetch();
        let mut slot = self.write();
        *slot = match fetched {
            Some(doc) => {
                debug!("Reloaded default table ({} dates)", count_dates(&doc));
                Slot::Loaded(Arc::new(doc))
            }
            None => Slot::Unloaded,
        };
    }

    /// Drop the current document without falling back to the default.
    pub fn invalidate(&self) {
        *self.write() = Slot::Invalidated;
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.read(), Slot::Loaded(_))
    }

    /// Current document, loading the default first if nothing has been loaded.
    pub fn snapshot(&self) -> Option<Arc<Document>> {
        match &*self.read() {
            Slot::Loaded(doc) => return Some(Arc::clone(doc)),
            Slot::Invalidated => return None,
            Slot::Unloaded => {}
        }

        // Read the default without holding the lock, then re-check: a load,
        // clear or invalidate that landed meanwhile takes precedence.
        let fetched = self.source.fetch();
        let mut slot = self.write();
        match &*slot {
            Slot::Loaded(doc) => return Some(Arc::clone(doc)),
            Slot::Invalidated => return None,
            Slot::Unloaded => {}
        }

        let doc = Arc::new(fetched?);
        debug!("Lazily loaded default table ({} dates)", count_dates(&doc));
        *slot = Slot::Loaded(Arc::clone(&doc));
        Some(doc)
    }

    /// Look up the record for `date`.
    pub fn get(&self, date: &DateComponents) -> Lookup {
        let Some(key) = date.key() else {
            return Lookup::NotFound;
        };
        let Some(doc) = self.snapshot() else {
            debug!("No prayer-time document available for {}", key);
            return Lookup::NotFound;
        };

        let times = match doc.get(TIMES_KEY) {
            Some(Value::Object(times)) => times,
            _ => {
                warn!("Prayer-time document has no `{}` object", TIMES_KEY);
                return Lookup::Malformed(RecordError::MissingTimes);
            }
        };

        match times.get(&key) {
            None => {
                debug!("No prayer times for {}", key);
                Lookup::NotFound
            }
            Some(entry) => match DayRecord::from_value(&key, entry) {
                Ok(record) => Lookup::Found(record),
                Err(e) => {
                    warn!("Skipping prayer times for {}: {}", key, e);
                    Lookup::Malformed(e)
                }
            },
        }
    }

    /// Look up `date`, treating any failure as absence.
    pub fn get_times(&self, date: &DateComponents) -> Option<DayRecord> {
        self.get(date).found()
    }

    /// Look up `date`, turning absence and bad records into errors.
    pub fn require(&self, date: &DateComponents) -> Result<DayRecord, Error> {
        let label = date.key().unwrap_or_else(|| format!("{:?}", date));
        match self.get(date) {
            Lookup::Found(record) => Ok(record),
            Lookup::NotFound => Err(Error::MissingData(format!("no prayer times for {}", label))),
            Lookup::Malformed(e) => Err(Error::InvalidData(format!("{}: {}", label, e))),
        }
    }

    /// Look up `date` and convert every time to an adjusted instant.
    pub fn resolve(
        &self,
        date: &DateComponents,
        converter: &Converter,
        adjustments: &Adjustments,
    ) -> Option<ResolvedDay> {
        let record = self.get_times(date)?;
        resolve(&record, date, converter, adjustments)
    }

    /// Convenience for a single prayer's instant.
    pub fn instant(
        &self,
        date: &DateComponents,
        prayer: Prayer,
        converter: &Converter,
    ) -> Option<DateTime<Utc>> {
        let record = self.get_times(date)?;
        converter.convert(record.time(prayer), date)
    }

    /// The document's `city` label, if it has one.
    pub fn city(&self) -> Option<String> {
        self.snapshot()?
            .get("city")
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }

    /// Every date key in the current document, sorted.
    pub fn dates(&self) -> Vec<String> {
        let Some(doc) = self.snapshot() else {
            return Vec::new();
        };
        let mut dates: Vec<String> = match doc.get(TIMES_KEY) {
            Some(Value::Object(times)) => times.keys().cloned().collect(),
            _ => Vec::new(),
        };
        dates.sort();
        dates
    }

    fn read(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parse source text into a document, requiring an object at the root.
pub fn parse_document(raw: &str) -> Result<Document, Error> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::InvalidData(format!("Failed to parse JSON: {}", e)))?;
    match value {
        Value::Object(doc) => Ok(doc),
        _ => Err(Error::InvalidData("JSON root must be an object".into())),
    }
}

fn count_dates(doc: &Document) -> usize {
    doc.get(TIMES_KEY)
        .and_then(Value::as_object)
        .map_or(0, Map::len)
}
