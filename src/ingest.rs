//! Raw event supply.
//!
//! Feed retrieval and calendar parsing live upstream; this module only
//! defines the seam ([`EventSource`]) and two simple suppliers (JSON feed
//! files and CSV import) used by the CLI and the tests.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One raw calendar event as delivered by the upstream supplier.
///
/// `start`/`end` are unparsed timestamp strings (RFC3339, naive datetime or
/// bare date). A missing start drops the event; a missing end falls back to
/// `duration_minutes`, then to one hour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

/// Supplier of one roster member's raw events.
pub trait EventSource {
    fn person(&self) -> &str;
    /// A failing fetch skips this source; it never aborts the whole build.
    fn fetch(&self) -> Result<Vec<RawEvent>>;
}

/// In-memory source, used for tests and by the feed loaders below.
#[derive(Debug, Clone)]
pub struct MemorySource {
    person: String,
    events: Vec<RawEvent>,
}

impl MemorySource {
    pub fn new<S: Into<String>>(person: S, events: Vec<RawEvent>) -> Self {
        Self {
            person: person.into(),
            events,
        }
    }
}

impl EventSource for MemorySource {
    fn person(&self) -> &str {
        &self.person
    }
    fn fetch(&self) -> Result<Vec<RawEvent>> {
        Ok(self.events.clone())
    }
}

/// Lazy per-person JSON file source (a JSON array of [`RawEvent`]).
#[derive(Debug, Clone)]
pub struct FileSource {
    person: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new<S: Into<String>, P: AsRef<Path>>(person: S, path: P) -> Self {
        Self {
            person: person.into(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EventSource for FileSource {
    fn person(&self) -> &str {
        &self.person
    }

    fn fetch(&self) -> Result<Vec<RawEvent>> {
        let data = fs::read(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_slice(&data)
            .with_context(|| format!("parsing events for {}", self.person))
    }
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    person: String,
    #[serde(default)]
    events: Vec<RawEvent>,
}

/// Loads a combined feed file: `[{ "person": "...", "events": [...] }, ...]`.
pub fn load_feed_json<P: AsRef<Path>>(path: P) -> Result<Vec<MemorySource>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let entries: Vec<FeedEntry> =
        serde_json::from_slice(&data).with_context(|| "parsing feed json")?;
    Ok(entries
        .into_iter()
        .map(|e| MemorySource::new(e.person, e.events))
        .collect())
}

/// Import of raw events from CSV: header `person,title,start,end,duration_minutes`.
/// Empty cells mean "absent"; rows are grouped per person.
pub fn import_events_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MemorySource>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let mut grouped: BTreeMap<String, Vec<RawEvent>> = BTreeMap::new();
    for rec in rdr.records() {
        let rec = rec?;
        let person = rec.get(0).context("missing person")?.trim();
        if person.is_empty() {
            anyhow::bail!("invalid event row (empty person)");
        }
        let title = rec.get(1).unwrap_or("").trim().to_string();
        let start = non_empty(rec.get(2));
        let end = non_empty(rec.get(3));
        let duration_minutes = match non_empty(rec.get(4)) {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .with_context(|| format!("invalid duration_minutes for {person}"))?,
            ),
            None => None,
        };
        grouped.entry(person.to_string()).or_default().push(RawEvent {
            title,
            start,
            end,
            duration_minutes,
        });
    }
    Ok(grouped
        .into_iter()
        .map(|(person, events)| MemorySource::new(person, events))
        .collect())
}

fn non_empty(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
