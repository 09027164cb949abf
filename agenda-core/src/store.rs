//! Append-only event storage.
//!
//! Events live in memory in insertion order. When the store is backed by a
//! data file, every create rewrites the whole file as a JSON array before
//! the event becomes visible. Writes go to a temporary file in the same
//! directory which is then renamed over the data file, so a crash mid-write
//! never leaves a truncated file behind.
//!
//! Creates are serialized on `write_lock`. The `events` lock is only held
//! long enough to copy or append, never across disk I/O, so readers are not
//! stalled by a rewrite.

use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AgendaError, AgendaResult};
use crate::event::{Event, NewEvent};

pub const MISSING_DATE: &str = "datum is verplicht";

pub struct EventStore {
    path: Option<PathBuf>,
    events: Mutex<Vec<Event>>,
    write_lock: Mutex<()>,
}

impl EventStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        EventStore {
            path: None,
            events: Mutex::new(Vec::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Open a store backed by `path`, loading its events if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> AgendaResult<Self> {
        let path = path.into();
        let events = load(&path)?;

        info!(path = %path.display(), count = events.len(), "Loaded events");

        Ok(EventStore {
            path: Some(path),
            events: Mutex::new(events),
            write_lock: Mutex::new(()),
        })
    }

    /// Validate and append a new event, persisting the full set if file-backed.
    ///
    /// The file is written before the event is appended in memory, so a
    /// failed write leaves the store unchanged.
    pub fn create(&self, new_event: NewEvent) -> AgendaResult<Event> {
        let valid = new_event.validate()?;
        let event = valid.into_event(Uuid::new_v4().to_string());

        let _writer = self.write_lock.lock();

        if let Some(path) = &self.path {
            let mut snapshot = self.events.lock().clone();
            snapshot.push(event.clone());
            save(path, &snapshot)?;
        }

        self.events.lock().push(event.clone());

        debug!(id = %event.id, title = %event.title, "Created event");
        Ok(event)
    }

    /// Events whose start contains `date` as a substring, at most `limit` of them.
    pub fn list(&self, date: Option<&str>, limit: usize) -> AgendaResult<Vec<Event>> {
        let date = date
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AgendaError::Validation(MISSING_DATE.into()))?;

        let events = self.events.lock();
        Ok(events
            .iter()
            .filter(|e| e.start.contains(date))
            .take(limit)
            .cloned()
            .collect())
    }

    /// Snapshot of every event in insertion order.
    pub fn all(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

fn load(path: &Path) -> AgendaResult<Vec<Event>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        AgendaError::Serialization(format!("Could not parse {}: {e}", path.display()))
    })
}

fn save(path: &Path, events: &[Event]) -> AgendaResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let content = serde_json::to_string_pretty(events)
        .map_err(|e| AgendaError::Serialization(e.to_string()))?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| AgendaError::Io(e.error))?;

    Ok(())
}
