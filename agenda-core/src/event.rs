//! The event type and its unvalidated create input.
//!
//! Field names on the wire and on disk are Dutch (`titel`, `starttijd`,
//! `eindtijd`) for compatibility with existing clients and data files.
//! Start and end are opaque strings: they are stored and compared verbatim.

use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};

pub const MISSING_FIELDS: &str = "titel, starttijd en eindtijd zijn verplicht";

/// A titled time interval with a store-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "titel")]
    pub title: String,
    #[serde(rename = "starttijd")]
    pub start: String,
    #[serde(rename = "eindtijd")]
    pub end: String,
}

/// Fields of an event as submitted by a client, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEvent {
    #[serde(default, rename = "titel")]
    pub title: Option<String>,
    #[serde(default, rename = "starttijd")]
    pub start: Option<String>,
    #[serde(default, rename = "eindtijd")]
    pub end: Option<String>,
}

/// The three required fields of a `NewEvent`, all known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEvent {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl NewEvent {
    pub fn new(
        title: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        NewEvent {
            title: Some(title.into()),
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Check that title, start and end are all present and non-empty.
    pub fn validate(self) -> AgendaResult<ValidEvent> {
        match (non_empty(self.title), non_empty(self.start), non_empty(self.end)) {
            (Some(title), Some(start), Some(end)) => Ok(ValidEvent { title, start, end }),
            _ => Err(AgendaError::Validation(MISSING_FIELDS.into())),
        }
    }
}

impl ValidEvent {
    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
