//! Mapping between agenda events and the Google Calendar event resource.

use agenda_core::Event;
use serde::{Deserialize, Serialize};

/// The subset of the Google event resource sent on insert.
#[derive(Debug, Serialize)]
pub struct GoogleEvent<'a> {
    pub summary: &'a str,
    pub start: GoogleEventTime<'a>,
    pub end: GoogleEventTime<'a>,
}

#[derive(Debug, Serialize)]
pub struct GoogleEventTime<'a> {
    #[serde(rename = "dateTime")]
    pub date_time: &'a str,
    #[serde(rename = "timeZone")]
    pub time_zone: &'a str,
}

/// The fields we read back from an inserted event.
#[derive(Debug, Deserialize)]
pub struct InsertedEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "htmlLink", default)]
    pub html_link: Option<String>,
}

pub trait ToGoogle {
    fn to_google<'a>(&'a self, time_zone: &'a str) -> GoogleEvent<'a>;
}

impl ToGoogle for Event {
    fn to_google<'a>(&'a self, time_zone: &'a str) -> GoogleEvent<'a> {
        GoogleEvent {
            summary: &self.title,
            start: GoogleEventTime {
                date_time: &self.start,
                time_zone,
            },
            end: GoogleEventTime {
                date_time: &self.end,
                time_zone,
            },
        }
    }
}
