//! Core types for agenda.
//!
//! This crate provides the pieces shared by the HTTP server and the calendar providers:
//! - `Event` and `NewEvent`, the only entity and its unvalidated create input
//! - `EventStore`, the append-only event set with optional JSON persistence
//! - `ics`, which renders the event set as an iCalendar feed
//! - `Publisher`, the seam external calendar providers plug into

pub mod error;
pub mod event;
pub mod ics;
pub mod publish;
pub mod store;

pub use error::{AgendaError, AgendaResult};
pub use event::{Event, NewEvent};
pub use publish::Publisher;
pub use store::EventStore;
