//! Event creation and lookup endpoints

use agenda_core::{AgendaError, Event, NewEvent};
use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::routes::AppError;
use crate::state::AppState;

pub const DEFAULT_LIMIT: usize = 10;
pub const INVALID_LIMIT: &str = "aantal moet een geheel getal zijn";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-event", post(create_event))
        .route("/list-events", get(list_events))
}

#[derive(Serialize)]
pub struct CreateEventResponse {
    pub bevestiging: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_link: Option<String>,
}

/// Human-readable confirmation, e.g. `Aangemaakt: 09:00–09:15 ‘Standup’.`
pub fn confirmation(event: &Event) -> String {
    format!("Aangemaakt: {}–{} ‘{}’.", event.start, event.end, event.title)
}

/// POST /create-event - Store a new event and forward it to the external calendar
///
/// The local event is committed before publishing. A failed publish is
/// reported as an error but does not remove the local event.
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<NewEvent>, JsonRejection>,
) -> Result<Json<CreateEventResponse>, AppError> {
    let Json(new_event) = payload.map_err(|e| AgendaError::Validation(e.body_text()))?;

    let store = state.store.clone();
    let event = tokio::task::spawn_blocking(move || store.create(new_event))
        .await
        .map_err(|e| AgendaError::Io(std::io::Error::other(e)))??;

    info!(id = %event.id, title = %event.title, start = %event.start, "Event created");

    let google_link = match &state.publisher {
        Some(publisher) => match publisher.publish(&event).await {
            Ok(link) => Some(link),
            Err(e) => {
                warn!(
                    id = %event.id,
                    provider = publisher.name(),
                    error = %e,
                    "Event stored locally but not published"
                );
                return Err(e.into());
            }
        },
        None => None,
    };

    Ok(Json(CreateEventResponse {
        bevestiging: confirmation(&event),
        google_link,
    }))
}

#[derive(Deserialize)]
pub struct ListParams {
    pub datum: Option<String>,
    pub aantal: Option<String>,
}

#[derive(Serialize)]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
}

/// GET /list-events?datum=..&aantal=.. - Events whose start contains `datum`
async fn list_events(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListEventsResponse>, AppError> {
    let Query(params) = params.map_err(|e| AgendaError::Validation(e.body_text()))?;

    let limit = match params.aantal.as_deref() {
        None => DEFAULT_LIMIT,
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| AgendaError::Validation(INVALID_LIMIT.into()))?,
    };

    let events = state.store.list(params.datum.as_deref(), limit)?;

    Ok(Json(ListEventsResponse { events }))
}
