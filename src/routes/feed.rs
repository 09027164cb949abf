//! iCalendar subscription feed

use agenda_core::ics;
use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/calendar.ics", get(calendar_feed))
}

/// GET /calendar.ics - Every stored event as one calendar document
async fn calendar_feed(State(state): State<AppState>) -> impl IntoResponse {
    let body = ics::render_now(&state.store.all());

    (
        [
            (header::CONTENT_TYPE, ics::CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, "inline; filename=\"calendar.ics\""),
        ],
        body,
    )
}
