pub mod events;
pub mod feed;
pub mod pages;

use agenda_core::AgendaError;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(events::router())
        .merge(feed::router())
        .merge(pages::router())
        .fallback(not_found)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps agenda errors to HTTP responses with an `{"error": ...}` body
#[derive(Debug)]
pub struct AppError(AgendaError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AgendaError::Validation(_) => StatusCode::BAD_REQUEST,
            AgendaError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<AgendaError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn not_found() -> AppError {
    AgendaError::NotFound("niet gevonden".into()).into()
}
