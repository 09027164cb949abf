//! Static content: the home page and the OpenAPI description

use std::io::ErrorKind;

use agenda_core::AgendaError;
use axum::{
    Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};

use crate::routes::AppError;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("index.html");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/openapi.yaml", get(openapi))
}

/// GET / - Describe the available endpoints
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /openapi.yaml - Serve the configured OpenAPI file verbatim
async fn openapi(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let path = state.openapi_file.as_path();

    let content = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => AgendaError::NotFound("openapi.yaml niet gevonden".into()),
        _ => AgendaError::Io(e),
    })?;

    Ok(([(header::CONTENT_TYPE, "application/yaml")], content))
}
