use std::path::PathBuf;
use std::sync::Arc;

use agenda_core::{EventStore, Publisher};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EventStore>,
    /// External calendar that new events are forwarded to, if configured
    pub publisher: Option<Arc<dyn Publisher>>,
    pub openapi_file: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        store: EventStore,
        publisher: Option<Arc<dyn Publisher>>,
        openapi_file: impl Into<PathBuf>,
    ) -> Self {
        AppState {
            store: Arc::new(store),
            publisher,
            openapi_file: Arc::new(openapi_file.into()),
        }
    }
}
