//! Google Calendar provider for agenda.
//!
//! Forwards each newly created event to Google Calendar: the refresh token is
//! exchanged for an access token, then the event is inserted through the
//! Calendar REST API and the resulting `htmlLink` is returned.

pub mod config;
mod google_event;
mod session;

use std::time::Duration;

use agenda_core::{AgendaError, AgendaResult, Event, Publisher};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{info, warn};

pub use config::GoogleConfig;
use google_event::{InsertedEvent, ToGoogle};

pub struct GoogleConnector {
    config: GoogleConfig,
    http: reqwest::Client,
}

impl GoogleConnector {
    pub fn new(config: GoogleConfig, timeout: Duration) -> AgendaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgendaError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(GoogleConnector { config, http })
    }

    /// Exchange the refresh token for a fresh access token.
    pub async fn obtain_access_credential(&self) -> AgendaResult<String> {
        session::obtain_access_token(&self.http, &self.config).await
    }

    /// `{api_base}/calendars/{calendar_id}/events`, with the calendar id percent-encoded
    fn events_url(&self) -> AgendaResult<Url> {
        let invalid = || AgendaError::Config(format!("Invalid API base: {}", self.config.api_base));

        let mut url = Url::parse(&self.config.api_base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("calendars")
            .push(&self.config.calendar_id)
            .push("events");

        Ok(url)
    }
}

#[async_trait]
impl Publisher for GoogleConnector {
    fn name(&self) -> &str {
        "google"
    }

    async fn publish(&self, event: &Event) -> AgendaResult<String> {
        let access_token = self.obtain_access_credential().await?;
        let url = self.events_url()?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&access_token)
            .json(&event.to_google(&self.config.timezone))
            .send()
            .await
            .map_err(|e| AgendaError::Publish(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, id = %event.id, "Google Calendar rejected event");
            return Err(AgendaError::Publish(format!("{status} - {error_text}")));
        }

        let inserted: InsertedEvent = response
            .json()
            .await
            .map_err(|e| AgendaError::Publish(format!("Failed to parse response: {e}")))?;

        let link = inserted
            .html_link
            .ok_or_else(|| AgendaError::Publish("Response has no htmlLink".into()))?;

        info!(
            id = %event.id,
            google_id = inserted.id.as_deref().unwrap_or_default(),
            "Published event to Google Calendar"
        );

        Ok(link)
    }
}
