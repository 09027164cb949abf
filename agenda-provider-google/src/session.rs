//! Exchanges the stored refresh token for a short-lived access token.
//!
//! There is no caching: every publish performs a fresh exchange.

use agenda_core::{AgendaError, AgendaResult};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GoogleConfig;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> AgendaResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AgendaError::Auth(format!("{name} is not configured")))
}

pub async fn obtain_access_token(
    http: &reqwest::Client,
    config: &GoogleConfig,
) -> AgendaResult<String> {
    let client_id = required(&config.client_id, "GOOGLE_CLIENT_ID")?;
    let client_secret = required(&config.client_secret, "GOOGLE_CLIENT_SECRET")?;
    let refresh_token = required(&config.refresh_token, "GOOGLE_REFRESH_TOKEN")?;

    debug!(token_url = %config.token_url, "Exchanging refresh token");

    let response = http
        .post(&config.token_url)
        .form(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await
        .map_err(|e| AgendaError::Auth(format!("Token request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        warn!(%status, "Google token endpoint rejected refresh token");
        return Err(AgendaError::Auth(format!("{status} - {error_text}")));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AgendaError::Auth(format!("Failed to parse token response: {e}")))?;

    Ok(token.access_token)
}
