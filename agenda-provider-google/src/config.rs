//! Google provider configuration.
//!
//! Credentials come from the server settings (or the conventional
//! `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET` and `GOOGLE_REFRESH_TOKEN`
//! environment variables). The endpoints are configurable so the connector
//! can be pointed at a test double.

use std::fmt;

use serde::Deserialize;

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TIMEZONE: &str = "Europe/Amsterdam";

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_calendar_id() -> String {
    DEFAULT_CALENDAR_ID.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

#[derive(Clone, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Calendar new events are inserted into
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    /// Timezone label sent along with start and end (no conversion happens)
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        GoogleConfig {
            client_id: None,
            client_secret: None,
            refresh_token: None,
            calendar_id: default_calendar_id(),
            timezone: default_timezone(),
            token_url: default_token_url(),
            api_base: default_api_base(),
        }
    }
}

impl GoogleConfig {
    /// Whether any credential has been provided.
    ///
    /// A partially configured provider is still considered configured; the
    /// missing pieces surface as an auth error on the first publish.
    pub fn is_configured(&self) -> bool {
        [&self.client_id, &self.client_secret, &self.refresh_token]
            .iter()
            .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

// Keep secrets out of logs
impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(v: &Option<String>) -> &'static str {
            if v.is_some() { "<set>" } else { "<unset>" }
        }

        f.debug_struct("GoogleConfig")
            .field("client_id", &redact(&self.client_id))
            .field("client_secret", &redact(&self.client_secret))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("calendar_id", &self.calendar_id)
            .field("timezone", &self.timezone)
            .field("token_url", &self.token_url)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_by_default() {
        let config = GoogleConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.calendar_id, "primary");
        assert_eq!(config.timezone, "Europe/Amsterdam");
    }

    #[test]
    fn any_credential_enables_provider() {
        let config = GoogleConfig {
            refresh_token: Some("1//refresh".into()),
            ..GoogleConfig::default()
        };
        assert!(config.is_configured());

        let blank = GoogleConfig {
            client_id: Some(String::new()),
            ..GoogleConfig::default()
        };
        assert!(!blank.is_configured());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = GoogleConfig {
            client_id: Some("id.apps.googleusercontent.com".into()),
            client_secret: Some("very-secret".into()),
            refresh_token: Some("1//refresh".into()),
            ..GoogleConfig::default()
        };

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("1//refresh"));
        assert!(!debug.contains("googleusercontent"));
        assert!(debug.contains("<set>"));
    }
}
