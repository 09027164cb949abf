//! Server settings.
//!
//! Layered, lowest precedence first: built-in defaults, an optional TOML
//! file, `AGENDA_*` environment variables (`__` separates nested keys, e.g.
//! `AGENDA_GOOGLE__CALENDAR_ID`), the conventional `GOOGLE_CLIENT_ID`,
//! `GOOGLE_CLIENT_SECRET` and `GOOGLE_REFRESH_TOKEN` variables, and finally
//! command-line flags.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use agenda_core::{AgendaError, AgendaResult};
use agenda_provider_google::GoogleConfig;
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "agenda.toml";

/// Provider credentials read from their conventional environment names
const GOOGLE_ENV: [(&str, &str); 3] = [
    ("GOOGLE_CLIENT_ID", "google.client_id"),
    ("GOOGLE_CLIENT_SECRET", "google.client_secret"),
    ("GOOGLE_REFRESH_TOKEN", "google.refresh_token"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind: String,
    pub port: u16,

    /// JSON file holding every event; `None` keeps events in memory only
    pub data_file: Option<PathBuf>,

    /// Served verbatim at /openapi.yaml
    pub openapi_file: PathBuf,

    /// Timeout for each request to an external calendar provider
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub google: GoogleConfig,
}

/// Values given on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub in_memory: bool,
}

impl Settings {
    /// Load settings from `config_file` (if it exists) and the process environment.
    pub fn load(config_file: &Path, overrides: &Overrides) -> AgendaResult<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(config_file, env, overrides)
    }

    pub fn load_from(
        config_file: &Path,
        env: HashMap<String, String>,
        overrides: &Overrides,
    ) -> AgendaResult<Self> {
        let mut builder = Config::builder()
            .set_default("bind", "0.0.0.0")
            .and_then(|b| b.set_default("port", 5000_i64))
            .and_then(|b| b.set_default("data_file", "events.json"))
            .and_then(|b| b.set_default("openapi_file", "openapi.yaml"))
            .and_then(|b| b.set_default("http_timeout_secs", 30_i64))
            .map_err(config_error)?
            .add_source(File::from(config_file).required(false))
            .add_source(
                Environment::with_prefix("AGENDA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            );

        for (var, key) in GOOGLE_ENV {
            let value = env.get(var).filter(|v| !v.is_empty()).cloned();
            builder = builder.set_override_option(key, value).map_err(config_error)?;
        }

        builder = builder
            .set_override_option("bind", overrides.bind.clone())
            .and_then(|b| b.set_override_option("port", overrides.port.map(i64::from)))
            .and_then(|b| {
                b.set_override_option(
                    "data_file",
                    overrides
                        .data_file
                        .as_ref()
                        .map(|p| p.to_string_lossy().into_owned()),
                )
            })
            .map_err(config_error)?;

        let mut settings: Settings = builder
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)?;

        if overrides.in_memory {
            settings.data_file = None;
        }

        Ok(settings)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn config_error(e: config::ConfigError) -> AgendaError {
    AgendaError::Config(e.to_string())
}
