use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use agenda_core::{EventStore, Publisher};
use agenda_provider_google::GoogleConnector;
use agenda_server::settings::{DEFAULT_CONFIG_FILE, Overrides, Settings};
use agenda_server::state::AppState;
use agenda_server::{app, singleton};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "agenda_server=info,agenda_core=info,agenda_provider_google=info,tower_http=info";

#[derive(Parser)]
#[command(name = "agenda-server")]
#[command(about = "Calendar-event API with an iCalendar feed and optional Google Calendar sync")]
struct Args {
    /// Settings file (TOML); missing is fine
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Address to listen on
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file the events are stored in
    #[arg(long, conflicts_with = "in_memory")]
    data_file: Option<PathBuf>,

    /// Keep events in memory only
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let overrides = Overrides {
        bind: args.bind,
        port: args.port,
        data_file: args.data_file,
        in_memory: args.in_memory,
    };

    let settings = Settings::load(&args.config, &overrides)
        .with_context(|| format!("Failed to load settings from {}", args.config.display()))?;

    // Only one process may write the data file
    let (_lock, store) = match &settings.data_file {
        Some(path) => {
            let lock = singleton::acquire_lock(path)?;
            let store = EventStore::open(path)
                .with_context(|| format!("Failed to load events from {}", path.display()))?;
            (Some(lock), store)
        }
        None => {
            warn!("No data file configured, events will be lost on restart");
            (None, EventStore::in_memory())
        }
    };

    let publisher: Option<Arc<dyn Publisher>> = if settings.google.is_configured() {
        info!(calendar = %settings.google.calendar_id, "Google Calendar sync enabled");
        let connector = GoogleConnector::new(
            settings.google.clone(),
            Duration::from_secs(settings.http_timeout_secs),
        )?;
        Some(Arc::new(connector))
    } else {
        info!("Google Calendar sync disabled");
        None
    };

    let state = AppState::new(store, publisher, settings.openapi_file.clone());

    let address = settings.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("agenda-server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("agenda-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
