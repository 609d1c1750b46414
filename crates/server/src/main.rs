//! Dispatch server - route planning and dispatch API.
//!
//! # Architecture
//!
//! - Axum JSON API over a file-backed record store
//! - Google Maps web services for geocoding, driving times, and
//!   waypoint-optimized sequencing
//! - Navigation handoff via Google Maps / Waze deep-link redirects
//!
//! All state lives in `DISPATCH_DATA_DIR` as whole-collection JSON blobs;
//! there is no database to run.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tracing_subscriber::EnvFilter;

use dispatch_server::config::Config;
use dispatch_server::routes;
use dispatch_server::state::AppState;
use dispatch_server::store::{JsonFileStore, RecordStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dispatch_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config, "configuration loaded");
    if config.maps.is_none() {
        tracing::warn!("GOOGLE_MAPS_API_KEY not set; sequencing and geocoding are disabled");
    }

    let kv = JsonFileStore::open(&config.data_dir)?;
    let store = RecordStore::load(Box::new(kv))?;

    let addr = config.bind_addr();
    let state = AppState::new(config, store);
    let app = routes::router(state);

    tracing::info!(%addr, "dispatch server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
