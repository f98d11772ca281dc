pub mod handlers;
pub mod responses;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::client::{FeedSource, KmaClient};
use crate::config::AppConfig;
use crate::error::{RelayError, Result};

pub use responses::ApiError;

/// Per-process state shared by all handlers; read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    source: Option<Arc<dyn FeedSource>>,
}

impl AppState {
    /// Uses the KMA client when a key is configured; otherwise every data route answers `MissingApiKey`
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let source = if config.has_api_key() {
            let client: Arc<dyn FeedSource> = Arc::new(KmaClient::from_config(&config)?);
            Some(client)
        } else {
            warn!("KMA_API_KEY is not set; data endpoints will fail until it is configured");
            None
        };

        Ok(Self {
            config: Arc::new(config),
            source,
        })
    }

    pub fn with_source(config: AppConfig, source: Arc<dyn FeedSource>) -> Self {
        Self {
            config: Arc::new(config),
            source: Some(source),
        }
    }

    /// The feed source, checked against the configured key before any I/O
    pub fn source(&self) -> Result<Arc<dyn FeedSource>> {
        self.config.require_api_key()?;
        self.source.clone().ok_or(RelayError::MissingApiKey)
    }
}

/// JSON relay routes in front of the upstream feed
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/fetch-weather", post(handlers::fetch_weather))
        .route("/api/test-station", post(handlers::test_station))
        .route("/api/stations", get(handlers::stations))
        .with_state(state)
}

pub async fn serve(config: AppConfig) -> Result<()> {
    let port = config.port;
    let app = router(AppState::from_config(config)?);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Relay listening on http://localhost:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
