//! Crypto Analyst API Server
//!
//! Serves one analyst session (form, presets, recovery, analysis) over HTTP.
//! State is scoped to the configured profile and persisted by the selected
//! store backend.

use crypto_analyst::config::AppConfig;
use crypto_analyst::core::http::{start_server, AppState, HealthStatus};
use crypto_analyst::logging;
use crypto_analyst::metrics::Metrics;
use crypto_analyst::services::{AnalysisProvider, GeminiClient};
use crypto_analyst::session::AnalystSession;
use crypto_analyst::store;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env();
    let env = crypto_analyst::config::get_environment();
    info!("Starting Crypto Analyst API Server");
    info!(environment = %env, "Environment");
    info!(backend = ?config.store_backend, profile = %config.profile, "Persisted store");

    let store = store::open_store(&config)?;
    let session = AnalystSession::start(store, &config.default_ticker);
    if session.recovery_banner_visible() {
        info!("Unsaved input recovered from the previous session");
    }

    // Server still starts without a key; /api/analyze answers 503
    let provider: Option<Arc<dyn AnalysisProvider>> = match GeminiClient::new(&config.gemini) {
        Ok(client) => {
            info!(model = %config.gemini.model, "Gemini client configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(error = %e, "Analysis service unavailable - analyze endpoint disabled");
            None
        }
    };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: Arc::new(Metrics::new()?),
        start_time: Arc::new(Instant::now()),
        session: Arc::new(RwLock::new(session)),
        provider,
    };

    let port = config.port;
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
