//! SUS Virtual Backend
//!
//! HTTP server for the public-health chatbot: forwards questions to the
//! Gemini API with a fixed system prompt, answers emergencies and model
//! failures from static text, and serves the pre-built chat UI.

use std::net::SocketAddr;
use std::sync::Arc;

use sus_virtual_backend::{app, config::Config, gemini::GeminiClient, state::AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    if config.gemini.api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; every question will get a fallback answer");
    }
    if !config.web.static_dir.join("index.html").exists() {
        warn!(
            static_dir = %config.web.static_dir.display(),
            "UI bundle not found; only the API will be available"
        );
    }

    let client = GeminiClient::new(&config.gemini)
        .map_err(|e| anyhow::anyhow!("Failed to build Gemini HTTP client: {}", e))?;

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!(model = %config.gemini.model, "Generative model configured");
    let state = AppState::new(config, Arc::new(client)).shared();
    let app = app::router(state);

    info!("🚀 SUS Virtual running on http://{}", addr);
    info!("Chat endpoint: http://{}/api/chat", addr);
    info!("Health check: http://{}/api/health", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
