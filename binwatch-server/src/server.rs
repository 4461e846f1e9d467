//! Router assembly and the serving loop.

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use binwatch_core::MonitoringService;
use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::Client;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::insight::GeminiClient;
use crate::pages::PageTemplates;
use crate::routes;
use crate::state::AppState;

/// Build the full application router.
///
/// Anything not matched by the API or page routes is served from the
/// templates' directory.
pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(state.pages.dir());

    Router::new()
        .route("/", get(routes::dashboard_page))
        .route("/control", get(routes::control_page))
        .route("/health", get(routes::health))
        .nest("/api", routes::api_routes())
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Wire production collaborators from `config`.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built.
pub fn build_state(config: &ServerConfig) -> Result<AppState> {
    let client = Client::builder()
        .user_agent(concat!("binwatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let insight = GeminiClient::from_config(client, config);
    if !insight.is_configured() {
        warn!("GEMINI_API_KEY not set; insight proxy will answer 500");
    }

    let service = MonitoringService::new(StdRng::from_entropy());
    let pages = PageTemplates::new(config.public_dir.clone(), config.maps_api_key.clone());

    Ok(AppState::new(service, insight, pages))
}

/// Serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error when the address is invalid or the listener fails.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config
        .bind_address()
        .with_context(|| format!("invalid HOST {:?}", config.host))?;
    let app = router(build_state(&config)?);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, public_dir = %config.public_dir.display(), "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}
