use axum::{routing::get, Router};
use configuration::ServerSettings;
use database::ClimateRepository;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;
pub mod mapper;

/// The shared application state that all handlers can access.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: ClimateRepository,
}

/// Builds the application router with all API routes and middleware.
pub fn router(state: Arc<AppState>, cors: bool) -> Router {
    // Static segments win over `:start`, so "precipitation" never reaches the date handler.
    let app = Router::new()
        .route("/", get(handlers::welcome))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/v1.0/precipitation", get(handlers::precipitation))
        .route("/api/v1.0/stations", get(handlers::stations))
        .route("/api/v1.0/tobs", get(handlers::tobs))
        .route("/api/v1.0/:start", get(handlers::temperature_stats))
        .route("/api/v1.0/:start/:end", get(handlers::temperature_stats))
        .with_state(state);

    let app = if cors { app.layer(CorsLayer::permissive()) } else { app };

    // This middleware will automatically log information about every incoming request.
    app.layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves the API until Ctrl-C.
pub async fn run_server(settings: &ServerSettings, db_repo: ClimateRepository) -> anyhow::Result<()> {
    let addr = settings.socket_addr()?;
    let app = router(Arc::new(AppState { db_repo }), settings.cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
