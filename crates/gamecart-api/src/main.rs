//! `GameCart` API server entry point.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use gamecart_api::config::ApiConfig;
use gamecart_api::error::AppError;
use gamecart_api::routes;
use gamecart_api::state::AppState;
use gamecart_api::telemetry;
use gamecart_core::clock::SystemClock;
use gamecart_store::MIGRATOR;
use gamecart_store::pg_game_repository::PgGameRepository;
use gamecart_store::pg_outbox_publisher::PgOutboxPublisher;
use gamecart_store::pg_user_repository::PgUserRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ApiConfig::from_env()?;
    let _telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting GameCart API server");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(AppError::Database)?;

    MIGRATOR.run(&pool).await.map_err(AppError::Migration)?;
    tracing::info!("database migrations applied");

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgGameRepository::new(pool.clone())),
        Arc::new(PgOutboxPublisher::new(pool)),
        config.checkout.clone(),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!(
        %addr,
        topic = %config.checkout.topic,
        unresolved_games = %config.checkout.unresolved_games,
        "Listening"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::Server)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
