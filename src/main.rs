//! Restaurant Backend Service
//!
//! Main entry point for the restaurant ordering backend.
//! This service provides:
//! - Menu catalog search and management
//! - Order submission with server-side pricing
//! - Daily sales reports

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use restaurant_backend::config::{AppConfig, LogFormat};
use restaurant_backend::database::{create_pool, run_migrations, seed_catalog, Database};
use restaurant_backend::{api, AppError, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "restaurant_backend={},sqlx=warn,tower_http=info",
            config.log_level
        )
        .into()
    });

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(&config.cors_allowed_origin)
        .with_context(|| format!("invalid CORS origin: {}", config.cors_allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    init_tracing(&config);

    info!("Restaurant backend starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {} ({})", config.log_level, config.log_format.as_str());
    info!("HTTP port: {}", config.http_port);

    info!("Connecting to database...");
    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;
    info!(
        max_connections = config.database.max_connections,
        "Database connection pool created"
    );

    info!("Running database migrations...");
    run_migrations(&pool).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        AppError::Database(e)
    })?;
    info!("Database migrations completed successfully");

    let database = Database::new(pool);
    let state =
        AppState::from_database(&database).with_internal_error_details(config.is_development());

    if config.seed_catalog {
        match seed_catalog(&state.catalog).await {
            Ok(0) => info!("Catalog already populated, skipping seed"),
            Ok(count) => info!(items = count, "Catalog seeded"),
            Err(e) => warn!("Catalog seeding failed: {}", e),
        }
    }

    let app = api::router(state)
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("Restaurant backend stopped");
    Ok(())
}
