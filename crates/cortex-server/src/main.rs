//! Cortex server
//!
//! Loads configuration, selects a store, and serves the JSON API with
//! health checks until SIGINT or SIGTERM.

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cortex_api::extractors::{ApiConfig, USER_ID_HEADER};
use cortex_api::AppState;
use cortex_core::config::{AppConfig, ServerConfig, StorageBackend};
use cortex_db::{Database, PgStore};
use cortex_services::{CollaborationStore, MemoryStore};

mod health;

use health::{HealthChecker, HealthConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        backend = ?config.storage.backend,
        "starting Cortex"
    );

    let (store, database) = open_store(&config).await?;
    let mut health = HealthChecker::new(HealthConfig::default(), store.clone(), config.storage.backend);
    if let Some(database) = &database {
        health = health.with_database(database.clone());
    }

    let state = AppState::new(store, ApiConfig::from(&config.matching));
    let app = build_router(state, Arc::new(health), &config.server);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(database) = database {
        database.close().await;
    }
    info!("server shutdown complete");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,cortex_server=debug,cortex_api=debug,tower_http=debug".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Connect the configured store; Postgres is migrated before use
async fn open_store(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn CollaborationStore>, Option<Database>)> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let database = Database::connect(&config.database).await?;
            database.migrate().await?;
            let store: Arc<dyn CollaborationStore> = Arc::new(PgStore::new(database.clone()));
            Ok((store, Some(database)))
        }
        StorageBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on shutdown");
            Ok((Arc::new(MemoryStore::new()), None))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = if server.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
}

fn build_router(state: AppState, health: Arc<HealthChecker>, server: &ServerConfig) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health);

    Router::new()
        .merge(health_routes)
        .merge(cortex_api::router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_layer(server)),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("received SIGTERM, shutting down");
        }
    }
}
