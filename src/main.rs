//! Assessment service entry point.
//!
//! Loads configuration, connects the PostgreSQL pool, loads the item
//! catalog, and serves the HTTP API until interrupted.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use org_assessment::adapters::http::{app_router, with_http_layers, AppState};
use org_assessment::adapters::notification::LoggingNotificationDispatcher;
use org_assessment::adapters::postgres::{
    PostgresDomainCompletionStore, PostgresRespondentDirectory, PostgresResponseStore,
    PostgresSubmissionRepository,
};
use org_assessment::config::{AppConfig, ServerConfig};

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let catalog = Arc::new(config.catalog.load()?);
    tracing::info!(
        domains = catalog.domain_count(),
        items = catalog.item_count(),
        sub_indices = catalog.sub_indices().len(),
        "item catalog loaded"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        database = %config.database.redacted_url(),
        max_connections = config.database.max_connections,
        "database pool connected"
    );

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let state = AppState {
        catalog,
        submissions: Arc::new(PostgresSubmissionRepository::new(pool.clone())),
        responses: Arc::new(PostgresResponseStore::new(pool.clone())),
        completions: Arc::new(PostgresDomainCompletionStore::new(pool.clone())),
        directory: Arc::new(PostgresRespondentDirectory::new(pool.clone())),
        dispatcher: Arc::new(LoggingNotificationDispatcher::new()),
    };

    let app = with_http_layers(app_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}
