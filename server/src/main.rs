//! Resource API server: opens the configured store once, serves until Ctrl-C/SIGTERM, then closes it.
//!
//! Run from repo root: `cargo run -p resource-server`

use resource_api::{
    app, ensure_database_exists, ensure_resource_table, init_tracing, AppState, Config, InMemoryStore,
    PgResourceStore, ResourceStore, StoreBackend, RESOURCES_PATH,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing();

    let store = open_store(&config).await?;
    let state = AppState::new(store.clone());

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on http://{}", addr);
    tracing::info!("API document: http://{}{}", addr, resource_api::openapi::OPENAPI_PATH);
    tracing::info!("resources API: http://{}{}", addr, RESOURCES_PATH);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("store closed, shutting down");
    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn ResourceStore>, Box<dyn std::error::Error>> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_resource_table(&pool).await?;
            Ok(Arc::new(PgResourceStore::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
