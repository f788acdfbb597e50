//! Lookup server: reads settings from the environment, prepares storage, serves the lookup tables.

use lookup_master::{
    app, ensure_database_exists, ensure_tables, load_resources, AppState, EntryRepository, InMemoryEntryRepository,
    Limits, PgEntryRepository, Settings, StorageKind,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lookup_master=info,lookup_server=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let registry = load_resources(settings.resources_path.as_deref()).await?;

    let mut pool = None;
    let repository: Arc<dyn EntryRepository> = match settings.storage {
        StorageKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pg = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(settings.acquire_timeout)
                .connect(&settings.database_url)
                .await?;
            ensure_tables(&pg, &registry).await?;
            pool = Some(pg.clone());
            Arc::new(PgEntryRepository::new(pg))
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Arc::new(InMemoryEntryRepository::new())
        }
    };

    let resources: Vec<&str> = registry.iter().map(|r| r.path_segment.as_str()).collect();
    tracing::info!(?resources, "resources registered");

    let state = AppState::new(repository, registry);
    let router = app(
        state,
        Limits {
            request_timeout: settings.request_timeout,
            body_limit: settings.body_limit,
        },
    );

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("database pool closed");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
