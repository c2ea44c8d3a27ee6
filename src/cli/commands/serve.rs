use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::app::{router, AppState};
use crate::config::AppConfig;
use crate::database::connect_store;
use crate::storage::LocalFileStorage;

/// Connect the store, prepare the upload directory and serve until shutdown
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    info!("Starting DigiHome API in {:?} mode", config.environment);

    let store = connect_store(&config.database)
        .await
        .context("failed to initialize document store")?;
    info!("Document store ready ({})", store.backend());

    let files = LocalFileStorage::from_config(&config.uploads);
    files
        .ensure_dir()
        .await
        .with_context(|| format!("failed to create upload directory {}", files.dir().display()))?;

    let app = router(AppState::new(store, Arc::new(files)), config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("DigiHome API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
