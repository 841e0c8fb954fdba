use anyhow::{Context as _, Result};
use equiptrack_core::AppConfig;
use equiptrack_http::{create_router, AppState, HeaderIdentity};
use std::sync::Arc;

use crate::open_service;

pub(crate) async fn run(config: &AppConfig, host: &str, port: u16) -> Result<()> {
    let service = Arc::new(open_service(config)?);
    let identity = HeaderIdentity::new(&config.owner_header)
        .with_context(|| format!("invalid owner header name: {}", config.owner_header))?;

    let state = Arc::new(AppState {
        service,
        identity: Arc::new(identity),
        max_upload_bytes: config.max_upload_bytes,
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(owner_header = %config.owner_header, "Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
