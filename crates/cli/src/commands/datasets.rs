use anyhow::{Context as _, Result};
use equiptrack_core::AppConfig;
use equiptrack_service::ServiceError;
use serde::Serialize;
use std::io::Write as _;
use std::path::Path;

use crate::open_service;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe(err: ServiceError, id: i64) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::anyhow!("dataset {id} not found")
    } else {
        err.into()
    }
}

pub(crate) async fn ingest(
    config: &AppConfig,
    file: &Path,
    owner: &str,
    name: Option<&str>,
) -> Result<()> {
    let raw = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let display_name = match name {
        Some(n) => n.to_owned(),
        None => file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
    };

    let service = open_service(config)?;
    let summary = service.ingest(owner, raw, &display_name).await?;
    print_json(&summary)
}

pub(crate) async fn list(config: &AppConfig, owner: &str) -> Result<()> {
    let service = open_service(config)?;
    print_json(&service.list_recent(owner).await?)
}

pub(crate) async fn get(config: &AppConfig, owner: &str, id: i64) -> Result<()> {
    let service = open_service(config)?;
    let summary = service.get_detail(owner, id).await.map_err(|e| describe(e, id))?;
    print_json(&summary)
}

pub(crate) async fn delete(config: &AppConfig, owner: &str, id: i64) -> Result<()> {
    let service = open_service(config)?;
    service.delete(owner, id).await.map_err(|e| describe(e, id))?;
    println!("Deleted dataset {id}");
    Ok(())
}

pub(crate) async fn summary(config: &AppConfig, owner: &str) -> Result<()> {
    let service = open_service(config)?;
    print_json(&service.aggregate(owner).await?)
}

pub(crate) async fn report(
    config: &AppConfig,
    owner: &str,
    id: i64,
    out: Option<&Path>,
) -> Result<()> {
    let service = open_service(config)?;
    let report = service.render_report(owner, id).await.map_err(|e| describe(e, id))?;

    match out {
        Some(path) => {
            std::fs::write(path, &report.bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        },
        None => std::io::stdout().write_all(&report.bytes)?,
    }
    Ok(())
}
