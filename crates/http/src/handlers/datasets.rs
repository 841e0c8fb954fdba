use axum::{
    extract::{rejection::PathRejection, Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use equiptrack_core::{AggregateSummary, DatasetSummary};

use crate::api_error::ApiError;
use crate::AppState;

/// Multipart field carrying the CSV file.
const UPLOAD_FIELD: &str = "file";

fn require_owner(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    state.identity.owner(headers).ok_or(ApiError::Unauthorized)
}

pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DatasetSummary>), ApiError> {
    let owner = require_owner(&state, &headers)?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;
        upload = Some((name, bytes));
        break;
    }
    let (name, bytes) = upload
        .ok_or_else(|| ApiError::BadRequest(format!("missing multipart field '{UPLOAD_FIELD}'")))?;

    let summary = state.service.ingest(&owner, bytes.to_vec(), &name).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn list_datasets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<DatasetSummary>>, ApiError> {
    let owner = require_owner(&state, &headers)?;
    Ok(Json(state.service.list_recent(&owner).await?))
}

pub async fn get_dataset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DatasetSummary>, ApiError> {
    let owner = require_owner(&state, &headers)?;
    let Path(id) = id?;
    Ok(Json(state.service.get_detail(&owner, id).await?))
}

pub async fn delete_dataset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let owner = require_owner(&state, &headers)?;
    let Path(id) = id?;
    state.service.delete(&owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn download_report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require_owner(&state, &headers)?;
    let Path(id) = id?;
    let report = state.service.render_report(&owner, id).await?;

    // Non-ASCII names cannot go in a plain header value.
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", report.file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(report.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    ))
}

pub async fn summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AggregateSummary>, ApiError> {
    let owner = require_owner(&state, &headers)?;
    Ok(Json(state.service.aggregate(&owner).await?))
}
