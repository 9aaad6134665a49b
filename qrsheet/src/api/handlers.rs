use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::Uri;
use serde::Serialize;
use serde_json::Value;

use super::AppState;
use super::error::ApiError;
use crate::catalog::{CatalogService, MetaDocument, StressDocument};
use crate::workbook::WorkbookError;

/// Body of `POST /api/save`
#[derive(Debug, Serialize)]
pub struct SaveReceipt {
    pub ok: bool,
    pub received: Value,
}

/// Run a workbook read on the blocking pool
async fn with_catalog<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&CatalogService) -> Result<T, WorkbookError> + Send + 'static,
{
    let catalog = state.catalog.clone();
    tokio::task::spawn_blocking(move || f(&catalog))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

pub(crate) async fn meta_handler(
    State(state): State<AppState>,
) -> Result<Json<MetaDocument>, ApiError> {
    let meta = with_catalog(&state, |catalog| catalog.meta()).await?;
    Ok(Json(meta))
}

pub(crate) async fn stress_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StressDocument>, ApiError> {
    let doc = with_catalog(&state, move |catalog| catalog.stress(&name)).await?;
    log::debug!("Stress '{}': {} rows", doc.stress, doc.sheet1_rows.len());
    Ok(Json(doc))
}

/// Unrouted paths get the same JSON error envelope as handler failures
pub(crate) async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Echo the payload back; nothing is written
///
/// The body is parsed as JSON whatever its content type.
pub(crate) async fn save_handler(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SaveReceipt>, ApiError> {
    let body = body.map_err(ApiError::from)?;
    let received: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedRequest(e.to_string()))?;
    log::info!("Save received: {}", summarize_save(&received));
    Ok(Json(SaveReceipt { ok: true, received }))
}

/// One-line description of a save payload for the log
///
/// The client sends `header`, `lotId`, `stress`, `sheet1_rows` and
/// `sheet2_other`; none of them are required.
fn summarize_save(payload: &Value) -> String {
    let Some(object) = payload.as_object() else {
        return format!("non-object payload ({})", json_kind(payload));
    };

    let mut parts = Vec::new();
    if let Some(lot) = object.get("lotId").and_then(Value::as_str) {
        parts.push(format!("lot={}", lot));
    }
    if let Some(stress) = object.get("stress").and_then(Value::as_str) {
        parts.push(format!("stress={}", stress));
    }
    if let Some(rows) = object.get("sheet1_rows").and_then(Value::as_array) {
        parts.push(format!("sheet1_rows={}", rows.len()));
    }
    if let Some(other) = object.get("sheet2_other").and_then(Value::as_object) {
        parts.push(format!("sheet2_other={} fields", other.len()));
    }
    if parts.is_empty() {
        parts.push(format!("{} keys", object.len()));
    }
    parts.join(", ")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
