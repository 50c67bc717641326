//! Event and health handlers

use crate::error::{HttpThumbnailError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use thumbnailer_core::{ObjectEvent, PipelineOutcome, StorageObjectData};

/// CloudEvents binary-mode headers recorded on the request span.
const CLOUD_EVENT_HEADERS: [(&str, &str); 3] = [
    ("ce-id", "ce_id"),
    ("ce-type", "ce_type"),
    ("ce-source", "ce_source"),
];

/// Handle one object-finalized delivery.
///
/// Skips and completions both acknowledge with 200 so the platform does not
/// redeliver them.
#[tracing::instrument(
    skip_all,
    fields(
        ce_id = tracing::field::Empty,
        ce_type = tracing::field::Empty,
        ce_source = tracing::field::Empty,
    )
)]
pub async fn object_finalized(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<StorageObjectData>,
) -> Result<Json<PipelineOutcome>, HttpThumbnailError> {
    let span = tracing::Span::current();
    for (header, field) in CLOUD_EVENT_HEADERS {
        if let Some(value) = headers.get(header).and_then(|v| v.to_str().ok()) {
            span.record(field, value);
        }
    }

    let event = ObjectEvent::from(payload);
    let outcome = state.pipeline.handle(&event).await?;
    Ok(Json(outcome))
}

/// Liveness check
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "alive"
        })),
    )
}
