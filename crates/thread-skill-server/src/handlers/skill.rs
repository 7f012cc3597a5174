use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::state::AppState;
use crate::utils::error::ApiError;

/// Webhook of a voice platform: `POST /{platform}`.
#[instrument(skip(state, request))]
pub async fn skill_handler(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Json(request): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let dispatcher = state
        .dispatcher(&platform)
        .ok_or_else(|| ApiError::NotFound(format!("Platform '{}' is not enabled", platform)))?;

    debug!("Incoming {} request", dispatcher.platform());

    let response = dispatcher.handle(&request).await?;
    Ok(Json(response))
}
