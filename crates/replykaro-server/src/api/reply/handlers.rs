use axum::{
    extract::{Extension, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::api::request_context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateReplyRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub goal: String,
    /// Accepts any JSON value; anything but a positive integer counts as 1.
    #[serde(default)]
    pub variants: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReplyResponse {
    pub replies: Vec<String>,
    pub scores: Vec<u8>,
}

pub async fn generate_reply(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<GenerateReplyRequest>,
) -> Result<Json<GenerateReplyResponse>, ApiError> {
    let variants = normalize_variants(payload.variants.as_ref());
    debug!(request_id = %ctx.request_id, variants, "Generating replies");

    let bundle = state
        .orchestrator
        .generate_replies(
            state.completions.as_ref(),
            &payload.message,
            &payload.tone,
            &payload.goal,
            variants,
        )
        .await
        .map_err(map_generation_error)?;

    Ok(Json(GenerateReplyResponse {
        replies: bundle.replies,
        scores: bundle.scores,
    }))
}

/// Missing, null, non-numeric and non-positive values all normalize to 1.
fn normalize_variants(raw: Option<&Value>) -> u32 {
    raw.and_then(Value::as_u64)
        .filter(|n| *n >= 1)
        .map(|n| n.min(u32::MAX as u64) as u32)
        .unwrap_or(1)
}

fn map_generation_error(err: replykaro_core::Error) -> ApiError {
    error!("Reply generation failed: {err}");
    ApiError::internal("Failed to generate reply.")
}
