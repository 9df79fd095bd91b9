//! Health-assistant endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use store::StateStore;
use storefront::{AssistantService, FALLBACK_REPLY};

use crate::error::ApiError;

use super::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct AssistantRequest {
    pub message: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct AssistantResponse {
    pub reply: String,
}

// -- Handlers --

/// POST /api/assistant: asks the pharmacist's assistant.
///
/// Any assistant failure is served as the fixed fallback reply; the
/// endpoint itself never fails on a port error.
#[tracing::instrument(skip(state, req))]
pub async fn ask<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("A question is required".to_string()));
    }

    let reply = match state.assistant.ask(&req.message).await {
        Ok(reply) => reply,
        Err(error) => {
            metrics::counter!("assistant_fallbacks_total").increment(1);
            tracing::warn!(%error, "assistant unavailable, serving the fallback reply");
            FALLBACK_REPLY.to_string()
        }
    };

    Ok(Json(AssistantResponse { reply }))
}
