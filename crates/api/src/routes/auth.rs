//! Account registration and login endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use store::StateStore;
use storefront::{ActivityCategory, AuthService, Session};

use crate::error::ApiError;

use super::{AppState, record_activity};

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// -- Handlers --

/// POST /api/auth/register: creates an account and opens a session.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn register<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(axum::http::StatusCode, Json<Session>), ApiError> {
    if !req.email.contains('@') {
        return Err(ApiError::BadRequest(
            "A valid email address is required".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("A display name is required".to_string()));
    }
    if req.password.trim().is_empty() {
        return Err(ApiError::BadRequest("A password is required".to_string()));
    }

    let session = state
        .auth
        .register(&req.email, &req.name, &req.password)
        .await?;

    record_activity(
        state.as_ref(),
        ActivityCategory::Registration,
        format!("New account registered for {}", session.identity.email),
    )
    .await;
    tracing::info!(user_id = %session.identity.id, "account registered");

    Ok((axum::http::StatusCode::CREATED, Json(session)))
}

/// POST /api/auth/login: opens a session for an existing account.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn login<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state.auth.login(&req.email, &req.password).await?;

    record_activity(
        state.as_ref(),
        ActivityCategory::Login,
        format!("{} logged in", session.identity.email),
    )
    .await;

    Ok(Json(session))
}
