//! Route handlers and the shared application state.

pub mod admin;
pub mod assistant;
pub mod auth;
pub mod bookmarks;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod metrics;
pub mod orders;

use axum::http::HeaderMap;
use common::{Identity, Scope};
use store::StateStore;
use storefront::{
    ActivityCategory, ActivityLog, AuthService, BookmarkService, CartService, CatalogService,
    InMemoryAssistantService, InMemoryAuthService, InMemoryNotificationService, OrderService,
};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: StateStore> {
    pub catalog: CatalogService<S>,
    pub cart: CartService<S>,
    pub bookmarks: BookmarkService<S>,
    pub orders: OrderService<S, InMemoryNotificationService>,
    pub activity: ActivityLog<S>,
    pub auth: InMemoryAuthService,
    pub assistant: InMemoryAssistantService,
}

/// Guest-scope header for visitors without a session.
const GUEST_TOKEN_HEADER: &str = "x-guest-token";

/// Extracts the bearer token from the Authorization header, if present.
///
/// A present but malformed header is an error, not an anonymous request.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, ApiError> {
    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| ApiError::BadRequest("Malformed Authorization header".to_string()))?;
    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        _ => Err(ApiError::BadRequest(
            "Authorization header must carry a Bearer token".to_string(),
        )),
    }
}

/// Resolves the identity for a request that requires a session.
pub(crate) async fn identity_for_request<S: StateStore>(
    state: &AppState<S>,
    headers: &HeaderMap,
) -> Result<Identity, ApiError> {
    let token = bearer_token(headers)?.ok_or_else(|| {
        ApiError::Unauthorized("A Bearer session token is required".to_string())
    })?;
    state
        .auth
        .identity_for(token)
        .await
        .ok_or_else(|| ApiError::Unauthorized("Unknown or expired session token".to_string()))
}

/// Resolves the state scope for cart and bookmark requests.
///
/// A bearer token resolves through the auth service to the user scope;
/// an invalid token is rejected rather than downgraded to a guest.
/// Without a session, `X-Guest-Token` names the guest scope.
pub(crate) async fn scope_for<S: StateStore>(
    state: &AppState<S>,
    headers: &HeaderMap,
) -> Result<Scope, ApiError> {
    if let Some(token) = bearer_token(headers)? {
        return match state.auth.identity_for(token).await {
            Some(identity) => Ok(identity.scope()),
            None => Err(ApiError::Unauthorized(
                "Unknown or expired session token".to_string(),
            )),
        };
    }

    match headers.get(GUEST_TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) if !token.trim().is_empty() => Ok(Scope::guest(token.trim())),
        _ => Err(ApiError::Unauthorized(
            "Provide a Bearer session token or an X-Guest-Token header".to_string(),
        )),
    }
}

/// Resolves the identity and requires the admin role.
pub(crate) async fn require_admin<S: StateStore>(
    state: &AppState<S>,
    headers: &HeaderMap,
) -> Result<Identity, ApiError> {
    let identity = identity_for_request(state, headers).await?;
    if !identity.role.is_admin() {
        return Err(ApiError::Forbidden(
            "Administrator role required".to_string(),
        ));
    }
    Ok(identity)
}

/// Records an activity entry, logging and swallowing store failures.
///
/// Activity entries are side effects; they never fail the operation
/// that produced them.
pub(crate) async fn record_activity<S: StateStore>(
    state: &AppState<S>,
    category: ActivityCategory,
    message: String,
) {
    if let Err(error) = state.activity.record(category, message).await {
        tracing::warn!(%error, "failed to record activity entry");
    }
}
