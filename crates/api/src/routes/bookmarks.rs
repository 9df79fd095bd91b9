//! Bookmark endpoints, scoped to the caller's identity.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use domain::{BookmarkSet, MedicineId};
use store::StateStore;

use crate::error::ApiError;

use super::{AppState, scope_for};

/// GET /api/bookmarks: bookmarked medicine ids in insertion order.
#[tracing::instrument(skip(state, headers))]
pub async fn list<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<BookmarkSet>, ApiError> {
    let scope = scope_for(state.as_ref(), &headers).await?;
    Ok(Json(state.bookmarks.list(&scope).await?))
}

/// PUT /api/bookmarks/{id}: bookmarks a medicine (idempotent).
#[tracing::instrument(skip(state, headers))]
pub async fn add<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode, ApiError> {
    let scope = scope_for(state.as_ref(), &headers).await?;
    state.bookmarks.add(&scope, &MedicineId::new(id)).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// DELETE /api/bookmarks/{id}: removes a bookmark (idempotent).
#[tracing::instrument(skip(state, headers))]
pub async fn remove<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode, ApiError> {
    let scope = scope_for(state.as_ref(), &headers).await?;
    state.bookmarks.remove(&scope, &MedicineId::new(id)).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
