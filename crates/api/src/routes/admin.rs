//! Back-office endpoints: the order table, status moves, activity feed.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use domain::{Order, OrderId, OrderStatus};
use serde::Deserialize;
use store::StateStore;
use storefront::ActivityEntry;

use crate::error::ApiError;

use super::{AppState, require_admin};

/// Activity entries returned when `?limit=` is not given.
const DEFAULT_ACTIVITY_LIMIT: usize = 50;

// -- Request types --

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct ActivityParams {
    pub limit: Option<usize>,
}

fn parse_status(raw: &str) -> Result<OrderStatus, ApiError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| ApiError::BadRequest(format!("Unknown order status: {raw}")))
}

// -- Handlers --

/// GET /api/admin/orders: the global order table, newest first.
#[tracing::instrument(skip(state, headers))]
pub async fn list_orders<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Order>>, ApiError> {
    require_admin(state.as_ref(), &headers).await?;
    Ok(Json(state.orders.all_orders().await?))
}

/// PATCH /api/admin/orders/{id}/status: advances an order one lifecycle step.
#[tracing::instrument(skip(state, headers, req))]
pub async fn update_status<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    require_admin(state.as_ref(), &headers).await?;
    let status = parse_status(&req.status)?;
    Ok(Json(
        state.orders.update_status(&OrderId::new(id), status).await?,
    ))
}

/// GET /api/admin/activity: recent activity entries, newest first.
#[tracing::instrument(skip(state, headers, params))]
pub async fn activity<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ActivityParams>,
    headers: HeaderMap,
) -> Result<Json<Vec<ActivityEntry>>, ApiError> {
    require_admin(state.as_ref(), &headers).await?;
    let limit = params.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    Ok(Json(state.activity.recent(limit).await?))
}
