//! Checkout, order history and tracking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use chrono::Utc;
use common::Identity;
use domain::{Address, Order, OrderId};
use serde::Deserialize;
use store::StateStore;
use storefront::OrderTracking;

use crate::error::ApiError;

use super::{AppState, identity_for_request};

// -- Request types --

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub address: Address,
}

/// Restricts an order to its owner; admins see everything.
///
/// Non-owners get the same response as for a missing order, so order
/// numbers cannot be probed.
fn ensure_order_visible(identity: &Identity, order: &Order) -> Result<(), ApiError> {
    if identity.role.is_admin() || order.customer_email.eq_ignore_ascii_case(&identity.email) {
        return Ok(());
    }
    Err(ApiError::NotFound(format!("Order not found: {}", order.id)))
}

// -- Handlers --

/// POST /api/orders: places an order from the caller's cart.
///
/// Reads the cart, computes the totals, places the order and clears the
/// cart. Checkout requires a session; guests register first.
#[tracing::instrument(skip(state, headers, req))]
pub async fn create<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(req): Json<CheckoutRequest>,
) -> Result<(axum::http::StatusCode, Json<Order>), ApiError> {
    let identity = identity_for_request(state.as_ref(), &headers).await?;
    let scope = identity.scope();

    let cart = state.cart.view(&scope).await?;
    let totals = cart.totals();
    let order = state
        .orders
        .place_order(
            cart.lines().to_vec(),
            totals.cart_total,
            req.address,
            &identity.email,
        )
        .await?;

    // The order exists once placement returns; a cart that fails to
    // clear is logged, not surfaced as a checkout failure.
    if let Err(error) = state.cart.clear(&scope).await {
        tracing::warn!(%error, order_id = %order.id, "failed to clear cart after checkout");
    }

    Ok((axum::http::StatusCode::CREATED, Json(order)))
}

/// GET /api/orders: the caller's order history, newest first.
#[tracing::instrument(skip(state, headers))]
pub async fn list<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Order>>, ApiError> {
    let identity = identity_for_request(state.as_ref(), &headers).await?;
    Ok(Json(state.orders.orders_for(&identity.email).await?))
}

/// GET /api/orders/{id}: one order, visible to its owner and admins.
#[tracing::instrument(skip(state, headers))]
pub async fn get<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Order>, ApiError> {
    let identity = identity_for_request(state.as_ref(), &headers).await?;
    let order = state.orders.get(&OrderId::new(id)).await?;
    ensure_order_visible(&identity, &order)?;
    Ok(Json(order))
}

/// GET /api/orders/{id}/tracking: authoritative status, hint and display status.
#[tracing::instrument(skip(state, headers))]
pub async fn tracking<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<OrderTracking>, ApiError> {
    let identity = identity_for_request(state.as_ref(), &headers).await?;
    let order_id = OrderId::new(id);
    let order = state.orders.get(&order_id).await?;
    ensure_order_visible(&identity, &order)?;
    Ok(Json(state.orders.tracking(&order_id, Utc::now()).await?))
}
