//! Cart endpoints, scoped to the caller's identity.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use domain::{Cart, CartLine, CartTotals, MedicineId, PriceQuote};
use serde::{Deserialize, Serialize};
use store::StateStore;

use crate::error::ApiError;

use super::{AppState, scope_for};

// -- Request types --

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub medicine_id: String,
    pub quantity: Option<u32>,
}

#[derive(Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

// -- Response types --

/// One cart line with its computed quote.
#[derive(Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    pub quote: PriceQuote,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let totals = cart.totals();
        let lines = cart
            .lines()
            .iter()
            .map(|line| CartLineView {
                quote: line.quote(),
                line: line.clone(),
            })
            .collect();
        Self { lines, totals }
    }
}

// -- Handlers --

/// GET /api/cart: the scope's cart lines with quotes and totals.
#[tracing::instrument(skip(state, headers))]
pub async fn view<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<CartResponse>, ApiError> {
    let scope = scope_for(state.as_ref(), &headers).await?;
    let cart = state.cart.view(&scope).await?;
    Ok(Json(cart.into()))
}

/// POST /api/cart/items: adds a medicine, defaulting to one full strip.
#[tracing::instrument(skip(state, headers, req))]
pub async fn add_item<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let scope = scope_for(state.as_ref(), &headers).await?;
    let cart = state
        .cart
        .add(&scope, &MedicineId::new(req.medicine_id), req.quantity)
        .await?;
    Ok(Json(cart.into()))
}

/// PATCH /api/cart/items/{id}: replaces the quantity of an existing line.
#[tracing::instrument(skip(state, headers, req))]
pub async fn update_quantity<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let scope = scope_for(state.as_ref(), &headers).await?;
    let cart = state
        .cart
        .update_quantity(&scope, &MedicineId::new(id), req.quantity)
        .await?;
    Ok(Json(cart.into()))
}

/// DELETE /api/cart/items/{id}: removes a line (idempotent).
#[tracing::instrument(skip(state, headers))]
pub async fn remove_item<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode, ApiError> {
    let scope = scope_for(state.as_ref(), &headers).await?;
    state.cart.remove(&scope, &MedicineId::new(id)).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// DELETE /api/cart: empties the scope's cart.
#[tracing::instrument(skip(state, headers))]
pub async fn clear<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode, ApiError> {
    let scope = scope_for(state.as_ref(), &headers).await?;
    state.cart.clear(&scope).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
