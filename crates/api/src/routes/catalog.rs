//! Catalog browsing, quoting and back-office CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use domain::{Category, Medicine, MedicineId, Money, PriceQuote, quote};
use serde::{Deserialize, Serialize};
use store::StateStore;
use storefront::CatalogFilter;

use crate::error::ApiError;

use super::{AppState, require_admin};

// -- Request types --

#[derive(Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct QuoteParams {
    pub quantity: u32,
}

// -- Response types --

/// A catalog entry enriched with the derived savings figures.
#[derive(Serialize)]
pub struct MedicineDetail {
    #[serde(flatten)]
    pub medicine: Medicine,
    pub savings: Money,
    pub savings_percent: i64,
}

impl From<Medicine> for MedicineDetail {
    fn from(medicine: Medicine) -> Self {
        let savings = medicine.savings();
        let savings_percent = medicine.savings_percent();
        Self {
            medicine,
            savings,
            savings_percent,
        }
    }
}

fn parse_category(raw: &str) -> Result<Category, ApiError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| ApiError::BadRequest(format!("Unknown category: {raw}")))
}

// -- Handlers --

/// GET /api/medicines: lists the catalog with optional category and text filters.
#[tracing::instrument(skip(state, params))]
pub async fn list<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Medicine>>, ApiError> {
    let filter = CatalogFilter {
        category: params.category.as_deref().map(parse_category).transpose()?,
        query: params.q,
    };
    Ok(Json(state.catalog.list(&filter).await?))
}

/// GET /api/medicines/{id}: one catalog entry with its savings figures.
#[tracing::instrument(skip(state))]
pub async fn get<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<MedicineDetail>, ApiError> {
    let medicine = state.catalog.get(&MedicineId::new(id)).await?;
    Ok(Json(medicine.into()))
}

/// GET /api/medicines/{id}/quote: prices a quantity against the live catalog entry.
#[tracing::instrument(skip(state, params), fields(quantity = params.quantity))]
pub async fn get_quote<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<PriceQuote>, ApiError> {
    let medicine = state.catalog.get(&MedicineId::new(id)).await?;
    Ok(Json(quote(
        medicine.generic_price,
        medicine.strip_size,
        params.quantity,
    )))
}

/// POST /api/medicines: admin, adds a catalog entry.
#[tracing::instrument(skip(state, headers, medicine))]
pub async fn create<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(medicine): Json<Medicine>,
) -> Result<(axum::http::StatusCode, Json<Medicine>), ApiError> {
    require_admin(state.as_ref(), &headers).await?;
    let created = state.catalog.create(medicine).await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

/// PUT /api/medicines/{id}: admin, replaces a catalog entry.
#[tracing::instrument(skip(state, headers, medicine))]
pub async fn update<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(medicine): Json<Medicine>,
) -> Result<Json<Medicine>, ApiError> {
    require_admin(state.as_ref(), &headers).await?;
    if medicine.id.as_str() != id {
        return Err(ApiError::BadRequest(
            "Medicine id in the body must match the path".to_string(),
        ));
    }
    Ok(Json(state.catalog.update(medicine).await?))
}

/// DELETE /api/medicines/{id}: admin, removes a catalog entry.
#[tracing::instrument(skip(state, headers))]
pub async fn remove<S: StateStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode, ApiError> {
    require_admin(state.as_ref(), &headers).await?;
    state.catalog.delete(&MedicineId::new(id)).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
