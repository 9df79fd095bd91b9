//! HTTP API server with observability for the storefront.
//!
//! REST endpoints for the catalog, identity-scoped carts and bookmarks,
//! checkout and tracking, the back office and the health assistant, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use store::StateStore;
use storefront::{
    ActivityLog, BookmarkService, CartService, CatalogService, InMemoryAssistantService,
    InMemoryAuthService, InMemoryNotificationService, OrderService,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Development admin account seeded into the in-memory auth backend.
const DEV_ADMIN_EMAIL: &str = "admin@store.test";
const DEV_ADMIN_NAME: &str = "Store Admin";
const DEV_ADMIN_PASSWORD: &str = "admin123";

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: StateStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/auth/register", post(routes::auth::register::<S>))
        .route("/api/auth/login", post(routes::auth::login::<S>))
        .route("/api/medicines", get(routes::catalog::list::<S>))
        .route("/api/medicines", post(routes::catalog::create::<S>))
        .route("/api/medicines/{id}", get(routes::catalog::get::<S>))
        .route("/api/medicines/{id}", put(routes::catalog::update::<S>))
        .route("/api/medicines/{id}", delete(routes::catalog::remove::<S>))
        .route(
            "/api/medicines/{id}/quote",
            get(routes::catalog::get_quote::<S>),
        )
        .route("/api/cart", get(routes::cart::view::<S>))
        .route("/api/cart", delete(routes::cart::clear::<S>))
        .route("/api/cart/items", post(routes::cart::add_item::<S>))
        .route(
            "/api/cart/items/{id}",
            patch(routes::cart::update_quantity::<S>),
        )
        .route(
            "/api/cart/items/{id}",
            delete(routes::cart::remove_item::<S>),
        )
        .route("/api/bookmarks", get(routes::bookmarks::list::<S>))
        .route("/api/bookmarks/{id}", put(routes::bookmarks::add::<S>))
        .route("/api/bookmarks/{id}", delete(routes::bookmarks::remove::<S>))
        .route("/api/orders", post(routes::orders::create::<S>))
        .route("/api/orders", get(routes::orders::list::<S>))
        .route("/api/orders/{id}", get(routes::orders::get::<S>))
        .route(
            "/api/orders/{id}/tracking",
            get(routes::orders::tracking::<S>),
        )
        .route("/api/admin/orders", get(routes::admin::list_orders::<S>))
        .route(
            "/api/admin/orders/{id}/status",
            patch(routes::admin::update_status::<S>),
        )
        .route("/api/admin/activity", get(routes::admin::activity::<S>))
        .route("/api/assistant", post(routes::assistant::ask::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over the given store.
///
/// Wires every service to the shared store and seeds the development
/// admin account into the in-memory auth backend.
pub fn create_default_state<S: StateStore + Clone + 'static>(store: S) -> Arc<AppState<S>> {
    let notifier = InMemoryNotificationService::new();
    let auth = InMemoryAuthService::with_admin(DEV_ADMIN_EMAIL, DEV_ADMIN_NAME, DEV_ADMIN_PASSWORD);
    let assistant = InMemoryAssistantService::new();

    Arc::new(AppState {
        catalog: CatalogService::new(store.clone()),
        cart: CartService::new(store.clone()),
        bookmarks: BookmarkService::new(store.clone()),
        orders: OrderService::new(store.clone(), notifier),
        activity: ActivityLog::new(store),
        auth,
        assistant,
    })
}
