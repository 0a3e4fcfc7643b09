//! HTTP storefront over a single shopper session.
//!
//! Provides JSON endpoints for browsing the catalog, editing the cart,
//! checking out and reading purchase history, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use catalog::{Catalog, JsonFileCatalog, Product};
use checkout::CheckoutConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use session::Session;

/// Shared application state accessible from all handlers.
///
/// The mutex serializes every request against the session, so commands are
/// handled one at a time in arrival order.
pub struct AppState {
    pub session: Mutex<Session>,
}

/// Bundled product feed used when no `CATALOG_PATH` is configured.
const DEMO_CATALOG: &str = include_str!("../fixtures/catalog.json");

/// Parses the bundled demo product feed.
pub fn demo_products() -> catalog::Result<Vec<Product>> {
    JsonFileCatalog::parse(DEMO_CATALOG)
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products", get(routes::products::list))
        .route("/products/categories", get(routes::products::categories))
        .route("/cart", get(routes::cart::get).delete(routes::cart::clear))
        .route("/cart/items", post(routes::cart::add_item))
        .route("/cart/items/{id}", delete(routes::cart::remove))
        .route("/cart/items/{id}/increment", post(routes::cart::increment))
        .route("/cart/items/{id}/decrement", post(routes::cart::decrement))
        .route("/cart/items/{id}/buy-now", post(routes::checkout::buy_line))
        .route("/checkout", get(routes::checkout::status))
        .route("/checkout/buy-now", post(routes::checkout::buy_now))
        .route("/checkout/buy-all", post(routes::checkout::buy_all))
        .route("/checkout/submit", post(routes::checkout::submit))
        .route("/checkout/cancel", post(routes::checkout::cancel))
        .route("/purchases", get(routes::purchases::list))
        .route("/purchases/{sequence}", get(routes::purchases::get))
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

/// Creates the application state with an empty cart and purchase history.
pub fn create_default_state(catalog: Catalog, config: CheckoutConfig) -> Arc<AppState> {
    Arc::new(AppState {
        session: Mutex::new(Session::new(catalog, config)),
    })
}
