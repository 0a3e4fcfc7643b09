//! Catalog listing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use catalog::{CatalogFilter, PriceBand, Product};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub price: Option<PriceBand>,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub price_cents: i64,
    pub price: String,
    pub image: String,
    pub category: String,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            title: product.title().to_string(),
            price_cents: product.price().cents(),
            price: product.price().to_string(),
            image: product.image().to_string(),
            category: product.category().to_string(),
        }
    }
}

/// GET /products: lists catalog products, optionally by category and price band.
#[tracing::instrument(skip_all)]
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let Query(query) = query?;
    tracing::debug!(?query, "list products");
    let mut filter = CatalogFilter::new().price_band(query.price.unwrap_or_default());
    if let Some(category) = query.category.as_deref()
        && !category.is_empty()
    {
        filter = filter.category(category);
    }

    let session = state.session.lock().await;
    let products = session
        .products(&filter)
        .into_iter()
        .map(ProductResponse::from)
        .collect();
    Ok(Json(products))
}

/// GET /products/categories: lists categories in catalog order.
pub async fn categories(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let session = state.session.lock().await;
    Json(
        session
            .catalog()
            .categories()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    )
}
