//! Purchase history endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use common::{CheckoutId, Version};
use domain::{PurchaseQuery, PurchaseRecord};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct PurchaseListQuery {
    pub checkout_id: Option<String>,
    pub product_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct PurchaseResponse {
    pub sequence: u64,
    pub checkout_id: String,
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub expected_date: String,
    pub purchased_at: DateTime<Utc>,
}

impl From<&PurchaseRecord> for PurchaseResponse {
    fn from(record: &PurchaseRecord) -> Self {
        let delivery = record.delivery();
        Self {
            sequence: record.sequence().as_u64(),
            checkout_id: record.checkout_id().to_string(),
            product_id: record.product_id().to_string(),
            title: record.product().title().to_string(),
            quantity: record.quantity(),
            unit_price_cents: record.product().price().cents(),
            line_total_cents: record.line_total().cents(),
            name: delivery.name.clone(),
            address: delivery.address.clone(),
            phone: delivery.phone.clone(),
            expected_date: delivery.expected_date.clone(),
            purchased_at: record.purchased_at(),
        }
    }
}

/// GET /purchases: purchase history, oldest first.
#[tracing::instrument(skip_all)]
pub async fn list(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PurchaseListQuery>, QueryRejection>,
) -> Result<Json<Vec<PurchaseResponse>>, ApiError> {
    let Query(query) = query?;
    tracing::debug!(?query, "list purchases");
    let mut purchase_query = match query.checkout_id.as_deref() {
        Some(id) => PurchaseQuery::for_checkout(parse_checkout_id(id)?),
        None => PurchaseQuery::new(),
    };
    if let Some(product_id) = query.product_id {
        purchase_query = purchase_query.product_id(product_id);
    }
    if let Some(limit) = query.limit {
        purchase_query = purchase_query.limit(limit);
    }

    let session = state.session.lock().await;
    let records = session
        .purchases()
        .query(&purchase_query)
        .into_iter()
        .map(PurchaseResponse::from)
        .collect();
    Ok(Json(records))
}

/// GET /purchases/{sequence}: one record by its 1-based position.
#[tracing::instrument(skip_all)]
pub async fn get(
    State(state): State<Arc<AppState>>,
    sequence: Result<Path<u64>, PathRejection>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let Path(sequence) = sequence?;
    let session = state.session.lock().await;
    session
        .purchases()
        .get(Version::new(sequence))
        .map(|record| Json(PurchaseResponse::from(record)))
        .ok_or_else(|| ApiError::NotFound(format!("Purchase {sequence} not found")))
}

fn parse_checkout_id(id: &str) -> Result<CheckoutId, ApiError> {
    uuid::Uuid::parse_str(id)
        .map(CheckoutId::from_uuid)
        .map_err(|e| ApiError::BadRequest(format!("Invalid checkout_id: {e}")))
}
