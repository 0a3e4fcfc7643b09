//! Cart endpoints.
//!
//! Rejected cart requests are not errors: they answer `200 OK` with
//! `"outcome": "rejected"`, the reason, and the unchanged cart.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use catalog::ProductId;
use domain::{CartLine, CartRejection, CartStore, Outcome};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use crate::session::{SessionCommand, SessionReply};

// -- Request types --

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartLineResponse {
    pub product_id: String,
    pub title: String,
    pub image: String,
    pub category: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub line_total_cents: i64,
}

impl From<&CartLine> for CartLineResponse {
    fn from(line: &CartLine) -> Self {
        let product = line.product();
        Self {
            product_id: product.id().to_string(),
            title: product.title().to_string(),
            image: product.image().to_string(),
            category: product.category().to_string(),
            unit_price_cents: product.price().cents(),
            quantity: line.quantity(),
            line_total_cents: line.line_total().cents(),
        }
    }
}

#[derive(Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_quantity: u32,
    pub total_cents: i64,
    pub total: String,
}

impl From<&CartStore> for CartResponse {
    fn from(store: &CartStore) -> Self {
        let total = store.compute_total();
        Self {
            lines: store.lines().iter().map(CartLineResponse::from).collect(),
            total_quantity: store.cart().total_quantity(),
            total_cents: total.cents(),
            total: total.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct CartOutcomeResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CartRejection>,
    pub cart: CartResponse,
}

// -- Handlers --

/// GET /cart: current lines and total.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let session = state.session.lock().await;
    Json(CartResponse::from(session.cart()))
}

/// POST /cart/items: add a catalog product, or bump its quantity.
#[tracing::instrument(skip_all)]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<CartOutcomeResponse>, ApiError> {
    let Json(req) = payload?;
    tracing::debug!(product_id = %req.product_id, "add item");
    dispatch(
        &state,
        SessionCommand::AddToCart {
            product_id: ProductId::new(req.product_id),
        },
    )
    .await
}

/// POST /cart/items/{id}/increment
#[tracing::instrument(skip(state))]
pub async fn increment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CartOutcomeResponse>, ApiError> {
    dispatch(
        &state,
        SessionCommand::IncrementQuantity {
            product_id: ProductId::new(id),
        },
    )
    .await
}

/// POST /cart/items/{id}/decrement
#[tracing::instrument(skip(state))]
pub async fn decrement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CartOutcomeResponse>, ApiError> {
    dispatch(
        &state,
        SessionCommand::DecrementQuantity {
            product_id: ProductId::new(id),
        },
    )
    .await
}

/// DELETE /cart/items/{id}
#[tracing::instrument(skip(state))]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CartOutcomeResponse>, ApiError> {
    dispatch(
        &state,
        SessionCommand::RemoveFromCart {
            product_id: ProductId::new(id),
        },
    )
    .await
}

/// DELETE /cart
#[tracing::instrument(skip(state))]
pub async fn clear(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CartOutcomeResponse>, ApiError> {
    dispatch(&state, SessionCommand::ClearCart).await
}

async fn dispatch(
    state: &AppState,
    command: SessionCommand,
) -> Result<Json<CartOutcomeResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let outcome = match session.handle(command)? {
        SessionReply::Cart(outcome) => outcome,
        other => {
            return Err(ApiError::Internal(format!(
                "unexpected reply to cart command: {other:?}"
            )));
        }
    };

    let (label, reason) = match outcome {
        Outcome::Applied => ("applied", None),
        Outcome::Rejected(reason) => {
            tracing::warn!(code = reason.code(), %reason, "cart request rejected");
            ("rejected", Some(reason))
        }
    };

    Ok(Json(CartOutcomeResponse {
        outcome: label,
        reason,
        cart: CartResponse::from(session.cart()),
    }))
}
