//! Checkout endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog::ProductId;
use checkout::{CheckoutReceipt, PendingCheckout, Started};
use domain::{DeliveryForm, PurchaseItem};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use crate::routes::purchases::PurchaseResponse;
use crate::session::{SessionCommand, SessionReply};

// -- Request types --

#[derive(Deserialize)]
pub struct BuyNowRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

// -- Response types --

#[derive(Serialize)]
pub struct PendingItemResponse {
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
    pub line_total_cents: i64,
}

impl From<&PurchaseItem> for PendingItemResponse {
    fn from(item: &PurchaseItem) -> Self {
        Self {
            product_id: item.product.id().to_string(),
            title: item.product.title().to_string(),
            quantity: item.quantity,
            line_total_cents: item.line_total().cents(),
        }
    }
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub checkout_id: String,
    pub kind: String,
    pub items: Vec<PendingItemResponse>,
    pub total_cents: i64,
}

impl From<&PendingCheckout> for PendingResponse {
    fn from(pending: &PendingCheckout) -> Self {
        Self {
            checkout_id: pending.checkout_id().to_string(),
            kind: pending.kind().to_string(),
            items: pending.items().iter().map(PendingItemResponse::from).collect(),
            total_cents: pending.total().cents(),
        }
    }
}

#[derive(Serialize)]
pub struct CheckoutStatusResponse {
    pub state: String,
    pub pending: Option<PendingResponse>,
}

#[derive(Serialize)]
pub struct ReceiptResponse {
    pub checkout_id: String,
    pub kind: String,
    pub total_cents: i64,
    pub total: String,
    pub purchased_at: chrono::DateTime<chrono::Utc>,
    pub records: Vec<PurchaseResponse>,
}

impl From<&CheckoutReceipt> for ReceiptResponse {
    fn from(receipt: &CheckoutReceipt) -> Self {
        Self {
            checkout_id: receipt.checkout_id.to_string(),
            kind: receipt.kind.to_string(),
            total_cents: receipt.total.cents(),
            total: receipt.total.to_string(),
            purchased_at: receipt.purchased_at,
            records: receipt.records.iter().map(PurchaseResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: PendingResponse,
    pub state: String,
}

// -- Handlers --

/// GET /checkout: current state and pending selection.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<CheckoutStatusResponse> {
    let session = state.session.lock().await;
    let checkout = session.checkout();
    Json(CheckoutStatusResponse {
        state: checkout.state().to_string(),
        pending: checkout.pending().map(PendingResponse::from),
    })
}

/// POST /checkout/buy-now: start a checkout for one catalog product.
#[tracing::instrument(skip_all)]
pub async fn buy_now(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BuyNowRequest>, JsonRejection>,
) -> Result<Json<Started>, ApiError> {
    let Json(req) = payload?;
    tracing::debug!(product_id = %req.product_id, quantity = req.quantity, "buy now");
    let command = SessionCommand::BuyNow {
        product_id: ProductId::new(req.product_id),
        quantity: req.quantity,
    };
    start(&state, command).await
}

/// POST /cart/items/{id}/buy-now: start a checkout for one cart line at its
/// cart quantity.
#[tracing::instrument(skip(state))]
pub async fn buy_line(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Started>, ApiError> {
    let command = SessionCommand::BuyNowLine {
        product_id: ProductId::new(id),
    };
    start(&state, command).await
}

/// POST /checkout/buy-all: start a checkout for the whole cart.
#[tracing::instrument(skip(state))]
pub async fn buy_all(State(state): State<Arc<AppState>>) -> Result<Json<Started>, ApiError> {
    start(&state, SessionCommand::BuyAll).await
}

/// POST /checkout/submit: validate delivery details and record the purchase.
#[tracing::instrument(skip_all)]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DeliveryForm>, JsonRejection>,
) -> Result<(StatusCode, Json<ReceiptResponse>), ApiError> {
    let Json(form) = payload?;
    let mut session = state.session.lock().await;
    match session.handle(SessionCommand::SubmitDetails { form })? {
        SessionReply::Purchased(receipt) => {
            Ok((StatusCode::CREATED, Json(ReceiptResponse::from(&receipt))))
        }
        other => Err(unexpected(other)),
    }
}

/// POST /checkout/cancel: abandon the pending checkout.
#[tracing::instrument(skip(state))]
pub async fn cancel(State(state): State<Arc<AppState>>) -> Result<Json<CancelResponse>, ApiError> {
    let mut session = state.session.lock().await;
    match session.handle(SessionCommand::CancelCheckout)? {
        SessionReply::Cancelled(pending) => Ok(Json(CancelResponse {
            cancelled: PendingResponse::from(&pending),
            state: session.checkout().state().to_string(),
        })),
        other => Err(unexpected(other)),
    }
}

async fn start(state: &AppState, command: SessionCommand) -> Result<Json<Started>, ApiError> {
    let mut session = state.session.lock().await;
    match session.handle(command)? {
        SessionReply::CheckoutStarted(started) => Ok(Json(started)),
        other => Err(unexpected(other)),
    }
}

fn unexpected(reply: SessionReply) -> ApiError {
    ApiError::Internal(format!("unexpected reply to checkout command: {reply:?}"))
}
