//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
}

/// GET /health: returns liveness and the size of the loaded catalog.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let session = state.session.lock().await;
    Json(HealthResponse {
        status: "ok",
        products: session.catalog().len(),
    })
}
