//! Health check endpoint handler.

use axum::{Json, extract::State};
use docgate::backend::StoreBackend;
use serde_json::{Value, json};
use tracing::debug;

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// `GET /health` returns `200 OK` with the backend in use.
pub async fn health_handler<B>(State(state): State<AppState<B>>) -> Json<Value>
where
    B: StoreBackend + 'static,
{
    debug!("Processing health check request");

    Json(json!({
        "success": true,
        "status": "ok",
        "backend": state.store().backend().backend_name(),
    }))
}
