//! Route configuration.

use axum::{
    Router,
    routing::{get, put},
};
use docgate::backend::StoreBackend;

use crate::{handlers, state::AppState};

/// Creates all API routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /api/data` - Query a collection
/// - `PUT /api/data/{id}` - Partially update a document
/// - `DELETE /api/data/{id}` - Delete a document
pub fn create_routes<B>(state: AppState<B>) -> Router
where
    B: StoreBackend + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<B>))
        .route("/api/data", get(handlers::list_handler::<B>))
        .route(
            "/api/data/{id}",
            put(handlers::update_handler::<B>).delete(handlers::delete_handler::<B>),
        )
        .with_state(state)
}
