//! Handlers for the generic `/api/data` endpoints.
//!
//! Every request names its collection in the `collection` query parameter. Reads
//! translate the remaining parameters into a filter; writes address one document
//! by the raw identifier from the path.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use docgate::{
    backend::StoreBackend,
    error::DocumentStoreError,
    identifier::DocumentId,
    params::RawParams,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::RestResult,
    responses::{ApiResponse, document_to_json},
    state::AppState,
};

fn require_collection(params: &RawParams) -> Result<&str, DocumentStoreError> {
    params.collection().ok_or_else(|| {
        DocumentStoreError::InvalidRequest("Collection name is required".to_string())
    })
}

/// Lists documents matching the query parameters.
///
/// # HTTP Request
///
/// `GET /api/data?collection=[name]&[field]=[value]&sortBy=[field]&sortOrder=[asc|desc]&limit=[n]`
///
/// # Response
///
/// - `200 OK` - `{ success: true, data: [...] }`
/// - `400 Bad Request` - No collection given
/// - `500 Internal Server Error` - Store failure
pub async fn list_handler<B>(
    State(state): State<AppState<B>>,
    Query(params): Query<RawParams>,
) -> RestResult<ApiResponse<Vec<Value>>>
where
    B: StoreBackend + 'static,
{
    let name = require_collection(&params)?;
    debug!(collection = %name, params = params.len(), "Processing list request");

    let documents = state
        .store()
        .collection(name)
        .await
        .find_by_params(&params)
        .await?;

    Ok(ApiResponse::ok(
        documents.into_iter().map(document_to_json).collect(),
    ))
}

/// Partially updates one document with a nested JSON body.
///
/// # HTTP Request
///
/// `PUT /api/data/[id]?collection=[name]`
///
/// # Response
///
/// - `200 OK` - `{ success: true, data: {...} }` with the updated document
/// - `400 Bad Request` - No collection given, or the body is not a JSON object
/// - `404 Not Found` - No document with that identifier
/// - `500 Internal Server Error` - Store failure
pub async fn update_handler<B>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Query(params): Query<RawParams>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<ApiResponse<Value>>
where
    B: StoreBackend + 'static,
{
    let name = require_collection(&params)?;
    let Json(body) = body?;
    let id = DocumentId::new(id);

    let document = state
        .store()
        .collection(name)
        .await
        .update(&id, &body)
        .await?;

    info!(collection = %name, id = %id, "Document updated");

    Ok(ApiResponse::ok(document_to_json(document)))
}

/// Deletes one document and returns it.
///
/// # HTTP Request
///
/// `DELETE /api/data/[id]?collection=[name]`
///
/// # Response
///
/// - `200 OK` - `{ success: true, data: {...} }` with the deleted document
/// - `400 Bad Request` - No collection given
/// - `404 Not Found` - No document with that identifier
/// - `500 Internal Server Error` - Store failure
pub async fn delete_handler<B>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
    Query(params): Query<RawParams>,
) -> RestResult<ApiResponse<Value>>
where
    B: StoreBackend + 'static,
{
    let name = require_collection(&params)?;
    let id = DocumentId::new(id);

    let document = state
        .store()
        .collection(name)
        .await
        .delete(&id)
        .await?;

    info!(collection = %name, id = %id, "Document deleted");

    Ok(ApiResponse::ok(document_to_json(document)))
}
