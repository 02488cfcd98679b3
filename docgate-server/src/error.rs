//! Error types for the docgate HTTP API.
//!
//! Every failure is rendered as `{ "success": false, "message": ... }`.
//!
//! # Error Mapping
//!
//! | Store Error | HTTP Status |
//! |-------------|-------------|
//! | InvalidRequest | 400 |
//! | DocumentNotFound | 404 |
//! | anything else | 500 |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use docgate::error::DocumentStoreError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum RestError {
    /// The request cannot be served as sent (HTTP 400).
    #[error("{message}")]
    BadRequest { message: String },

    /// The addressed document does not exist (HTTP 404).
    #[error("{message}")]
    NotFound { message: String },

    /// The store failed; the message is passed through (HTTP 500).
    #[error("{message}")]
    InternalError { message: String },
}

impl RestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = json!({
            "success": false,
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<DocumentStoreError> for RestError {
    fn from(err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::InvalidRequest(message) => RestError::BadRequest { message },
            DocumentStoreError::DocumentNotFound(..) => RestError::NotFound {
                message: "Document not found".to_string(),
            },
            DocumentStoreError::Backend(message) => RestError::InternalError { message },
            other => RestError::InternalError {
                message: other.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(err: JsonRejection) -> Self {
        RestError::BadRequest {
            message: err.body_text(),
        }
    }
}

pub type RestResult<T> = Result<T, RestError>;
