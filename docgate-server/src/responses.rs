//! Success envelopes and BSON to JSON rendering.
//!
//! Identifiers and timestamps are rendered the way API clients expect them:
//! an ObjectId as its hex string and a datetime as an RFC 3339 string. Every
//! other value uses relaxed extended JSON.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bson::{Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Renders a BSON value as client-facing JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Bson::DateTime(dt).into_relaxed_extjson()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Renders a stored document as a JSON object, keeping field order.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

#[cfg(test)]
mod tests {
    use bson::{DateTime, doc, oid::ObjectId};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_object_ids_and_dates_render_as_strings() {
        let oid = ObjectId::new();
        let document = doc! {
            "_id": oid,
            "createdAt": DateTime::from_millis(0),
            "nested": { "refs": [oid] },
        };

        assert_eq!(
            document_to_json(document),
            json!({
                "_id": oid.to_hex(),
                "createdAt": "1970-01-01T00:00:00Z",
                "nested": { "refs": [oid.to_hex()] },
            })
        );
    }

    #[test]
    fn test_scalars_use_relaxed_json() {
        let document = doc! { "n": 3_i64, "f": 1.5, "b": true, "s": "x", "z": Bson::Null };

        assert_eq!(
            document_to_json(document),
            json!({ "n": 3, "f": 1.5, "b": true, "s": "x", "z": null })
        );
    }
}
