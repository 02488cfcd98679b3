//! Endpoint tests for the `/api/data` gateway.
//!
//! Tests the documented HTTP behaviors against the in-memory backend:
//! - Query translation (filters, `in` lists, existence, sort, limit)
//! - Partial updates with dotted paths
//! - Deletes
//! - Status codes and failure bodies (400, 404)

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use bson::{doc, oid::ObjectId};
use docgate::{
    backend::StoreBackendBuilder,
    memory::InMemoryStore,
    store::DocumentStore,
};
use docgate_server::{ServerConfig, create_app_with_config};
use serde_json::{Value, json};

/// Creates a test server over a seeded in-memory store.
async fn create_test_server() -> (TestServer, ObjectId) {
    let oid = ObjectId::new();
    let backend = InMemoryStore::builder()
        .with_documents("users", vec![
            doc! { "_id": "u1", "name": "Ada", "age": 36, "status": "active", "profile": { "city": "London", "zip": "N1" } },
            doc! { "_id": "u2", "name": "Grace", "age": 45, "status": "pending", "deletedAt": "2024-01-01" },
            doc! { "_id": "u3", "name": "Linus", "age": 28, "status": "banned" },
            doc! { "_id": 7, "name": "Ken", "age": 80, "status": "active" },
            doc! { "_id": oid, "name": "Barbara", "age": 51, "status": "active" },
        ])
        .with_documents("shiftwise_data", vec![
            doc! { "_id": "42", "shift": "night" },
            doc! { "_id": 42, "shift": "numeric" },
        ])
        .build()
        .await
        .expect("Failed to build in-memory backend");

    let config = ServerConfig::for_testing();
    let store = DocumentStore::with_configs(backend, config.collection_configs());
    let app = create_app_with_config(Arc::new(store), config);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, oid)
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|doc| doc["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

mod list {
    use super::*;

    #[tokio::test]
    async fn test_missing_collection_is_bad_request() {
        let (server, _) = create_test_server().await;

        let response = server.get("/api/data").add_query_param("status", "active").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert!(body["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_empty_collection_is_bad_request() {
        let (server, _) = create_test_server().await;

        let response = server.get("/api/data").add_query_param("collection", "").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lists_whole_collection_in_insertion_order() {
        let (server, oid) = create_test_server().await;

        let response = server.get("/api/data").add_query_param("collection", "users").await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(true));
        assert_eq!(names(&body), ["Ada", "Grace", "Linus", "Ken", "Barbara"]);
        assert_eq!(body["data"][4]["_id"], json!(oid.to_hex()));
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let (server, _) = create_test_server().await;

        let response = server.get("/api/data").add_query_param("collection", "nothing").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], json!([]));
    }

    #[tokio::test]
    async fn test_comma_list_filters_by_membership() {
        let (server, _) = create_test_server().await;

        let response = server
            .get("/api/data")
            .add_query_param("collection", "users")
            .add_query_param("status", "active,pending")
            .add_query_param("sortBy", "age")
            .await;

        response.assert_status_ok();
        assert_eq!(names(&response.json::<Value>()), ["Ada", "Grace", "Barbara", "Ken"]);
    }

    #[tokio::test]
    async fn test_numeric_values_are_inferred() {
        let (server, _) = create_test_server().await;

        let response = server
            .get("/api/data")
            .add_query_param("collection", "users")
            .add_query_param("age", "45")
            .await;

        assert_eq!(names(&response.json::<Value>()), ["Grace"]);
    }

    #[tokio::test]
    async fn test_exists_suffix_and_dotted_fields() {
        let (server, _) = create_test_server().await;

        let response = server
            .get("/api/data")
            .add_query_param("collection", "users")
            .add_query_param("deletedAt__exists", "false")
            .add_query_param("profile.city", "London")
            .await;

        assert_eq!(names(&response.json::<Value>()), ["Ada"]);
    }

    #[tokio::test]
    async fn test_sort_descending_and_limit() {
        let (server, _) = create_test_server().await;

        let response = server
            .get("/api/data")
            .add_query_param("collection", "users")
            .add_query_param("sortBy", "age")
            .add_query_param("sortOrder", "DESC")
            .add_query_param("limit", "2")
            .await;

        assert_eq!(names(&response.json::<Value>()), ["Ken", "Barbara"]);
    }

    #[tokio::test]
    async fn test_invalid_limit_falls_back_to_default() {
        let (server, _) = create_test_server().await;

        let response = server
            .get("/api/data")
            .add_query_param("collection", "users")
            .add_query_param("limit", "notanumber")
            .await;

        response.assert_status_ok();
        assert_eq!(names(&response.json::<Value>()).len(), 5);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn test_nested_body_updates_leaf_paths_only() {
        let (server, _) = create_test_server().await;

        let response = server
            .put("/api/data/u1")
            .add_query_param("collection", "users")
            .json(&json!({ "profile": { "city": "Paris" }, "tags": ["a", "b"] }))
            .await;

        response.assert_status_ok();
        let data = &response.json::<Value>()["data"];
        assert_eq!(data["profile"], json!({ "city": "Paris", "zip": "N1" }));
        assert_eq!(data["tags"], json!(["a", "b"]));
        assert_eq!(data["name"], json!("Ada"));
    }

    #[tokio::test]
    async fn test_numeric_and_object_ids_are_matched() {
        let (server, oid) = create_test_server().await;

        let numeric = server
            .put("/api/data/7")
            .add_query_param("collection", "users")
            .json(&json!({ "status": "retired" }))
            .await;
        numeric.assert_status_ok();
        assert_eq!(numeric.json::<Value>()["data"]["name"], json!("Ken"));

        let object = server
            .put(&format!("/api/data/{}", oid.to_hex()))
            .add_query_param("collection", "users")
            .json(&json!({ "status": "retired" }))
            .await;
        object.assert_status_ok();
        assert_eq!(object.json::<Value>()["data"]["name"], json!("Barbara"));
    }

    #[tokio::test]
    async fn test_string_id_collection_matches_raw_string_only() {
        let (server, _) = create_test_server().await;

        let response = server
            .put("/api/data/42")
            .add_query_param("collection", "shiftwise_data")
            .json(&json!({ "note": "checked" }))
            .await;

        response.assert_status_ok();
        let data = &response.json::<Value>()["data"];
        assert_eq!(data["_id"], json!("42"));
        assert_eq!(data["shift"], json!("night"));
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let (server, _) = create_test_server().await;

        let response = server
            .put("/api/data/missing")
            .add_query_param("collection", "users")
            .json(&json!({ "status": "x" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Document not found"));
    }

    #[tokio::test]
    async fn test_non_object_body_is_bad_request() {
        let (server, _) = create_test_server().await;

        let response = server
            .put("/api/data/u1")
            .add_query_param("collection", "users")
            .json(&json!([1, 2, 3]))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], json!(false));
    }

    #[tokio::test]
    async fn test_missing_collection_is_bad_request() {
        let (server, _) = create_test_server().await;

        let response = server
            .put("/api/data/u1")
            .json(&json!({ "status": "x" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_identifier_cannot_be_rewritten() {
        let (server, _) = create_test_server().await;

        let response = server
            .put("/api/data/u1")
            .add_query_param("collection", "users")
            .json(&json!({ "_id": "u2" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["success"], json!(false));

        let listed = server
            .get("/api/data")
            .add_query_param("collection", "users")
            .add_query_param("_id", "u1")
            .await;
        assert_eq!(names(&listed.json::<Value>()), ["Ada"]);
    }

    #[tokio::test]
    async fn test_empty_body_returns_current_document() {
        let (server, _) = create_test_server().await;

        let response = server
            .put("/api/data/u2")
            .add_query_param("collection", "users")
            .json(&json!({}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["name"], json!("Grace"));
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn test_delete_returns_document_and_removes_it() {
        let (server, _) = create_test_server().await;

        let response = server
            .delete("/api/data/u3")
            .add_query_param("collection", "users")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["name"], json!("Linus"));

        let again = server
            .delete("/api/data/u3")
            .add_query_param("collection", "users")
            .await;
        again.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_uses_raw_value_ids() {
        let (server, _) = create_test_server().await;

        let response = server
            .delete("/api/data/42")
            .add_query_param("collection", "shiftwise_data")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["shift"], json!("night"));
    }
}

#[tokio::test]
async fn test_health() {
    let (server, _) = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["backend"], json!("memory"));
}
