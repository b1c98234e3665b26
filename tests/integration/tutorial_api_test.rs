mod common;

use std::sync::Arc;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::{
    app_with, body_bytes, body_json, expect_status, memory_app, seed, send, FailingRepository,
};
use tutorial_api::database::TutorialRepository;

#[tokio::test]
async fn test_create_returns_created_record() {
    let (app, repository) = memory_app();

    let response = send(
        &app,
        Method::POST,
        "/api/tutorials",
        Some(json!({
            "title": "new tutorial created",
            "description": "dummy data",
            "published": false
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["title"], "new tutorial created");
    assert_eq!(body["description"], "dummy data");
    assert_eq!(body["published"], false);
    assert!(body["id"].as_i64().is_some());

    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_ignores_client_id_and_defaults_published() {
    let (app, _repository) = memory_app();

    let response = send(
        &app,
        Method::POST,
        "/api/tutorials",
        Some(json!({"id": 99, "title": "no flag"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["published"], false);
    assert!(body["description"].is_null());
}

#[tokio::test]
async fn test_create_rejects_missing_or_blank_title() {
    let (app, repository) = memory_app();

    for payload in [
        json!({"description": "no title"}),
        json!({"title": "", "description": "empty"}),
        json!({"title": "   ", "description": "blank"}),
        json!({"title": null}),
    ] {
        let response = send(&app, Method::POST, "/api/tutorials", Some(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Title is required");
        assert_eq!(body["code"], "VAL_3002");
        assert_eq!(body["field"], "title");
    }

    assert_eq!(repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_rejects_long_title() {
    let (app, repository) = memory_app();

    let response = send(
        &app,
        Method::POST,
        "/api/tutorials",
        Some(json!({"title": "x".repeat(256), "description": "too long"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Title is too long");
    assert_eq!(repository.count().await.unwrap(), 0);

    // The bound itself is accepted
    let status = expect_status(
        &app,
        Method::POST,
        "/api/tutorials",
        Some(json!({"title": "x".repeat(255)})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_nul_characters_are_rejected_before_storage() {
    let (app, repository) = memory_app();

    let response = send(&app, Method::POST, "/api/tutorials", Some(json!({"title": "a\u{0}b"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Text must not contain NUL characters");
    assert_eq!(body["field"], "title");

    let response = send(
        &app,
        Method::POST,
        "/api/tutorials",
        Some(json!({"title": "fine", "description": "dummy\u{0}data"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "description");

    let stored = seed(&repository, "keep me", "dummy data", false).await;
    let status = expect_status(
        &app,
        Method::PUT,
        &format!("/api/tutorials/{}", stored.id),
        Some(json!({"title": "a\u{0}b"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(repository.count().await.unwrap(), 1);
}

// Rejected before the store is called
#[tokio::test]
async fn test_nul_title_never_reaches_store() {
    let app = app_with(Arc::new(FailingRepository));

    let status = expect_status(&app, Method::POST, "/api/tutorials", Some(json!({"title": "a\u{0}b"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let (app, _repository) = memory_app();

    let response = app_request_raw(&app, "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid JSON format");

    let response = send(
        &app,
        Method::POST,
        "/api/tutorials",
        Some(json!({"title": "ok", "published": "yes"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn app_request_raw(app: &axum::Router, raw: &str) -> axum::http::Response<axum::body::Body> {
    use tower::ServiceExt;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/tutorials")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(raw.to_string()))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

#[tokio::test]
async fn test_get_by_id_returns_record() {
    let (app, repository) = memory_app();
    let stored = seed(&repository, "first tutorial title", "dummy data", false).await;

    let response = send(&app, Method::GET, &format!("/api/tutorials/{}", stored.id), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], stored.id);
    assert_eq!(body["title"], "first tutorial title");
    assert_eq!(body["description"], "dummy data");
    assert_eq!(body["published"], false);
}

#[tokio::test]
async fn test_unknown_id_is_not_found_with_empty_body() {
    let (app, _repository) = memory_app();

    let response = send(&app, Method::GET, "/api/tutorials/42", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    let status = expect_status(
        &app,
        Method::PUT,
        "/api/tutorials/42",
        Some(json!({"title": "updated title", "published": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let status = expect_status(&app, Method::DELETE, "/api/tutorials/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (app, _repository) = memory_app();

    let response = send(&app, Method::GET, "/api/tutorials/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VAL_3003");
}

#[tokio::test]
async fn test_list_published_returns_only_published_in_id_order() {
    let (app, repository) = memory_app();
    let first = seed(&repository, "published one", "a", true).await;
    seed(&repository, "draft", "b", false).await;
    let third = seed(&repository, "published two", "c", true).await;

    let response = send(&app, Method::GET, "/api/tutorials/published", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], first.id);
    assert_eq!(items[0]["title"], "published one");
    assert_eq!(items[1]["id"], third.id);
}

#[tokio::test]
async fn test_list_published_on_empty_store() {
    let (app, _repository) = memory_app();

    let response = send(&app, Method::GET, "/api/tutorials/published", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_list_all_and_title_filter() {
    let (app, repository) = memory_app();
    seed(&repository, "Rust ownership", "a", true).await;
    seed(&repository, "Axum routing", "b", false).await;
    seed(&repository, "Async Rust", "c", false).await;

    let body = body_json(send(&app, Method::GET, "/api/tutorials", None).await).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let body = body_json(send(&app, Method::GET, "/api/tutorials?title=Rust", None).await).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Rust ownership", "Async Rust"]);

    // Case-sensitive
    let body = body_json(send(&app, Method::GET, "/api/tutorials?title=rust", None).await).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_id() {
    let (app, repository) = memory_app();
    let stored = seed(&repository, "first tutorial title", "dummy data", false).await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/tutorials/{}", stored.id),
        Some(json!({
            "title": "updated title",
            "description": "dummy data",
            "published": true
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], stored.id);
    assert_eq!(body["title"], "updated title");
    assert_eq!(body["published"], true);

    let reloaded = repository.find_by_id(stored.id).await.unwrap().unwrap();
    assert_eq!(reloaded.title, "updated title");
    assert!(reloaded.published);
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let (app, repository) = memory_app();
    let stored = seed(&repository, "keep me", "dummy data", false).await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/tutorials/{}", stored.id),
        Some(json!({"title": "y".repeat(300), "published": true})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Title is too long");

    // Invalid payload on a missing id is still a validation failure
    let status = expect_status(
        &app,
        Method::PUT,
        "/api/tutorials/999",
        Some(json!({"title": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unchanged = repository.find_by_id(stored.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "keep me");
}

#[tokio::test]
async fn test_delete_by_id() {
    let (app, repository) = memory_app();
    let stored = seed(&repository, "doomed", "dummy data", false).await;

    let response = send(&app, Method::DELETE, &format!("/api/tutorials/{}", stored.id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let status = expect_status(&app, Method::DELETE, &format!("/api/tutorials/{}", stored.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_all_is_idempotent() {
    let (app, repository) = memory_app();
    seed(&repository, "one", "a", true).await;
    seed(&repository, "two", "b", false).await;

    let status = expect_status(&app, Method::DELETE, "/api/tutorials", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(repository.count().await.unwrap(), 0);

    let status = expect_status(&app, Method::DELETE, "/api/tutorials", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (app, repository) = memory_app();
    let first = seed(&repository, "one", "a", false).await;
    expect_status(&app, Method::DELETE, "/api/tutorials", None).await;

    let body = body_json(
        send(&app, Method::POST, "/api/tutorials", Some(json!({"title": "two"}))).await,
    )
    .await;
    assert!(body["id"].as_i64().unwrap() > first.id);
}

#[tokio::test]
async fn test_store_failures_are_server_errors() {
    let app = app_with(Arc::new(FailingRepository));

    for (method, uri, body) in [
        (Method::GET, "/api/tutorials/1", None),
        (Method::GET, "/api/tutorials", None),
        (Method::GET, "/api/tutorials/published", None),
        (Method::POST, "/api/tutorials", Some(json!({"title": "t"}))),
        (Method::PUT, "/api/tutorials/1", Some(json!({"title": "t"}))),
        (Method::DELETE, "/api/tutorials/1", None),
        (Method::DELETE, "/api/tutorials", None),
    ] {
        let response = send(&app, method.clone(), uri, body).await;
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{} {}",
            method,
            uri
        );

        let body = body_json(response).await;
        assert_eq!(body["code"], "DB_7002");
        assert!(!body["message"].as_str().unwrap().contains("connection reset"));
    }
}

#[tokio::test]
async fn test_validation_runs_before_failing_store() {
    let app = app_with(Arc::new(FailingRepository));

    let status = expect_status(&app, Method::POST, "/api/tutorials", Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let (app, _repository) = memory_app();

    for uri in ["/api/tutorials", "/api/tutorials/7", "/no/such/route"] {
        let response = send(&app, Method::GET, uri, None).await;
        let headers = response.headers();

        assert!(headers.contains_key("x-request-id"), "{}", uri);
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    }
}

#[tokio::test]
async fn test_health_reports_storage() {
    let (app, repository) = memory_app();
    seed(&repository, "one", "a", true).await;

    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage_backend"], "memory");
    assert_eq!(body["dependencies"][0]["record_count"], 1);

    let app = app_with(Arc::new(FailingRepository));
    let body = body_json(send(&app, Method::GET, "/health", None).await).await;
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_metrics_disabled_is_unavailable() {
    let (app, _repository) = memory_app();

    let status = expect_status(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _repository) = memory_app();

    let response = send(&app, Method::GET, "/api/docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/api/tutorials/{id}"].is_object());
}

#[tokio::test]
async fn test_error_body_request_id_matches_header() {
    let (app, _repository) = memory_app();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/tutorials")
        .header(header::CONTENT_TYPE, "application/json")
        .header("X-Request-ID", "corr-123")
        .body(axum::body::Body::from(json!({"title": ""}).to_string()))
        .unwrap();
    let response = {
        use tower::ServiceExt;
        app.clone().oneshot(request).await.unwrap()
    };
    assert_eq!(response.headers().get("x-request-id").unwrap(), "corr-123");
    assert_eq!(body_json(response).await["request_id"], "corr-123");

    // Generated ids are shared too
    let app = app_with(Arc::new(FailingRepository));
    let response = send(&app, Method::GET, "/api/tutorials", None).await;
    let header_id = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(body_json(response).await["request_id"], header_id.as_str());
}
