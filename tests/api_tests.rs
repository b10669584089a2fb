// File: tests/api_tests.rs


use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use test_helpers::TestApp;
use uuid::Uuid;

async fn create(app: &TestApp, account: serde_json::Value) -> String {
    let (status, body) = app
        .send(Method::POST, "/accounts", Some(json!({ "account": account })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_account_crud_flow() {
    let app = TestApp::new();

    let id = create(&app, json!({ "name": "A", "status": "active" })).await;
    assert!(Uuid::parse_str(&id).is_ok());

    let (status, body) = app.send(Method::GET, &format!("/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["name"], "A");
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["login"], "");
    let created_at = body["data"]["created_at"].clone();
    assert!(created_at.is_string());

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/accounts/{}", id),
            Some(json!({ "account": { "name": "B" } })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.send(Method::GET, &format!("/accounts/{}", id), None).await;
    assert_eq!(body["data"]["name"], "B");
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["created_at"], created_at);

    let (status, _) = app.send(Method::DELETE, &format!("/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(Method::GET, &format!("/accounts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "account_not_found");
}

#[tokio::test]
async fn test_list_accounts() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["count"], 0);

    create(&app, json!({ "name": "first" })).await;
    create(&app, json!({ "name": "second", "emailPassword": "secret" })).await;

    let (_, body) = app.send(Method::GET, "/accounts", None).await;
    let accounts = body["data"].as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(body["meta"]["count"], 2);
    assert!(accounts
        .iter()
        .any(|a| a["name"] == "second" && a["email_password"] == "secret"));
}

#[tokio::test]
async fn test_missing_and_malformed_ids() {
    let app = TestApp::new();
    let missing = Uuid::new_v4();

    let (status, _) = app.send(Method::GET, &format!("/accounts/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/accounts/{}", missing),
            Some(json!({ "account": { "name": "B" } })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &format!("/accounts/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.send(Method::GET, "/accounts/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::POST, "/accounts", Some(json!({ "name": "missing wrapper" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_requests_fail_after_shutdown() {
    let app = TestApp::new();
    app.shutdown.cancel();

    let (status, body) = app.send(Method::GET, "/accounts", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "cancelled");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["storage"], "memory");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/accounts/{id}"].is_object());
}

#[tokio::test]
async fn test_error_body_carries_request_id() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri(format!("/accounts/{}", Uuid::new_v4()))
        .header("x-request-id", "req-404")
        .body(Body::empty())
        .unwrap();

    let (status, headers, body) = app.request(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers["x-request-id"], "req-404");
    assert_eq!(body["request_id"], "req-404");
    assert_eq!(body["error"]["code"], "account_not_found");
}

#[tokio::test]
async fn test_generated_request_id_matches_error_body() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/accounts/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let (status, headers, body) = app.request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let generated = headers["x-request-id"].to_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());
    assert_eq!(body["request_id"], generated);
}
