use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
    routing::get,
};
use backend::dbs::SqliteDatabase;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const HISTORY: &str = "British mathematician, logician and computer scientist";

async fn test_app() -> Router {
    let db = SqliteDatabase::in_memory()
        .await
        .unwrap_or_else(|err| panic!("failed to open in-memory database: {err}"));
    backend::app(Arc::new(db))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))
        .unwrap_or_else(|err| panic!("failed to build request: {err}"));
    app.clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|err| panic!("router request failed: {err}"))
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response {
    send(app, method, uri, Some(&body.to_string())).await
}

async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap_or_else(|err| panic!("failed to read response body: {err}"));
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|err| panic!("response body is not JSON: {err}; body={bytes:?}"))
}

fn assert_json_content_type(response: &Response) {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    assert_eq!(content_type, Some("application/json; charset=utf-8"));
}

#[tokio::test]
async fn home_returns_welcome_message() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_json_content_type(&response);

    let body = response_json(response).await;
    assert!(body["message"].as_str().is_some_and(|m| m.contains("Welcome")));
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    let app = test_app().await;
    let payload = json!({ "name": "Alan Turing", "history": HISTORY });

    let response = send_json(&app, Method::POST, "/api/personalities", payload.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response_json(response).await,
        json!({ "id": 1, "name": "Alan Turing", "history": HISTORY })
    );

    let response = send_json(&app, Method::POST, "/api/personalities", payload).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Conflict");

    let response = send(&app, Method::GET, "/api/personalities/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Alan Turing");
    assert_eq!(body["history"], HISTORY);

    let response = send_json(
        &app,
        Method::PUT,
        "/api/personalities/1",
        json!({ "name": "Alan M. Turing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Alan M. Turing");
    assert_eq!(body["history"], HISTORY);

    let response = send(&app, Method::DELETE, "/api/personalities/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    assert!(bytes.is_empty());

    let response = send(&app, Method::GET, "/api/personalities/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["error"], "Not Found");

    let response = send(&app, Method::DELETE, "/api/personalities/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/personalities", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!([]));

    for name in ["Charles Babbage", "Ada Lovelace", "Grace Hopper"] {
        let response = send_json(
            &app,
            Method::POST,
            "/api/personalities",
            json!({ "name": name, "history": HISTORY }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let body = response_json(send(&app, Method::GET, "/api/personalities", None).await).await;
    let ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(body[0]["name"], "Charles Babbage");
}

#[tokio::test]
async fn validation_failures_carry_field_details() {
    let app = test_app().await;

    let response = send_json(&app, Method::POST, "/api/personalities", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Validation Failed");
    assert_eq!(body["details"]["name"], "the name field is required");
    assert_eq!(body["details"]["history"], "the history field is required");

    let response = send_json(
        &app,
        Method::POST,
        "/api/personalities",
        json!({ "name": "x".repeat(101), "history": HISTORY }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["details"]["name"].is_string());
    assert!(body["details"].get("history").is_none());

    send_json(
        &app,
        Method::POST,
        "/api/personalities",
        json!({ "name": "Alan Turing", "history": HISTORY }),
    )
    .await;
    let response = send_json(
        &app,
        Method::PUT,
        "/api/personalities/1",
        json!({ "history": "too short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(
        body["details"]["history"],
        "the history field must be at least 10 characters long"
    );
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = test_app().await;

    let response = send(&app, Method::POST, "/api/personalities", Some("{not json")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body.get("details").is_none());

    let response = send(&app, Method::PUT, "/api/personalities/1", Some("[1, 2")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn id_parsing_rules() {
    let app = test_app().await;

    // Non-numeric ids never reach a handler
    let response = send(&app, Method::GET, "/api/personalities/abc", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_json_content_type(&response);

    // Numeric but out of range
    let response = send(&app, Method::GET, "/api/personalities/99999999999", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["message"], "invalid id");

    // Zero is rejected by the service's id rule
    for method in [Method::GET, Method::DELETE] {
        let response = send(&app, method, "/api/personalities/0", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    let response = send_json(
        &app,
        Method::PUT,
        "/api/personalities/0",
        json!({ "name": "Nobody" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_conflicts_and_missing_records() {
    let app = test_app().await;
    for name in ["Ada Lovelace", "Alan Turing"] {
        send_json(
            &app,
            Method::POST,
            "/api/personalities",
            json!({ "name": name, "history": HISTORY }),
        )
        .await;
    }

    let response = send_json(
        &app,
        Method::PUT,
        "/api/personalities/2",
        json!({ "name": "Ada Lovelace" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response_json(send(&app, Method::GET, "/api/personalities/2", None).await).await;
    assert_eq!(body["name"], "Alan Turing");

    let response = send_json(
        &app,
        Method::PUT,
        "/api/personalities/42",
        json!({ "name": "Someone Else" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Client supplied ids are ignored
    let response = send_json(
        &app,
        Method::PUT,
        "/api/personalities/2",
        json!({ "id": 99, "history": "Codebreaker at Bletchley Park" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["name"], "Alan Turing");
}

#[tokio::test]
async fn unknown_routes_use_error_envelope() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/unknown", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_json_content_type(&response);
    assert_eq!(response_json(response).await["error"], "Not Found");
}

#[tokio::test]
async fn unsupported_methods_use_error_envelope() {
    let app = test_app().await;
    let created = send_json(
        &app,
        Method::POST,
        "/api/personalities",
        json!({ "name": "Ada Lovelace", "history": HISTORY }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    for (method, uri) in [
        (Method::PATCH, "/api/personalities/1"),
        (Method::POST, "/api/personalities/1"),
        (Method::POST, "/"),
        (Method::DELETE, "/api/personalities"),
    ] {
        let response = send(&app, method.clone(), uri, None).await;
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{method} {uri}"
        );
        assert_json_content_type(&response);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Method Not Allowed", "{method} {uri}");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    // A non-numeric id never matches the route, whatever the method.
    for method in [Method::PATCH, Method::POST] {
        let response = send(&app, method.clone(), "/api/personalities/abc", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");
        assert_json_content_type(&response);
        assert_eq!(response_json(response).await["error"], "Not Found");
    }
}

#[tokio::test]
async fn options_requests_are_answered_with_cors_headers() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/personalities")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_json_content_type(&response);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/personalities/1")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_json_content_type(&response);
    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(allowed.contains("PUT"));
}

async fn boom() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
async fn panics_become_internal_errors() {
    let app = backend::middleware::apply(Router::new().route("/boom", get(boom)));

    let response = send(&app, Method::GET, "/boom", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_json_content_type(&response);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Internal Server Error");
    assert!(!body["message"].as_str().unwrap().contains("exploded"));
}
