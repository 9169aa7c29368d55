use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use todo_server::todo::TodoState;
use todo_server::web::create_app_router;
use tower::ServiceExt;

mod common;

/// Setup function for endpoint tests using an in-memory SQLite database.
async fn setup_app() -> anyhow::Result<Router> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let db = common::setup_db().await?;
    let todo_state = TodoState { db: Arc::new(db) };
    Ok(create_app_router(todo_state))
}

/// Test helper to build a request with a JSON body.
fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper to send a request and decode the JSON response body.
async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn can_list_todos_when_table_is_empty() {
    let app = setup_app().await.expect("Failed to setup test app");

    let request = Request::builder()
        .uri("/todos")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn created_todo_appears_in_list() {
    let app = setup_app().await.expect("Failed to setup test app");

    let (status, created) = send_json(
        &app,
        json_request(Method::POST, "/todos", json!({"title": "buy milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "buy milk");
    assert_eq!(created["status"], Value::Null);
    assert!(created["id"].is_i64());

    let request = Request::builder()
        .uri("/todos")
        .body(Body::empty())
        .unwrap();
    let (status, listed) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let todos = listed.as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["title"], "buy milk");
}

#[tokio::test]
async fn todos_are_listed_in_insertion_order() {
    let app = setup_app().await.expect("Failed to setup test app");

    for title in ["first", "second", "third"] {
        let (status, _) = send_json(
            &app,
            json_request(Method::POST, "/todos", json!({"title": title})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let request = Request::builder()
        .uri("/todos")
        .body(Body::empty())
        .unwrap();
    let (_, listed) = send_json(&app, request).await;

    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn updating_nonexistent_todo_reports_zero_affected_rows() {
    let app = setup_app().await.expect("Failed to setup test app");

    let (status, body) = send_json(
        &app,
        json_request(
            Method::PUT,
            "/todos/999999",
            json!({"title": "anything", "status": "done"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"affected": 0}));
}

#[tokio::test]
async fn deleting_nonexistent_todo_reports_zero_affected_rows() {
    let app = setup_app().await.expect("Failed to setup test app");

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/todos/999999")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"affected": 0}));
}

#[tokio::test]
async fn update_and_delete_reject_non_numeric_ids() {
    let app = setup_app().await.expect("Failed to setup test app");

    let (status, body) = send_json(
        &app,
        json_request(
            Method::PUT,
            "/todos/abc",
            json!({"title": "anything", "status": "done"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid ID"}));

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/todos/abc")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid ID"}));
}

#[tokio::test]
async fn id_with_trailing_garbage_targets_the_leading_integer() {
    let app = setup_app().await.expect("Failed to setup test app");

    let (_, created) = send_json(
        &app,
        json_request(Method::POST, "/todos", json!({"title": "garbage tolerant"})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        json_request(
            Method::PUT,
            &format!("/todos/{}abc", id),
            json!({"title": "renamed", "status": "done"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"affected": 1}));
}

#[tokio::test]
async fn full_todo_round_trip() {
    let app = setup_app().await.expect("Failed to setup test app");

    // create
    let (status, created) = send_json(
        &app,
        json_request(Method::POST, "/todos", json!({"title": "buy milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();

    // read
    let request = Request::builder()
        .uri("/todos")
        .body(Body::empty())
        .unwrap();
    let (_, listed) = send_json(&app, request).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // update
    let (status, updated) = send_json(
        &app,
        json_request(
            Method::PUT,
            &format!("/todos/{}", id),
            json!({"title": "buy oat milk", "status": "in progress"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"affected": 1}));

    // read back the new values
    let request = Request::builder()
        .uri("/todos")
        .body(Body::empty())
        .unwrap();
    let (_, listed) = send_json(&app, request).await;
    let todos = listed.as_array().unwrap();
    assert_eq!(todos[0]["title"], "buy oat milk");
    assert_eq!(todos[0]["status"], "in progress");

    // delete
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/todos/{}", id))
        .body(Body::empty())
        .unwrap();
    let (status, deleted) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"affected": 1}));

    // gone
    let request = Request::builder()
        .uri("/todos")
        .body(Body::empty())
        .unwrap();
    let (_, listed) = send_json(&app, request).await;
    assert_eq!(listed, json!([]));
}
