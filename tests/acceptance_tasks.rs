use tasks::{application::task_service::TaskServiceImpl, http::routing, http::routing::tasks as task_routes, infrastructure::sqlite_repo::SqliteTaskRepository};
use tasks::domain::repository::TaskRepository;
use tasks::http::types::ApiError;
use axum::body::to_bytes;
use axum::Router;
use serde_json::{json, Value};

async fn app() -> Router {
    // use in-memory sqlite for tests
    let repo = SqliteTaskRepository::connect("sqlite::memory:").await.unwrap();
    repo.init().await.unwrap();
    let service = TaskServiceImpl::new(repo);
    routing::app(task_routes::router(task_routes::AppState { service }))
}

#[tokio::test]
async fn acceptance_empty_list_after_start() {
    let app = app().await;
    let (status, body) = call(&app, "GET", "/tasks", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn acceptance_create_then_list() {
    let app = app().await;
    let (status, created) = call(&app, "POST", "/tasks", Some(json!({ "text": "Buy milk", "completed": false }))).await;
    assert_eq!(status, 201);
    assert_eq!(created["text"], "Buy milk");
    assert_eq!(created["completed"], false);
    assert!(created["id"].is_i64());

    let (status, list) = call(&app, "GET", "/tasks", None).await;
    assert_eq!(status, 200);
    assert_eq!(list, json!([{ "id": created["id"], "text": "Buy milk", "completed": false }]));
}

#[tokio::test]
async fn acceptance_completed_defaults_to_false() {
    let app = app().await;
    let (status, created) = call(&app, "POST", "/tasks", Some(json!({ "text": "Walk dog" }))).await;
    assert_eq!(status, 201);
    assert_eq!(created["completed"], false);
}

#[tokio::test]
async fn acceptance_toggle_keeps_text_and_edit_keeps_completed() {
    let app = app().await;
    let (_, created) = call(&app, "POST", "/tasks", Some(json!({ "text": "Buy milk", "completed": false }))).await;
    let path = format!("/tasks/{}", created["id"]);

    let (status, toggled) = call(&app, "PUT", &path, Some(json!({ "completed": true }))).await;
    assert_eq!(status, 200);
    assert_eq!(toggled, json!({ "id": created["id"], "text": "Buy milk", "completed": true }));

    let (status, edited) = call(&app, "PUT", &path, Some(json!({ "text": "Buy bread" }))).await;
    assert_eq!(status, 200);
    assert_eq!(edited["text"], "Buy bread");
    assert_eq!(edited["completed"], true);

    let (_, list) = call(&app, "GET", "/tasks", None).await;
    assert_eq!(list, json!([{ "id": created["id"], "text": "Buy bread", "completed": true }]));
}

#[tokio::test]
async fn acceptance_update_of_missing_id_still_succeeds() {
    let app = app().await;
    let (status, body) = call(&app, "PUT", "/tasks/999", Some(json!({ "completed": true }))).await;
    assert_eq!(status, 200);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn acceptance_delete_existing_and_missing() {
    let app = app().await;
    let (_, created) = call(&app, "POST", "/tasks", Some(json!({ "text": "Buy milk", "completed": false }))).await;
    let path = format!("/tasks/{}", created["id"]);

    let (status, body) = call(&app, "DELETE", &path, None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Task deleted successfully" }));

    let (_, list) = call(&app, "GET", "/tasks", None).await;
    assert_eq!(list, json!([]));

    let (status, body) = call(&app, "DELETE", &path, None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Task deleted successfully" }));
}

#[tokio::test]
async fn acceptance_concurrent_creates_get_distinct_ids() {
    let app = app().await;
    let (a, b) = tokio::join!(
        call(&app, "POST", "/tasks", Some(json!({ "text": "a", "completed": false }))),
        call(&app, "POST", "/tasks", Some(json!({ "text": "b", "completed": false }))),
    );
    assert_eq!(a.0, 201);
    assert_eq!(b.0, 201);
    assert_ne!(a.1["id"], b.1["id"]);

    let (_, list) = call(&app, "GET", "/tasks", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn acceptance_non_integer_id_is_a_client_error() {
    let app = app().await;
    let (status, _) = call(&app, "DELETE", "/tasks/abc", None).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn acceptance_storage_failure_is_a_500_with_message() {
    // no init(): every statement fails with "no such table"
    let repo = SqliteTaskRepository::connect("sqlite::memory:").await.unwrap();
    let app = routing::app(task_routes::router(task_routes::AppState { service: TaskServiceImpl::new(repo) }));

    for (method, path, body) in [
        ("GET", "/tasks", None),
        ("POST", "/tasks", Some(json!({ "text": "Buy milk", "completed": false }))),
        ("PUT", "/tasks/1", Some(json!({ "completed": true }))),
        ("DELETE", "/tasks/1", None),
    ] {
        let res = request(&app, method, path, body).await;
        assert_eq!(res.status(), 500, "{method} {path}");
        let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
        let err: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert!(err.message.contains("no such table"), "{method} {path}: {}", err.message);
    }
}

#[tokio::test]
async fn acceptance_health() {
    let app = app().await;
    let res = request(&app, "GET", "/health", None).await;
    assert_eq!(res.status(), 200);
}

async fn call(app: &Router, method: &str, path: &str, body: Option<Value>) -> (axum::http::StatusCode, Value) {
    let res = request(app, method, path, body).await;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

async fn request(app: &Router, method: &str, path: &str, body: Option<Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Request, Method};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}
