mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use common::{send, send_request, test_app};
use customer_api::{
    build_router, connect_in_memory, with_middleware, AppError, AppState, Customer, CustomerContext,
    Settings,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn john() -> Value {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@example.com",
        "phoneNumber": "1234567890"
    })
}

fn jane() -> Value {
    json!({
        "prefix": "Ms",
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane.doe@example.com",
        "phoneNumber": "5555555555"
    })
}

fn errors(body: &Value) -> Vec<String> {
    assert_eq!(body["succeeded"], json!(false));
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn list_on_empty_table_returns_empty_array() {
    let app = test_app().await;
    let res = send(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn create_returns_created_with_location() {
    let app = test_app().await;
    let res = send(&app, Method::POST, "/api/customers", Some(john())).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.headers[header::LOCATION], "/api/customers/1");
    assert_eq!(res.body["id"], 1);
    assert_eq!(res.body["firstName"], "John");

    let fetched = send(&app, Method::GET, "/api/customers/1", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, res.body);
}

#[tokio::test]
async fn create_with_invalid_email_is_bad_request() {
    let app = test_app().await;
    let mut body = john();
    body["email"] = json!("test@exam@ple.com");
    let res = send(&app, Method::POST, "/api/customers", Some(body)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let errors = errors(&res.body);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("email"));

    let list = send(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn create_with_missing_fields_lists_each_error() {
    let app = test_app().await;
    let res = send(&app, Method::POST, "/api/customers", Some(json!({ "firstName": "John" }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let errors = errors(&res.body);
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().any(|e| e.contains("lastName")));
    assert!(errors.iter().any(|e| e.contains("email")));
    assert!(errors.iter().any(|e| e.contains("phoneNumber")));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"firstName\": "))
        .unwrap();
    let res = send_request(&app, request).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(errors(&res.body).len(), 1);
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/customers")
        .body(Body::from(john().to_string()))
        .unwrap();
    let res = send_request(&app, request).await;
    assert_eq!(res.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(res.body["succeeded"], json!(false));
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let app = test_app().await;
    let res = send(&app, Method::GET, "/api/customers/41", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"]["code"], "not_found");
}

#[tokio::test]
async fn get_non_numeric_id_is_bad_request() {
    let app = test_app().await;
    let res = send(&app, Method::GET, "/api/customers/abc", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn get_by_email() {
    let app = test_app().await;
    send(&app, Method::POST, "/api/customers", Some(john())).await;

    let res = send(&app, Method::GET, "/api/customers/email/john.doe@example.com", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["firstName"], "John");

    let missing = send(&app, Method::GET, "/api/customers/email/nobody@example.com", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn batch_create_returns_created_list() {
    let app = test_app().await;
    let res = send(&app, Method::POST, "/api/customers/batch", Some(json!([john(), jane()]))).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let created: Vec<Customer> = serde_json::from_value(res.body).unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].id, 1);
    assert_eq!(created[1].id, 2);

    let list = send(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(list.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn batch_create_with_invalid_item_persists_nothing() {
    let app = test_app().await;
    let mut bad = jane();
    bad["lastName"] = json!("x".repeat(51));
    let res = send(&app, Method::POST, "/api/customers/batch", Some(json!([john(), bad]))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let errors = errors(&res.body);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("[1].lastName"));

    let list = send(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn put_with_mismatched_id_is_bad_request_even_if_payload_invalid() {
    let app = test_app().await;
    let mut body = john();
    body["id"] = json!(1);
    body["email"] = json!("test@exam@ple.com");
    let res = send(&app, Method::PUT, "/api/customers/2", Some(body)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(errors(&res.body), vec!["Id mismatch"]);
}

#[tokio::test]
async fn put_with_invalid_payload_is_bad_request() {
    let app = test_app().await;
    send(&app, Method::POST, "/api/customers", Some(john())).await;
    let mut body = john();
    body["id"] = json!(1);
    body["phoneNumber"] = json!("not a phone");
    let res = send(&app, Method::PUT, "/api/customers/1", Some(body)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(errors(&res.body)[0].contains("phoneNumber"));
}

#[tokio::test]
async fn put_updates_record() {
    let app = test_app().await;
    send(&app, Method::POST, "/api/customers", Some(john())).await;
    let mut body = john();
    body["id"] = json!(1);
    body["suffix"] = json!("Jr");
    body["firstName"] = json!("Johnny");

    let res = send(&app, Method::PUT, "/api/customers/1", Some(body)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(res.body, Value::Null);

    let fetched = send(&app, Method::GET, "/api/customers/1", None).await;
    assert_eq!(fetched.body["firstName"], "Johnny");
    assert_eq!(fetched.body["suffix"], "Jr");
}

#[tokio::test]
async fn put_unknown_id_is_not_found() {
    let app = test_app().await;
    let mut body = john();
    body["id"] = json!(9);
    let res = send(&app, Method::PUT, "/api/customers/9", Some(body)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_record() {
    let app = test_app().await;
    send(&app, Method::POST, "/api/customers", Some(john())).await;

    let res = send(&app, Method::DELETE, "/api/customers/1", None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let fetched = send(&app, Method::GET, "/api/customers/1", None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let app = test_app().await;
    let res = send(&app, Method::DELETE, "/api/customers/5", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

struct UnavailableContext;

#[async_trait]
impl CustomerContext for UnavailableContext {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Customer>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<Customer>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _customer: Customer) -> Result<Customer, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn insert_batch(&self, _customers: Vec<Customer>) -> Result<Vec<Customer>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _customer: &Customer) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn delete_entity(&self, _customer: &Customer) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

async fn unavailable_app(expose_error_details: bool) -> Router {
    let pool = connect_in_memory().await.unwrap();
    let settings = Settings {
        expose_error_details,
        ..Settings::default()
    };
    build_router(AppState::with_context(pool, Arc::new(UnavailableContext), settings))
}

#[tokio::test]
async fn store_failure_is_internal_server_error_with_details() {
    let app = unavailable_app(true).await;
    let res = send(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "Internal Server Error");
    assert!(res.body["details"].as_str().unwrap().starts_with("database:"));
}

#[tokio::test]
async fn store_failure_hides_details_when_disabled() {
    let app = unavailable_app(false).await;
    let res = send(&app, Method::POST, "/api/customers", Some(john())).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, json!({ "error": "Internal Server Error" }));
}

async fn boom() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
async fn handler_panic_is_internal_server_error() {
    let router = Router::new().route("/boom", get(boom));
    let app = with_middleware(router, Arc::new(Settings::default()));
    let res = send(&app, Method::GET, "/boom", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "Internal Server Error");
    assert_eq!(res.body["details"], "panic: handler exploded");
}

#[tokio::test]
async fn operational_routes() {
    let app = test_app().await;
    let health = send(&app, Method::GET, "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    assert_eq!(health.body["version"], env!("CARGO_PKG_VERSION"));

    let ready = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["database"], "ok");
    assert_eq!(ready.body["customers"], 0);

    let created = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "john.doe@example.com",
            "phoneNumber": "1234567890"
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let ready = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(ready.body["customers"], 1);

    let version = send(&app, Method::GET, "/version", None).await;
    assert_eq!(version.status, StatusCode::OK);
    assert_eq!(version.body, json!({ "name": "customer-api", "version": env!("CARGO_PKG_VERSION") }));
}

#[tokio::test]
async fn ready_is_unavailable_without_customers_table() {
    let pool = connect_in_memory().await.unwrap();
    let app = build_router(AppState::new(pool, Settings::default()));

    let ready = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready.body["status"], "degraded");
    assert_eq!(ready.body["database"], "unavailable");
    assert!(ready.body.get("customers").is_none());
}
