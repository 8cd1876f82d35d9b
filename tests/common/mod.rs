#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use customer_api::{
    build_router, connect_in_memory, ensure_customers_table, AppState, Customer, Settings,
    SqliteCustomerContext,
};
use serde_json::Value;
use tower::ServiceExt;

pub fn customer(first_name: &str, email: &str) -> Customer {
    Customer {
        id: 0,
        prefix: None,
        suffix: None,
        first_name: first_name.to_string(),
        middle_name: None,
        last_name: "Doe".to_string(),
        email: email.to_string(),
        phone_number: "1234567890".to_string(),
    }
}

pub async fn test_context() -> SqliteCustomerContext {
    let pool = connect_in_memory().await.unwrap();
    ensure_customers_table(&pool).await.unwrap();
    SqliteCustomerContext::new(pool)
}

pub async fn test_app() -> Router {
    let pool = connect_in_memory().await.unwrap();
    ensure_customers_table(&pool).await.unwrap();
    build_router(AppState::new(pool, Settings::default()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}
