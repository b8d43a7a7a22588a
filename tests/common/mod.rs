#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shule::router::init_router;
use shule::shule_auth::create_access_token;
use shule::shule_config::{
    AdmissionConfig, CorsConfig, JwtConfig, PaymentChannel, RateLimitConfig,
};
use shule::shule_core::{AuthContext, Role};
use shule::shule_models::{CreateStaffDto, StaffRole};
use shule::state::AppState;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const TEST_PARENT_PIN: &str = "2525";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// Limits high enough that no ordinary test trips them.
pub fn relaxed_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        general_per_second: 1000,
        general_burst_size: 1000,
        auth_per_second: 1000,
        auth_burst_size: 1000,
        trust_forwarded_for: false,
    }
}

pub fn admission_config() -> AdmissionConfig {
    AdmissionConfig {
        school_name: "Test School".to_string(),
        default_parent_password: TEST_PARENT_PIN.to_string(),
        payment_channels: vec![PaymentChannel {
            name: "NMB".to_string(),
            account_number: "0123456789".to_string(),
            account_name: "Test School".to_string(),
        }],
    }
}

pub fn test_state(pool: SqlitePool, rate_limit_config: RateLimitConfig) -> AppState {
    AppState::new(
        pool,
        jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        rate_limit_config,
        admission_config(),
    )
    .unwrap()
}

pub fn setup_test_app(pool: SqlitePool) -> Router {
    init_router(test_state(pool, relaxed_rate_limit_config()))
}

pub fn setup_test_app_with_rate_limit(
    pool: SqlitePool,
    rate_limit_config: RateLimitConfig,
) -> Router {
    init_router(test_state(pool, rate_limit_config))
}

pub async fn create_staff(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    role: StaffRole,
) -> i64 {
    let dto = CreateStaffDto {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password: password.to_string(),
        role,
    };
    shule_cli::seeder::create_staff(pool, &dto).await.unwrap()
}

/// Signed token for a role without going through login.
pub fn token_for(role: Role, subject: &str) -> String {
    create_access_token(subject, role, &jwt_config()).unwrap()
}

pub fn secretary_token() -> String {
    token_for(Role::Secretary, "secretary")
}

pub fn headmaster_token() -> String {
    token_for(Role::Headmaster, "headmaster")
}

pub fn secretary_ctx() -> AuthContext {
    AuthContext::new(Role::Secretary, "secretary")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends the request and returns the status and JSON body (`Null` when empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn application_body(student_name: &str) -> Value {
    json!({
        "student_name": student_name,
        "birth_date": "2016-04-12",
        "address": "Mji Mkongwe, Zanzibar",
        "parent_name": "Asha Juma",
        "parent_phone": "0712345678",
        "parent_email": "asha@example.com"
    })
}

/// Submits an application over HTTP and returns its id.
pub async fn submit_application(app: &Router, level: &str, student_name: &str) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            &format!("/api/applications/{level}"),
            None,
            Some(application_body(student_name)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {body}");
    body["id"].as_i64().unwrap()
}

/// Submits and approves, returning the student JSON.
pub async fn register_student(app: &Router, level: &str, student_name: &str) -> Value {
    let id = submit_application(app, level, student_name).await;
    let (status, body) = send(
        app,
        json_request(
            "POST",
            &format!("/api/secretary/applications/{id}/approve"),
            Some(&secretary_token()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "approve failed: {body}");
    body
}
