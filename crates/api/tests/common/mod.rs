//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use wastewise_api::auth::jwt::{generate_access_token, JwtConfig};
use wastewise_api::auth::password::hash_password;
use wastewise_api::config::ServerConfig;
use wastewise_api::router::build_app_router;
use wastewise_api::state::AppState;
use wastewise_db::models::user::{CreateUser, User};
use wastewise_db::repositories::UserRepo;
use wastewise_payments::{CreateIntentParams, PaymentError, PaymentGateway, PaymentIntent};

pub const ADMIN_ROLE_ID: i64 = 1;
pub const STAFF_ROLE_ID: i64 = 2;
pub const CITIZEN_ROLE_ID: i64 = 3;

pub const TEST_PASSWORD: &str = "correct-horse-9";
pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        frontend_url: "http://localhost:3000".to_string(),
        password_min_length: 8,
        reset_token_expiry_mins: 30,
        stripe_webhook_secret: Some(WEBHOOK_SECRET.to_string()),
        jwt: JwtConfig {
            secret: "test-secret-key-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// The production router without mail or payments configured.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, None)
}

/// The production router with `gateway` standing in for Stripe.
pub fn build_test_app_with_gateway(pool: PgPool, gateway: Arc<FakeGateway>) -> Router {
    build_app(pool, Some(gateway))
}

fn build_app(pool: PgPool, gateway: Option<Arc<FakeGateway>>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: None,
        payments: gateway.map(|g| g as Arc<dyn PaymentGateway>),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user whose password is [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, role_id: i64) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: None,
            password_hash,
            role_id,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// A signed access token for `user_id` without going through login.
pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

/// Create a user with the given role and return it with a bearer token.
pub async fn user_with_token(pool: &PgPool, email: &str, role: &str) -> (User, String) {
    let role_id = match role {
        "admin" => ADMIN_ROLE_ID,
        "staff" => STAFF_ROLE_ID,
        _ => CITIZEN_ROLE_ID,
    };
    let user = create_user(pool, email, role_id).await;
    let token = token_for(user.id, role);
    (user, token)
}

/// A valid pickup request body for a date safely in the future.
pub fn pickup_body(name: &str) -> serde_json::Value {
    let date = (chrono::Utc::now().date_naive() + chrono::Duration::days(7)).to_string();
    serde_json::json!({
        "full_name": name,
        "email": "Resident@Example.com",
        "phone": "+15551234567",
        "waste_types": ["plastic", "paper"],
        "address": "12 Green Street",
        "preferred_date": date,
        "service_type": "standard",
        "latitude": 6.9271,
        "longitude": 79.8612,
        "amount_cents": 1500
    })
}

// ---------------------------------------------------------------------------
// Fake payment gateway
// ---------------------------------------------------------------------------

/// Records every create call and answers with a deterministic intent.
#[derive(Default)]
pub struct FakeGateway {
    pub calls: Mutex<Vec<CreateIntentParams>>,
    pub fail_with: Mutex<Option<(u16, String)>>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> Result<PaymentIntent, PaymentError> {
        if let Some((status, message)) = self.fail_with.lock().unwrap().clone() {
            return Err(PaymentError::Api { status, message });
        }
        let mut calls = self.calls.lock().unwrap();
        calls.push(params.clone());
        let id = format!("pi_test_{}", calls.len());
        Ok(PaymentIntent {
            client_secret: format!("{id}_secret_abc"),
            id,
            status: "requires_payment_method".to_string(),
            amount: params.amount_cents,
            currency: params.currency.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// POST a raw body with extra headers (webhook deliveries).
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: &str,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
