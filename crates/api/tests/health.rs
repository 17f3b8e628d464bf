//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    // The test app has no SMTP and no gateway.
    assert_eq!(json["mail_enabled"], false);
    assert_eq!(json["payments_enabled"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_payments_with_gateway(pool: PgPool) {
    let gateway = std::sync::Arc::new(common::FakeGateway::default());
    let app = common::build_test_app_with_gateway(pool, gateway);
    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["payments_enabled"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert!(
        response.headers().contains_key("x-request-id"),
        "every response should carry a request id"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn errors_use_error_and_code_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/pickups/mine").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].is_string());
}
