//! HTTP-level tests for the system log.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, user_with_token};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_entries_record_caller_and_ip(pool: PgPool) {
    let (user, token) = user_with_token(&pool, "reporter@example.com", "citizen").await;

    let app = common::build_test_app(pool.clone());
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/logs")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.2")
        .body(axum::body::Body::from(
            json!({
                "level": "ERROR",
                "message": "Map failed to load",
                "context": { "page": "/schedule" }
            })
            .to_string(),
        ))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["level"], "error");
    assert_eq!(json["data"]["user_id"], user.id);
    assert_eq!(json["data"]["ip_address"], "203.0.113.7");
    assert_eq!(json["data"]["context"]["page"], "/schedule");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn writing_requires_auth_and_valid_entry(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "reporter@example.com", "citizen").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/logs",
        json!({ "level": "info", "message": "hello" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/logs",
        json!({ "level": "verbose", "message": "hello" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/logs",
        json!({ "level": "info", "message": "   " }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/logs",
        json!({ "level": "info", "message": "hello", "context": [1, 2] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_queries_with_filters(pool: PgPool) {
    let (_admin, admin_token) = user_with_token(&pool, "auditor@example.com", "admin").await;
    let (citizen, citizen_token) = user_with_token(&pool, "noisy@example.com", "citizen").await;

    for (level, message) in [("info", "Opened schedule"), ("warn", "Slow map tiles")] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/logs",
            json!({ "level": level, "message": message }),
            &citizen_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/logs?level=warn&user_id={}", citizen.id),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["data"]["total"], 1);
    assert_eq!(page["data"]["items"][0]["message"], "Slow map tiles");

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/logs?search=SCHEDULE",
        &admin_token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["total"], 1);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/logs?from=2026-10-02T00:00:00Z&to=2026-10-01T00:00:00Z",
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(common::build_test_app(pool), "/api/logs", &citizen_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
