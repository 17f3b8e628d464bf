//! HTTP-level tests for payment intents and the signed webhook, using an
//! in-memory gateway in place of Stripe.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use common::{
    body_json, get_auth, pickup_body, post_json, post_raw, user_with_token, FakeGateway,
    WEBHOOK_SECRET,
};
use serde_json::json;
use sqlx::PgPool;
use wastewise_db::repositories::{PaymentRepo, PickupRepo};
use wastewise_payments::webhook::sign;

async fn create_pickup(pool: &PgPool) -> i64 {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/pickups",
        pickup_body("Paying Resident"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_intent(pool: &PgPool, gateway: &Arc<FakeGateway>, pickup_id: i64) -> String {
    let response = post_json(
        common::build_test_app_with_gateway(pool.clone(), gateway.clone()),
        "/api/create-payment-intent",
        json!({ "amount_cents": 1500, "pickup_id": pickup_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["payment_intent_id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn event(event_type: &str, intent_id: &str) -> String {
    json!({
        "id": "evt_test_1",
        "type": event_type,
        "data": { "object": { "id": intent_id, "object": "payment_intent" } }
    })
    .to_string()
}

async fn deliver(pool: &PgPool, payload: &str) -> StatusCode {
    let signature = sign(payload.as_bytes(), WEBHOOK_SECRET, Utc::now().timestamp());
    post_raw(
        common::build_test_app(pool.clone()),
        "/api/payments/webhook",
        payload,
        &[("stripe-signature", signature.as_str())],
    )
    .await
    .status()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_intent_records_payment(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    let pickup_id = create_pickup(&pool).await;

    let response = post_json(
        common::build_test_app_with_gateway(pool.clone(), gateway.clone()),
        "/api/create-payment-intent",
        json!({ "amount_cents": 2500, "currency": "USD", "pickup_id": pickup_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["payment_intent_id"], "pi_test_1");
    assert_eq!(json["data"]["client_secret"], "pi_test_1_secret_abc");

    let calls = gateway.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].currency, "usd");
    assert_eq!(calls[0].pickup_id, Some(pickup_id));
    assert!(!calls[0].idempotency_key.is_empty());

    let payment = PaymentRepo::find_by_intent_id(&pool, "pi_test_1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.amount_cents, 2500);
    assert_eq!(payment.pickup_id, Some(pickup_id));
    assert_eq!(payment.status, "requires_payment_method");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_intent_validates_input(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());

    let response = post_json(
        common::build_test_app_with_gateway(pool.clone(), gateway.clone()),
        "/api/create-payment-intent",
        json!({ "amount_cents": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app_with_gateway(pool.clone(), gateway.clone()),
        "/api/create-payment-intent",
        json!({ "amount_cents": 1000, "pickup_id": 424242 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    *gateway.fail_with.lock().unwrap() = Some((402, "Your card was declined.".to_string()));
    let response = post_json(
        common::build_test_app_with_gateway(pool, gateway.clone()),
        "/api/create-payment-intent",
        json!({ "amount_cents": 1000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(gateway.calls.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_intent_without_gateway_is_unavailable(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/create-payment-intent",
        json!({ "amount_cents": 1000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn succeeded_webhook_schedules_pending_pickup(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    let pickup_id = create_pickup(&pool).await;
    let intent_id = create_intent(&pool, &gateway, pickup_id).await;

    let status = deliver(&pool, &event("payment_intent.succeeded", &intent_id)).await;
    assert_eq!(status, StatusCode::OK);

    let payment = PaymentRepo::find_by_intent_id(&pool, &intent_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, "succeeded");
    let pickup = PickupRepo::find_by_id(&pool, pickup_id).await.unwrap().unwrap();
    assert_eq!(pickup.status, "Scheduled");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn succeeded_webhook_leaves_progressed_pickup_alone(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    let pickup_id = create_pickup(&pool).await;
    let intent_id = create_intent(&pool, &gateway, pickup_id).await;
    PickupRepo::update_status(&pool, pickup_id, "Completed")
        .await
        .unwrap();

    let status = deliver(&pool, &event("payment_intent.succeeded", &intent_id)).await;
    assert_eq!(status, StatusCode::OK);

    let pickup = PickupRepo::find_by_id(&pool, pickup_id).await.unwrap().unwrap();
    assert_eq!(pickup.status, "Completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_and_unknown_webhooks(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    let pickup_id = create_pickup(&pool).await;
    let intent_id = create_intent(&pool, &gateway, pickup_id).await;

    let status = deliver(&pool, &event("payment_intent.payment_failed", &intent_id)).await;
    assert_eq!(status, StatusCode::OK);
    let payment = PaymentRepo::find_by_intent_id(&pool, &intent_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, "failed");

    let status = deliver(&pool, &event("charge.refunded", &intent_id)).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_rejects_bad_signatures(pool: PgPool) {
    let payload = event("payment_intent.succeeded", "pi_anything");

    let forged = sign(payload.as_bytes(), "whsec_wrong", Utc::now().timestamp());
    let response = post_raw(
        common::build_test_app(pool.clone()),
        "/api/payments/webhook",
        &payload,
        &[("stripe-signature", forged.as_str())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stale = sign(payload.as_bytes(), WEBHOOK_SECRET, Utc::now().timestamp() - 3600);
    let response = post_raw(
        common::build_test_app(pool.clone()),
        "/api/payments/webhook",
        &payload,
        &[("stripe-signature", stale.as_str())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_raw(
        common::build_test_app(pool),
        "/api/payments/webhook",
        &payload,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn payments_list_is_admin_only(pool: PgPool) {
    let gateway = Arc::new(FakeGateway::default());
    let pickup_id = create_pickup(&pool).await;
    create_intent(&pool, &gateway, pickup_id).await;

    let (_admin, admin_token) = user_with_token(&pool, "cfo@example.com", "admin").await;
    let (_staff, staff_token) = user_with_token(&pool, "crew@example.com", "staff").await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/payments?pickup_id={pickup_id}"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["total"], 1);

    let response = get_auth(common::build_test_app(pool), "/api/payments", &staff_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
