//! Handlers for card payments through the configured payment gateway.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use wastewise_core::error::CoreError;
use wastewise_core::logs::{LEVEL_INFO, LEVEL_WARN};
use wastewise_core::money::{normalize_currency, validate_charge_amount, DEFAULT_CURRENCY};
use wastewise_core::pickup::RequestStatus;
use wastewise_core::types::DbId;
use wastewise_core::validation::{optional_text, MAX_TEXT_LEN};
use wastewise_db::models::page::Page;
use wastewise_db::models::payment::{
    CreatePayment, Payment, PaymentQuery, STATUS_FAILED, STATUS_SUCCEEDED,
};
use wastewise_db::models::system_log::CreateSystemLog;
use wastewise_db::repositories::{PaymentRepo, PickupRepo};
use wastewise_payments::webhook::{
    verify_signature, DEFAULT_TOLERANCE_SECS, EVENT_PAYMENT_FAILED, EVENT_PAYMENT_SUCCEEDED,
};
use wastewise_payments::{CreateIntentParams, WebhookEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::system_log;

/// Header carrying the webhook signature.
const SIGNATURE_HEADER: &str = "stripe-signature";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    pub amount_cents: i64,
    pub currency: Option<String>,
    pub pickup_id: Option<DbId>,
    pub description: Option<String>,
}

/// What the browser needs to confirm the charge.
#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/create-payment-intent
///
/// Create a gateway payment intent and record it. 503 when no gateway is
/// configured.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    Json(input): Json<CreatePaymentIntentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PaymentIntentResponse>>)> {
    let gateway = state
        .payments
        .clone()
        .ok_or_else(|| AppError::ServiceUnavailable("Payments are not configured".into()))?;

    validate_charge_amount(input.amount_cents)?;
    let currency = normalize_currency(input.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))?;
    optional_text("description", input.description.as_deref(), MAX_TEXT_LEN)?;

    if let Some(pickup_id) = input.pickup_id {
        if PickupRepo::find_by_id(&state.pool, pickup_id).await?.is_none() {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Pickup",
                id: pickup_id,
            }));
        }
    }

    let params = CreateIntentParams {
        amount_cents: input.amount_cents,
        currency: currency.clone(),
        pickup_id: input.pickup_id,
        description: input.description.clone(),
        idempotency_key: Uuid::new_v4().to_string(),
    };
    let intent = gateway.create_payment_intent(&params).await?;

    let user_id = caller.map(|u| u.user_id);
    let payment = PaymentRepo::create(
        &state.pool,
        &CreatePayment {
            payment_intent_id: intent.id.clone(),
            pickup_id: input.pickup_id,
            user_id,
            amount_cents: input.amount_cents,
            currency,
            status: intent.status.clone(),
            description: input.description,
        },
    )
    .await?;

    tracing::info!(
        payment_id = payment.id,
        payment_intent_id = %intent.id,
        pickup_id = ?payment.pickup_id,
        amount_cents = payment.amount_cents,
        "Payment intent created"
    );
    system_log::record(
        &state.pool,
        CreateSystemLog::new(LEVEL_INFO, "Payment intent created")
            .with_user(user_id)
            .with_context(json!({
                "payment_intent_id": intent.id,
                "pickup_id": payment.pickup_id,
                "amount_cents": payment.amount_cents,
                "currency": payment.currency,
            })),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PaymentIntentResponse {
                client_secret: intent.client_secret,
                payment_intent_id: intent.id,
            },
        }),
    ))
}

/// POST /api/payments/webhook
///
/// Signed gateway callback. Unknown event types are acknowledged so the
/// gateway stops retrying them.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<serde_json::Value>> {
    let secret = state
        .config
        .stripe_webhook_secret
        .as_deref()
        .ok_or_else(|| AppError::ServiceUnavailable("Payment webhooks are not configured".into()))?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing Stripe-Signature header".into()))?;

    verify_signature(
        &body,
        signature,
        secret,
        Utc::now().timestamp(),
        DEFAULT_TOLERANCE_SECS,
    )
    .map_err(|e| {
        tracing::warn!(error = %e, "Rejected webhook with invalid signature");
        AppError::BadRequest(format!("Invalid webhook signature: {e}"))
    })?;

    let event = WebhookEvent::parse(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    match event.event_type.as_str() {
        EVENT_PAYMENT_SUCCEEDED => handle_succeeded(&state, &event).await?,
        EVENT_PAYMENT_FAILED => handle_failed(&state, &event).await?,
        other => {
            tracing::debug!(event_id = %event.id, event_type = other, "Ignoring webhook event")
        }
    }

    Ok(Json(json!({ "received": true })))
}

/// GET /api/payments?pickup_id=&status=&limit=&offset=
pub async fn list_payments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaymentQuery>,
) -> AppResult<Json<DataResponse<Page<Payment>>>> {
    let page = PaymentRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// Webhook event handling
// ---------------------------------------------------------------------------

async fn handle_succeeded(state: &AppState, event: &WebhookEvent) -> AppResult<()> {
    let intent_id = event
        .payment_intent_id()
        .ok_or_else(|| AppError::BadRequest("Event has no payment intent id".into()))?;

    let payment = PaymentRepo::update_status(&state.pool, intent_id, STATUS_SUCCEEDED).await?;
    if payment.is_none() {
        tracing::warn!(payment_intent_id = intent_id, "Succeeded event for unknown payment intent");
    }

    let pickup_id = payment
        .as_ref()
        .and_then(|p| p.pickup_id)
        .or_else(|| event.pickup_id());

    if let Some(pickup_id) = pickup_id {
        let scheduled = PickupRepo::transition_if(
            &state.pool,
            pickup_id,
            RequestStatus::Pending.as_str(),
            RequestStatus::Scheduled.as_str(),
        )
        .await?;
        if scheduled {
            tracing::info!(pickup_id, payment_intent_id = intent_id, "Paid pickup scheduled");
        }
    }

    tracing::info!(payment_intent_id = intent_id, "Payment succeeded");
    system_log::record(
        &state.pool,
        CreateSystemLog::new(LEVEL_INFO, "Payment succeeded")
            .with_user(payment.as_ref().and_then(|p| p.user_id))
            .with_context(json!({ "payment_intent_id": intent_id, "pickup_id": pickup_id })),
    )
    .await;
    Ok(())
}

async fn handle_failed(state: &AppState, event: &WebhookEvent) -> AppResult<()> {
    let intent_id = event
        .payment_intent_id()
        .ok_or_else(|| AppError::BadRequest("Event has no payment intent id".into()))?;

    let payment = PaymentRepo::update_status(&state.pool, intent_id, STATUS_FAILED).await?;

    tracing::warn!(payment_intent_id = intent_id, "Payment failed");
    system_log::record(
        &state.pool,
        CreateSystemLog::new(LEVEL_WARN, "Payment failed")
            .with_user(payment.as_ref().and_then(|p| p.user_id))
            .with_context(json!({ "payment_intent_id": intent_id })),
    )
    .await;
    Ok(())
}
