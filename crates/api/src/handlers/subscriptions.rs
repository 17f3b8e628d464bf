//! Handlers for service-plan subscriptions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use wastewise_core::error::CoreError;
use wastewise_core::subscription::validate_plan;
use wastewise_core::types::DbId;
use wastewise_core::validation::normalize_email;
use wastewise_db::models::page::Page;
use wastewise_db::models::subscription::{CreateSubscription, Subscription, SubscriptionQuery};
use wastewise_db::repositories::SubscriptionRepo;
use wastewise_mail::templates;

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::notify;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /subscribe
///
/// Upsert by email: 201 for a new subscriber, 200 when an existing one is
/// reactivated or changes plan.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(mut input): Json<CreateSubscription>,
) -> AppResult<(StatusCode, Json<DataResponse<Subscription>>)> {
    validate_input(&input)?;
    input.plan = input.plan.trim().to_lowercase();
    validate_plan(&input.plan)?;
    input.email = normalize_email(&input.email);
    input.name = input
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let outcome = SubscriptionRepo::upsert(&state.pool, &input).await?;
    let created = outcome.is_created();
    let subscription = outcome.subscription().clone();

    tracing::info!(
        subscription_id = subscription.id,
        plan = %subscription.plan,
        created,
        "Subscription saved"
    );

    let message = templates::subscription_confirmation(
        subscription.name.as_deref(),
        &subscription.plan,
        created,
    );
    notify::send_in_background(&state, &subscription.email, message, "subscription");

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: subscription })))
}

/// GET /api/subscriptions?plan=&active=&limit=&offset=
pub async fn list_subscriptions(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<SubscriptionQuery>,
) -> AppResult<Json<DataResponse<Page<Subscription>>>> {
    if let Some(plan) = params.plan.as_deref() {
        validate_plan(plan)?;
    }
    let page = SubscriptionRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/subscriptions/{id}
///
/// Soft deactivation; the row is kept.
pub async fn unsubscribe(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SubscriptionRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id,
        }));
    }

    tracing::info!(subscription_id = id, user_id = admin.user_id, "Subscription deactivated");
    Ok(StatusCode::NO_CONTENT)
}
