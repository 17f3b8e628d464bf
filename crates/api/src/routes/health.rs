//! Liveness and dependency report.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// SMTP configured; reset links and confirmations are sent.
    pub mail_enabled: bool,
    /// Stripe key and webhook secret both configured.
    pub payments_enabled: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = wastewise_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        mail_enabled: state.mailer.is_some(),
        payments_enabled: state.payments.is_some() && state.config.stripe_webhook_secret.is_some(),
    })
}

/// `GET /health`, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
