use std::sync::Arc;

use wastewise_mail::EmailDelivery;
use wastewise_payments::PaymentGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: wastewise_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// `None` when SMTP is not configured; mail is then skipped with a warning.
    pub mailer: Option<Arc<EmailDelivery>>,
    /// `None` when Stripe is not configured; payment endpoints answer 503.
    pub payments: Option<Arc<dyn PaymentGateway>>,
}
