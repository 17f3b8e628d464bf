//! HTTP error type shared by every handler.
//!
//! Every failure leaves the server as `{"error": <message>, "code": <CODE>}`
//! with a matching status. Internal details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use validator::Validate;
use wastewise_core::error::CoreError;
use wastewise_payments::PaymentError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Payments are not configured, or the provider cannot be reached.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
}

/// Status, machine-readable code and client-facing message.
type Classified = (StatusCode, &'static str, String);

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl AppError {
    fn classify(&self) -> Classified {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Core(CoreError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal()
            }
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();
        let body = ErrorBody {
            error: &message,
            code,
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Api { status, message } if (400..500).contains(&status) => {
                AppError::BadRequest(message)
            }
            PaymentError::Request(e) => {
                tracing::error!(error = %e, "Payment provider unreachable");
                AppError::ServiceUnavailable("Payment provider unreachable".into())
            }
            other => AppError::InternalError(other.to_string()),
        }
    }
}

/// Run `validator` derive rules and map failures to a 400.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

/// Whether `err` is a foreign-key violation (`23503`).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503"))
}

/// Client-facing message for a unique constraint we know about.
fn duplicate_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "An account with this email already exists".into(),
        "uq_waste_materials_name" => "A waste material with this name already exists".into(),
        "uq_salary_packages_name" => "A salary package with this name already exists".into(),
        "uq_payrolls_staff_period" => {
            "Payroll already generated for this staff member and period".into()
        }
        "uq_subscriptions_email" => "This email is already subscribed".into(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

/// Map a sqlx error onto a response.
///
/// `uq_*` unique violations are 409, `ck_*` check violations and foreign-key
/// violations are 400, a missing row is 404. Anything else is a logged 500.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            )
        }
        sqlx::Error::Database(db_err) => db_err,
        other => {
            tracing::error!(error = %other, "Database error");
            return internal();
        }
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => {
            (StatusCode::CONFLICT, "CONFLICT", duplicate_message(constraint))
        }
        Some("23514") if constraint.starts_with("ck_") => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates check constraint: {constraint}"),
        ),
        Some("23503") => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            format!("Referenced record is missing or still in use: {constraint}"),
        ),
        _ => {
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use wastewise_db::models::subscription::CreateSubscription;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn core_errors_map_to_statuses() {
        assert_eq!(
            status_of(AppError::Core(CoreError::NotFound { entity: "Pickup", id: 1 })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Validation("bad".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Conflict("dup".into()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Unauthorized("no".into()))),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Forbidden("no".into()))),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn http_variants_map_to_statuses() {
        assert_eq!(status_of(AppError::BadRequest("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::ServiceUnavailable("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(AppError::InternalError("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Database(sqlx::Error::RowNotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn known_constraints_get_friendly_messages() {
        assert_eq!(
            duplicate_message("uq_users_email"),
            "An account with this email already exists"
        );
        assert!(duplicate_message("uq_something_new").contains("uq_something_new"));
    }

    #[test]
    fn gateway_errors_are_classified() {
        let err: AppError = PaymentError::Api {
            status: 402,
            message: "Your card was declined.".into(),
        }
        .into();
        assert_matches!(err, AppError::BadRequest(ref m) if m.contains("declined"));

        let err: AppError = PaymentError::Api {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert_matches!(err, AppError::InternalError(_));

        let err: AppError = PaymentError::Decode("missing id".into()).into();
        assert_matches!(err, AppError::InternalError(ref m) if m.contains("missing id"));
    }

    #[test]
    fn failed_derive_rules_are_validation_errors() {
        let input = CreateSubscription {
            email: "not-an-email".into(),
            name: None,
            plan: "basic".into(),
        };
        assert_matches!(
            validate_input(&input),
            Err(AppError::Core(CoreError::Validation(ref m))) if m.contains("email")
        );
    }
}
