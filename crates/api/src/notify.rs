//! Fire-and-forget email delivery for handlers.

use wastewise_mail::EmailMessage;

use crate::state::AppState;

/// Send `message` to `to` on a background task.
///
/// Does nothing (besides a warning) when SMTP is not configured. Delivery
/// errors are logged and never reach the caller.
pub fn send_in_background(state: &AppState, to: &str, message: EmailMessage, kind: &'static str) {
    let Some(mailer) = state.mailer.clone() else {
        tracing::warn!(kind, "SMTP not configured, email not sent");
        return;
    };
    let to = to.to_string();
    tokio::spawn(async move {
        match mailer.send(&to, &message).await {
            Ok(()) => tracing::debug!(kind, "Email sent"),
            Err(e) => tracing::error!(kind, error = %e, "Failed to send email"),
        }
    });
}
