//! Plain-text message bodies.

/// A rendered message ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
}

/// Password reset link mail.
pub fn password_reset(name: &str, reset_link: &str, expiry_mins: i64) -> EmailMessage {
    EmailMessage {
        subject: "[WasteWise] Reset your password".to_string(),
        body: format!(
            "Hello {name},\n\n\
             We received a request to reset your WasteWise password.\n\
             Open the link below to choose a new one:\n\n\
             {reset_link}\n\n\
             The link expires in {expiry_mins} minutes and can be used once.\n\
             If you did not ask for this, you can ignore this email.\n"
        ),
    }
}

/// Confirmation after subscribing or changing plan.
pub fn subscription_confirmation(name: Option<&str>, plan: &str, is_new: bool) -> EmailMessage {
    let greeting = name.map(|n| format!("Hello {n},")).unwrap_or_else(|| "Hello,".into());
    let line = if is_new {
        format!("Thank you for subscribing to the WasteWise {plan} plan.")
    } else {
        format!("Your WasteWise subscription is now on the {plan} plan.")
    };
    EmailMessage {
        subject: "[WasteWise] Subscription confirmed".to_string(),
        body: format!(
            "{greeting}\n\n{line}\n\
             We will keep you posted about collection schedules and recycling tips.\n"
        ),
    }
}
