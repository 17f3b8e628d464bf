//! Outbound email for the WasteWise backend.
//!
//! - [`EmailConfig`] -- SMTP settings loaded from the environment.
//! - [`EmailDelivery`] -- async SMTP sender built on `lettre`.
//! - [`templates`] -- plain-text bodies for password reset and subscription mail.

pub mod delivery;
pub mod templates;

pub use delivery::{EmailConfig, EmailDelivery, EmailError};
pub use templates::EmailMessage;
