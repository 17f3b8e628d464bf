//! Card payments through Stripe.
//!
//! - [`gateway`] -- the [`PaymentGateway`] trait handlers depend on.
//! - [`stripe`] -- the HTTPS implementation against the Stripe REST API.
//! - [`webhook`] -- `Stripe-Signature` verification and event parsing.

pub mod error;
pub mod gateway;
pub mod stripe;
pub mod webhook;

pub use error::PaymentError;
pub use gateway::{CreateIntentParams, PaymentGateway, PaymentIntent};
pub use stripe::{StripeConfig, StripeGateway};
pub use webhook::{SignatureError, WebhookEvent};
