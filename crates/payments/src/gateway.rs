//! Gateway abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PaymentError;

/// Input for creating a payment intent.
#[derive(Debug, Clone)]
pub struct CreateIntentParams {
    /// Amount in minor units.
    pub amount_cents: i64,
    /// Lowercase ISO 4217 code.
    pub currency: String,
    pub pickup_id: Option<i64>,
    pub description: Option<String>,
    /// Sent as `Idempotency-Key` so a retried create never double-charges.
    pub idempotency_key: String,
}

/// The subset of a Stripe payment intent the backend uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
}

/// Creates payment intents. Implemented by [`crate::StripeGateway`] and by
/// in-memory fakes in tests.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> Result<PaymentIntent, PaymentError>;
}
