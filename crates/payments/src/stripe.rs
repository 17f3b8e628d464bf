//! Stripe REST client.
//!
//! Only `POST /v1/payment_intents` is used. Requests are form encoded and
//! authenticated with the secret key as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::PaymentError;
use crate::gateway::{CreateIntentParams, PaymentGateway, PaymentIntent};

/// Default API origin.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// HTTP timeout for a single attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Pause before the single retry.
const RETRY_DELAY: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// StripeConfig
// ---------------------------------------------------------------------------

/// Stripe credentials.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// Overridable for tests and Stripe's local mock server.
    pub api_base: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `STRIPE_SECRET_KEY` is not set, in which case
    /// payment endpoints answer 503.
    ///
    /// | Variable            | Required | Default                  |
    /// |---------------------|----------|--------------------------|
    /// | `STRIPE_SECRET_KEY` | yes      |                          |
    /// | `STRIPE_API_BASE`   | no       | `https://api.stripe.com` |
    pub fn from_env() -> Option<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|k| !k.is_empty())?;
        Some(Self {
            secret_key,
            api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// StripeGateway
// ---------------------------------------------------------------------------

/// [`PaymentGateway`] backed by the Stripe API.
pub struct StripeGateway {
    client: reqwest::Client,
    config: StripeConfig,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl StripeGateway {
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.config.api_base.trim_end_matches('/'))
    }

    async fn try_create(
        &self,
        form: &[(String, String)],
        idempotency_key: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.config.secret_key)
            .header("Idempotency-Key", idempotency_key)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| PaymentError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    /// Create an intent, retrying once on a transport failure. The shared
    /// idempotency key makes the retry safe.
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> Result<PaymentIntent, PaymentError> {
        let form = intent_form(params);

        match self.try_create(&form, &params.idempotency_key).await {
            Err(PaymentError::Request(e)) => {
                tracing::warn!(error = %e, "Stripe request failed, retrying once");
                tokio::time::sleep(RETRY_DELAY).await;
                self.try_create(&form, &params.idempotency_key).await
            }
            other => other,
        }
    }
}

/// Form fields for `POST /v1/payment_intents`.
fn intent_form(params: &CreateIntentParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), params.amount_cents.to_string()),
        ("currency".to_string(), params.currency.clone()),
        (
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string(),
        ),
    ];
    if let Some(pickup_id) = params.pickup_id {
        form.push(("metadata[pickup_id]".to_string(), pickup_id.to_string()));
    }
    if let Some(description) = &params.description {
        form.push(("description".to_string(), description.clone()));
    }
    form
}

/// Best human-readable message from a Stripe error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<StripeErrorBody>(body) {
        Ok(parsed) => parsed
            .error
            .message
            .or(parsed.error.kind)
            .unwrap_or_else(|| "Unknown Stripe error".to_string()),
        Err(_) => body.chars().take(200).collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
