//! Stripe webhook verification.
//!
//! Stripe signs each delivery with a `Stripe-Signature` header of the form
//! `t=<unix seconds>,v1=<hex>[,v1=<hex>...]`, where each `v1` value is the
//! HMAC-SHA256 of `"{t}.{raw body}"` keyed with the endpoint secret.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age (or clock skew) of a signed delivery.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

pub const EVENT_PAYMENT_SUCCEEDED: &str = "payment_intent.succeeded";
pub const EVENT_PAYMENT_FAILED: &str = "payment_intent.payment_failed";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Malformed Stripe-Signature header")]
    Malformed,

    #[error("No v1 signature matches the payload")]
    Mismatch,

    #[error("Signature timestamp outside the {0}s tolerance")]
    Expired(i64),
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Check `header` against `payload` and `secret` at time `now` (unix seconds).
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => {
                if let Some(bytes) = hex::decode(value) {
                    candidates.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::Malformed)?;
    if candidates.is_empty() {
        return Err(SignatureError::Malformed);
    }

    // verify_slice compares in constant time.
    let matched = candidates
        .iter()
        .any(|sig| signed_mac(secret, timestamp, payload).verify_slice(sig).is_ok());
    if !matched {
        return Err(SignatureError::Mismatch);
    }

    if (now - timestamp).abs() > tolerance_secs {
        return Err(SignatureError::Expired(tolerance_secs));
    }
    Ok(())
}

/// Build a `Stripe-Signature` header value for `payload`.
pub fn sign(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mac = signed_mac(secret, timestamp, payload);
    format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
}

fn signed_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

impl WebhookEvent {
    pub fn parse(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// `data.object.id` for payment intent events.
    pub fn payment_intent_id(&self) -> Option<&str> {
        self.data.object.get("id").and_then(|v| v.as_str())
    }

    /// `data.object.metadata.pickup_id`, which Stripe stores as a string.
    pub fn pickup_id(&self) -> Option<i64> {
        self.data
            .object
            .get("metadata")
            .and_then(|m| m.get("pickup_id"))
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }
}

// ---------------------------------------------------------------------------
// hex helpers
// ---------------------------------------------------------------------------

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// `None` on odd length or a non-hex digit.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| s.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"id":"evt_1","type":"payment_intent.succeeded","data":{"object":{"id":"pi_1","metadata":{"pickup_id":"42"}}}}"#;

    #[test]
    fn signed_payload_verifies() {
        let header = sign(BODY, SECRET, 1_700_000_000);
        assert_eq!(
            verify_signature(BODY, &header, SECRET, 1_700_000_100, DEFAULT_TOLERANCE_SECS),
            Ok(())
        );
    }

    #[test]
    fn wrong_secret_or_body_mismatches() {
        let header = sign(BODY, SECRET, 1_700_000_000);
        assert_eq!(
            verify_signature(BODY, &header, "whsec_other", 1_700_000_000, 300),
            Err(SignatureError::Mismatch)
        );
        assert_eq!(
            verify_signature(b"{}", &header, SECRET, 1_700_000_000, 300),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn stale_timestamp_rejected() {
        let header = sign(BODY, SECRET, 1_700_000_000);
        assert_eq!(
            verify_signature(BODY, &header, SECRET, 1_700_000_301, 300),
            Err(SignatureError::Expired(300))
        );
    }

    #[test]
    fn any_matching_v1_is_accepted() {
        let good = sign(BODY, SECRET, 1_700_000_000);
        let good_sig = good.split_once(",v1=").unwrap().1;
        let header = format!("t=1700000000,v1={},v0=abc,v1={good_sig}", "00".repeat(32));
        assert_eq!(verify_signature(BODY, &header, SECRET, 1_700_000_000, 300), Ok(()));
    }

    #[test]
    fn malformed_headers() {
        for header in ["", "v1=abcd", "t=notanumber,v1=abcd", "t=1700000000", "t=1700000000,v1=zz"] {
            assert_eq!(
                verify_signature(BODY, header, SECRET, 1_700_000_000, 300),
                Err(SignatureError::Malformed),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn event_accessors() {
        let event = WebhookEvent::parse(BODY).unwrap();
        assert_eq!(event.event_type, EVENT_PAYMENT_SUCCEEDED);
        assert_eq!(event.payment_intent_id(), Some("pi_1"));
        assert_eq!(event.pickup_id(), Some(42));
    }

    #[test]
    fn event_without_metadata() {
        let event = WebhookEvent::parse(
            br#"{"id":"evt_2","type":"charge.refunded","data":{"object":{"id":"ch_1"}}}"#,
        )
        .unwrap();
        assert_eq!(event.pickup_id(), None);
    }

    #[test]
    fn hex_round_trip_and_rejects() {
        assert_eq!(hex::decode(&hex::encode([0u8, 171, 255])), Some(vec![0, 171, 255]));
        assert_eq!(hex::decode("abc"), None);
        assert_eq!(hex::decode("gg"), None);
    }
}
