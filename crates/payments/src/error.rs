/// Error type for payment gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The HTTP request failed (network, DNS, timeout, etc.).
    #[error("Payment gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway rejected the call.
    #[error("Payment gateway returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The gateway answered with a body we could not understand.
    #[error("Unexpected payment gateway response: {0}")]
    Decode(String),
}

impl PaymentError {
    /// Whether the caller sent something the gateway refused (4xx), as
    /// opposed to the gateway or network being unhealthy.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = PaymentError::Api {
            status: 402,
            message: "Your card was declined.".into(),
        };
        assert_eq!(
            err.to_string(),
            "Payment gateway returned HTTP 402: Your card was declined."
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn server_errors_are_not_client_errors() {
        let err = PaymentError::Api {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(!err.is_client_error());
        assert!(!PaymentError::Decode("x".into()).is_client_error());
    }
}
