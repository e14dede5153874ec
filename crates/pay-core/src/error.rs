//! # Payment Error Types
//!
//! Typed error handling for the checkout server.
//! All gateway operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Webhook signature verification failed
    #[error("Webhook verification failed: {0}")]
    WebhookVerificationFailed(String),

    /// Webhook payload parsing error
    #[error("Webhook parse error: {0}")]
    WebhookParseError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_error_messages() {
        let err = PaymentError::WebhookVerificationFailed("Timestamp outside the tolerance zone".into());
        assert_eq!(
            err.to_string(),
            "Webhook verification failed: Timestamp outside the tolerance zone"
        );

        let err = PaymentError::WebhookParseError("expected value".into());
        assert_eq!(err.to_string(), "Webhook parse error: expected value");
    }

    #[test]
    fn test_provider_error_message() {
        let err = PaymentError::ProviderError {
            provider: "stripe".into(),
            message: "Invalid API Key provided".into(),
        };
        assert_eq!(err.to_string(), "Provider error [stripe]: Invalid API Key provided");
    }
}
