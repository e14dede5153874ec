//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! All secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;

/// Default tolerance for webhook timestamps, in seconds
pub const DEFAULT_WEBHOOK_TOLERANCE_SECS: u64 = 300;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...)
    pub publishable_key: String,

    /// Webhook signing secret (whsec_...)
    pub webhook_secret: String,

    /// Maximum age of a signed webhook, 0 disables the check
    pub webhook_tolerance_secs: u64,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    /// - `STRIPE_WEBHOOK_SECRET`
    ///
    /// Optional:
    /// - `STRIPE_WEBHOOK_TOLERANCE_SECS` (default 300)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| PaymentError::Configuration(format!("{} not set", key)))
        };

        let secret_key = require("STRIPE_SECRET_KEY")?;
        let publishable_key = require("STRIPE_PUBLISHABLE_KEY")?;
        let webhook_secret = require("STRIPE_WEBHOOK_SECRET")?;

        // Validate key formats
        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(PaymentError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !publishable_key.starts_with("pk_test_") && !publishable_key.starts_with("pk_live_") {
            return Err(PaymentError::Configuration(
                "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
            ));
        }

        if !webhook_secret.starts_with("whsec_") {
            return Err(PaymentError::Configuration(
                "STRIPE_WEBHOOK_SECRET must start with whsec_".to_string(),
            ));
        }

        let webhook_tolerance_secs = match lookup("STRIPE_WEBHOOK_TOLERANCE_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                PaymentError::Configuration(format!(
                    "STRIPE_WEBHOOK_TOLERANCE_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_WEBHOOK_TOLERANCE_SECS,
        };

        Ok(Self {
            webhook_tolerance_secs,
            ..Self::new(secret_key, publishable_key, webhook_secret)
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        secret_key: impl Into<String>,
        publishable_key: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: publishable_key.into(),
            webhook_secret: webhook_secret.into(),
            webhook_tolerance_secs: DEFAULT_WEBHOOK_TOLERANCE_SECS,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set webhook timestamp tolerance
    pub fn with_webhook_tolerance(mut self, secs: u64) -> Self {
        self.webhook_tolerance_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const VALID: &[(&str, &str)] = &[
        ("STRIPE_SECRET_KEY", "sk_test_abc123"),
        ("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz789"),
        ("STRIPE_WEBHOOK_SECRET", "whsec_secret"),
    ];

    #[test]
    fn test_config_validation() {
        // Valid test keys
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789", "whsec_secret");
        assert!(!config.is_live_mode());

        // Valid live keys
        let config = StripeConfig::new("sk_live_abc123", "pk_live_xyz789", "whsec_secret");
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789", "whsec_secret");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_from_vars() {
        let config = StripeConfig::from_vars(vars(VALID)).unwrap();

        assert_eq!(config.publishable_key, "pk_test_xyz789");
        assert_eq!(config.webhook_tolerance_secs, DEFAULT_WEBHOOK_TOLERANCE_SECS);
        assert_eq!(config.api_base_url, "https://api.stripe.com");
    }

    #[test]
    fn test_from_vars_missing_key() {
        let result = StripeConfig::from_vars(vars(&VALID[1..]));

        match result {
            Err(PaymentError::Configuration(msg)) => assert!(msg.contains("STRIPE_SECRET_KEY")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_vars_rejects_bad_prefixes() {
        let mut pairs = VALID.to_vec();
        pairs[2] = ("STRIPE_WEBHOOK_SECRET", "secret");
        assert!(StripeConfig::from_vars(vars(&pairs)).is_err());

        let mut pairs = VALID.to_vec();
        pairs[1] = ("STRIPE_PUBLISHABLE_KEY", "sk_test_oops");
        assert!(StripeConfig::from_vars(vars(&pairs)).is_err());
    }

    #[test]
    fn test_from_vars_tolerance() {
        let mut pairs = VALID.to_vec();
        pairs.push(("STRIPE_WEBHOOK_TOLERANCE_SECS", "60"));
        let config = StripeConfig::from_vars(vars(&pairs)).unwrap();
        assert_eq!(config.webhook_tolerance_secs, 60);

        let mut pairs = VALID.to_vec();
        pairs.push(("STRIPE_WEBHOOK_TOLERANCE_SECS", "five minutes"));
        assert!(StripeConfig::from_vars(vars(&pairs)).is_err());
    }

    #[test]
    fn test_with_api_base_url() {
        let config = StripeConfig::new("sk_test_abc", "pk_test_xyz", "whsec_123")
            .with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
    }
}
