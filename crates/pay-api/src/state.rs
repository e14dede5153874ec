//! # Application State
//!
//! Shared state for the Axum application.
//! Built once at startup and read-only afterwards.

use anyhow::Context;
use pay_core::{BoxedPaymentGateway, CheckoutRequest, CheckoutUrls};
use pay_stripe::{LoggingWebhookHandler, StripeGateway, WebhookHandler};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;

/// Price sold by the checkout button unless `STRIPE_PRICE_ID` overrides it
pub const DEFAULT_PRICE_ID: &str = "price_1P3k0pBqHvCog8CcMCQc1Xhu";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for the success/cancel redirects
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Stripe price charged at checkout
    pub price_id: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str, default: String| lookup(key).unwrap_or(default);

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => defaults.port,
        };

        Ok(Self {
            host: var("HOST", defaults.host),
            port,
            base_url: var("BASE_URL", defaults.base_url),
            environment: var("ENVIRONMENT", defaults.environment),
            price_id: var("STRIPE_PRICE_ID", defaults.price_id),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// The fixed checkout every `/checkout` call opens
    pub fn checkout_request(&self) -> CheckoutRequest {
        let urls = CheckoutUrls::new(&self.base_url);
        CheckoutRequest::single_payment(&self.price_id, urls.success_url(), urls.cancel_url())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            environment: "development".to_string(),
            price_id: DEFAULT_PRICE_ID.to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway
    pub gateway: BoxedPaymentGateway,
    /// Reacts to verified webhook events
    pub webhook_handler: Arc<dyn WebhookHandler>,
    /// Checkout opened by every `/checkout` call
    pub checkout: Arc<CheckoutRequest>,
    /// Key handed to Stripe.js in the browser
    pub publishable_key: String,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Stripe gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let gateway = StripeGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        if gateway.config().is_live_mode() && !config.is_production() {
            warn!(
                "Live Stripe keys in use outside production (ENVIRONMENT={})",
                config.environment
            );
        }
        let publishable_key = gateway.config().publishable_key.clone();

        Ok(Self::with_gateway(
            config,
            Arc::new(gateway),
            Arc::new(LoggingWebhookHandler),
            publishable_key,
        ))
    }

    /// Assemble state from explicit parts
    pub fn with_gateway(
        config: AppConfig,
        gateway: BoxedPaymentGateway,
        webhook_handler: Arc<dyn WebhookHandler>,
        publishable_key: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            webhook_handler,
            checkout: Arc::new(config.checkout_request()),
            publishable_key: publishable_key.into(),
            config,
        }
    }
}
