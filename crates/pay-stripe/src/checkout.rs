//! # Stripe Checkout Sessions
//!
//! `PaymentGateway` implementation backed by the Stripe REST API.
//! Sessions are created with `POST /v1/checkout/sessions`; webhooks are
//! verified locally against the endpoint's signing secret.

use crate::config::StripeConfig;
use crate::signature::verify_signature;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pay_core::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentResult, WebhookEvent,
    WebhookEventKind,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const PROVIDER: &str = "stripe";

/// Stripe Checkout gateway
///
/// Uses Stripe's hosted checkout page, so card data never touches this server.
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Encode a checkout request the way the Stripe API expects it
    fn form_params(request: &CheckoutRequest) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), request.mode.as_str().to_string()),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
        ];

        for (i, method) in request.payment_method_types.iter().enumerate() {
            form_params.push((format!("payment_method_types[{}]", i), method.clone()));
        }

        for (i, item) in request.line_items.iter().enumerate() {
            form_params.push((format!("line_items[{}][price]", i), item.price.clone()));
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        form_params
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self, request), fields(items = request.line_items.len()))]
    async fn create_checkout(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSession> {
        if request.is_empty() {
            return Err(PaymentError::InvalidRequest(
                "Checkout has no items".to_string(),
            ));
        }

        let form_params = Self::form_params(request);
        debug!(
            "Creating Stripe checkout session: {} items, mode={}",
            request.item_count(),
            request.mode.as_str()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session: CheckoutSession = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session.id,
            session.url.as_deref().unwrap_or("-")
        );

        Ok(session)
    }

    #[instrument(skip(self, payload, signature), fields(bytes = payload.len()))]
    async fn verify_webhook(&self, payload: &[u8], signature: &str) -> PaymentResult<WebhookEvent> {
        verify_signature(
            payload,
            signature,
            &self.config.webhook_secret,
            self.config.webhook_tolerance_secs,
            Utc::now().timestamp(),
        )?;

        let event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            PaymentError::WebhookParseError(format!("Failed to parse webhook: {}", e))
        })?;

        debug!("Verified Stripe webhook: id={}, type={}", event.id, event.event_type);

        Ok(WebhookEvent {
            id: event.id,
            created: event.created.and_then(|ts| DateTime::from_timestamp(ts, 0)),
            livemode: event.livemode,
            kind: WebhookEventKind::from_parts(&event.event_type, event.data.object),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct StripeWebhookEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    created: Option<i64>,
    #[serde(default)]
    livemode: bool,
    #[serde(default)]
    data: StripeEventData,
}

#[derive(Debug, Default, Deserialize)]
struct StripeEventData {
    #[serde(default)]
    object: serde_json::Map<String, serde_json::Value>,
}
