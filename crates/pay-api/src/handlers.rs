//! # Request Handlers
//!
//! Axum request handlers for the checkout server.

use crate::page::render_checkout_page;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use pay_core::CheckoutSession;
use pay_stripe::dispatch_webhook_event;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Header carrying the webhook signature
pub const SIGNATURE_HEADER: &str = "stripe-signature";

// =============================================================================
// Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Checkout page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_checkout_page(&state.publishable_key))
}

/// Create a checkout session for the configured price
#[instrument(skip(state))]
pub async fn create_checkout(
    State(state): State<AppState>,
) -> Result<Json<CheckoutSession>, (StatusCode, Json<ErrorResponse>)> {
    let session = state
        .gateway
        .create_checkout(&state.checkout)
        .await
        .map_err(|e| {
            error!("Failed to create checkout: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string(), 500)),
            )
        })?;

    info!("Created checkout session: {}", session.id);

    Ok(Json(session))
}

/// Checkout success page
pub async fn checkout_success() -> &'static str {
    "Pago exitoso"
}

/// Checkout cancel page
pub async fn checkout_cancel() -> &'static str {
    "Pago cancelado"
}

/// Handle Stripe webhook
///
/// The body is taken as raw bytes: the signature covers exactly what Stripe
/// sent, so it must not be parsed before verification.
#[instrument(skip(state, headers, body), fields(bytes = body.len()))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, StatusCode> {
    let Some(signature) = headers.get(SIGNATURE_HEADER) else {
        error!("Webhook signature verification failed: missing {} header", SIGNATURE_HEADER);
        return Err(StatusCode::BAD_REQUEST);
    };

    let Ok(signature) = signature.to_str() else {
        error!(
            "Webhook signature verification failed: {} header is not visible ASCII",
            SIGNATURE_HEADER
        );
        return Err(StatusCode::BAD_REQUEST);
    };

    let event = state
        .gateway
        .verify_webhook(&body, signature)
        .await
        .map_err(|e| {
            error!("Webhook rejected: {}", e);
            StatusCode::BAD_REQUEST
        })?;

    info!(
        "Received webhook: type={}, id={}",
        event.event_type(),
        event.id
    );

    // Stripe retries anything that is not a 2xx, so handler failures are
    // logged and still acknowledged.
    if let Err(e) = dispatch_webhook_event(state.webhook_handler.as_ref(), &event) {
        warn!("Webhook handler error: id={}, {}", event.id, e);
    }

    Ok("success")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 500);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 500);
    }
}
