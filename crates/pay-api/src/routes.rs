//! # Routes
//!
//! Axum router configuration for the checkout server.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - GET  / - Checkout page
/// - POST /checkout - Create checkout session
/// - GET  /success - Success page
/// - GET  /cancel - Cancel page
/// - POST /webhook - Stripe webhook handler (raw body)
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/checkout", post(handlers::create_checkout))
        .route("/success", get(handlers::checkout_success))
        .route("/cancel", get(handlers::checkout_cancel))
        .route("/webhook", post(handlers::stripe_webhook))
        .route("/health", get(handlers::health))
        // Middleware
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        // State
        .with_state(state)
}
