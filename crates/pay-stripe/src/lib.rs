//! # pay-stripe
//!
//! Stripe gateway for the hosted checkout server.
//!
//! `StripeGateway` implements `pay_core::PaymentGateway`:
//! - Checkout Sessions API for hosted, one-time card payments
//! - Local verification of `Stripe-Signature` webhook headers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_core::{CheckoutRequest, PaymentGateway};
//! use pay_stripe::StripeGateway;
//!
//! let gateway = StripeGateway::from_env()?;
//!
//! let request = CheckoutRequest::single_payment(
//!     "price_...",
//!     "http://localhost:3000/success",
//!     "http://localhost:3000/cancel",
//! );
//! let session = gateway.create_checkout(&request).await?;
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use pay_stripe::{dispatch_webhook_event, LoggingWebhookHandler};
//!
//! // In your webhook endpoint, with the raw body bytes:
//! let event = gateway.verify_webhook(&body, signature).await?;
//! dispatch_webhook_event(&LoggingWebhookHandler, &event)?;
//! ```

pub mod checkout;
pub mod config;
pub mod signature;
pub mod webhook;

// Re-exports
pub use checkout::StripeGateway;
pub use config::StripeConfig;
pub use signature::{generate_test_header, verify_signature};
pub use webhook::{
    dispatch_webhook_event, CheckoutCompletedData, LoggingWebhookHandler, WebhookHandler,
    HANDLED_WEBHOOK_EVENTS,
};
