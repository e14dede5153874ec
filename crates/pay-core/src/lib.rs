//! # pay-core
//!
//! Core types and traits for the hosted checkout server.
//!
//! This crate provides:
//! - `PaymentGateway` trait for payment providers
//! - `CheckoutRequest` and `CheckoutSession` for the checkout flow
//! - `WebhookEvent` and `WebhookEventKind` for verified provider events
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{CheckoutRequest, CheckoutUrls, PaymentGateway};
//!
//! let urls = CheckoutUrls::new("http://localhost:3000");
//! let request = CheckoutRequest::single_payment("price_123", urls.success_url(), urls.cancel_url());
//!
//! let session = gateway.create_checkout(&request).await?;
//! // Hand session.id to Stripe.js redirectToCheckout
//! ```

pub mod error;
pub mod event;
pub mod gateway;
pub mod session;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use event::{WebhookEvent, WebhookEventKind, CHECKOUT_SESSION_COMPLETED};
pub use gateway::{BoxedPaymentGateway, CheckoutUrls, PaymentGateway};
pub use session::{CheckoutMode, CheckoutRequest, CheckoutSession, LineItem};
