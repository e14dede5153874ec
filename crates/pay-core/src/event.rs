//! # Webhook Events
//!
//! Provider events after signature verification. The event type string is
//! mapped onto [`WebhookEventKind`] so dispatch is an exhaustive match.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Event type for a completed hosted checkout
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// What a verified event is about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebhookEventKind {
    /// `checkout.session.completed`, carrying the session object
    CheckoutSessionCompleted {
        session: serde_json::Map<String, serde_json::Value>,
    },
    /// Any event type this server does not act on
    Unhandled { event_type: String },
}

impl WebhookEventKind {
    /// Map an event type and its `data.object` onto a kind
    pub fn from_parts(
        event_type: &str,
        object: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        match event_type {
            CHECKOUT_SESSION_COMPLETED => WebhookEventKind::CheckoutSessionCompleted { session: object },
            other => WebhookEventKind::Unhandled {
                event_type: other.to_string(),
            },
        }
    }

    /// The provider's event type string
    pub fn event_type(&self) -> &str {
        match self {
            WebhookEventKind::CheckoutSessionCompleted { .. } => CHECKOUT_SESSION_COMPLETED,
            WebhookEventKind::Unhandled { event_type } => event_type,
        }
    }
}

/// A verified webhook event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookEvent {
    /// Event ID from provider
    pub id: String,

    /// When the provider created the event, if it said
    pub created: Option<DateTime<Utc>>,

    /// Whether the event came from live mode
    pub livemode: bool,

    pub kind: WebhookEventKind,
}

impl WebhookEvent {
    pub fn event_type(&self) -> &str {
        self.kind.event_type()
    }
}
