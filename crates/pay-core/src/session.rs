//! # Checkout Types
//!
//! Checkout request and session types shared by the gateway and the API.

use serde::{Deserialize, Serialize};

/// A line item referencing a price in the provider's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Provider price ID (e.g. `price_...`)
    pub price: String,

    /// Quantity
    pub quantity: u32,
}

impl LineItem {
    pub fn new(price: impl Into<String>, quantity: u32) -> Self {
        Self {
            price: price.into(),
            quantity,
        }
    }
}

/// Checkout mode
///
/// Only one-time payments are sold here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// Everything the gateway needs to open a hosted checkout session.
///
/// The server builds one of these at startup and reuses it for every
/// checkout call; nothing in it comes from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Checkout mode
    #[serde(default)]
    pub mode: CheckoutMode,

    /// Accepted payment method types (e.g. `card`)
    pub payment_method_types: Vec<String>,

    /// Items to charge for
    pub line_items: Vec<LineItem>,

    /// Where the hosted page sends the customer after paying
    pub success_url: String,

    /// Where the hosted page sends the customer on cancel
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Single item, one-time card payment
    pub fn single_payment(
        price: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            mode: CheckoutMode::Payment,
            payment_method_types: vec!["card".to_string()],
            line_items: vec![LineItem::new(price, 1)],
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }

    /// Check if request has no items
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Get item count
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }
}

/// A checkout session created by a payment provider.
///
/// Only `id` and `url` are typed; every other field the provider returned is
/// kept in `fields` so the session can be handed back to the browser as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub id: String,

    /// Hosted checkout URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl CheckoutSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            fields: serde_json::Map::new(),
        }
    }

    /// Builder: set the hosted checkout URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Look up a string field the provider returned
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}
