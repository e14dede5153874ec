//! # Stripe Webhook Handling
//!
//! Dispatch of verified webhook events.
//! Only `checkout.session.completed` is acted on; every other event type is
//! acknowledged and ignored.

use pay_core::{PaymentError, PaymentResult, WebhookEvent, WebhookEventKind};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Parsed checkout.session.completed event data
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutCompletedData {
    pub session_id: String,
    pub payment_intent_id: Option<String>,
    pub customer_id: Option<String>,
    pub customer_email: Option<String>,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub payment_status: String,
    pub metadata: HashMap<String, String>,
}

impl CheckoutCompletedData {
    /// Parse from a checkout session object
    pub fn from_object(obj: &Map<String, Value>) -> PaymentResult<Self> {
        let str_field = |key: &str| obj.get(key).and_then(|v| v.as_str()).map(String::from);

        let session_id = str_field("id")
            .ok_or_else(|| PaymentError::WebhookParseError("Missing session id".to_string()))?;

        let customer_email = obj
            .get("customer_details")
            .and_then(|cd| cd.get("email"))
            .and_then(|v| v.as_str())
            .map(String::from);

        let metadata = obj
            .get("metadata")
            .and_then(|m| m.as_object())
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            session_id,
            payment_intent_id: str_field("payment_intent"),
            customer_id: str_field("customer"),
            customer_email,
            amount_total: obj.get("amount_total").and_then(|v| v.as_i64()),
            currency: str_field("currency"),
            payment_status: str_field("payment_status").unwrap_or_else(|| "unknown".to_string()),
            metadata,
        })
    }

    /// Check if payment was successful
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

/// Webhook event handler trait
///
/// Implement this trait to react to verified events.
#[allow(unused_variables)]
pub trait WebhookHandler: Send + Sync {
    /// Called when a checkout session is completed
    fn on_checkout_completed(
        &self,
        event: &WebhookEvent,
        session: &Map<String, Value>,
    ) -> PaymentResult<()> {
        Ok(())
    }

    /// Called for every event type without a dedicated hook
    fn on_unhandled_event(&self, event: &WebhookEvent) -> PaymentResult<()> {
        debug!("Unhandled webhook event: id={}, type={}", event.id, event.event_type());
        Ok(())
    }
}

/// Logs completed checkouts and nothing else
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {
    fn on_checkout_completed(
        &self,
        event: &WebhookEvent,
        session: &Map<String, Value>,
    ) -> PaymentResult<()> {
        match CheckoutCompletedData::from_object(session) {
            Ok(data) => info!(
                event_id = %event.id,
                session_id = %data.session_id,
                payment_intent = ?data.payment_intent_id,
                customer_email = ?data.customer_email,
                amount_total = ?data.amount_total,
                currency = ?data.currency,
                payment_status = %data.payment_status,
                paid = data.is_paid(),
                "Checkout session completed"
            ),
            Err(e) => warn!(event_id = %event.id, "Completed session without summary: {}", e),
        }

        let object = Value::Object(session.clone());
        info!(event_id = %event.id, session = %object, "Checkout session object");
        Ok(())
    }
}

/// Dispatch a webhook event to the appropriate handler method
pub fn dispatch_webhook_event(handler: &dyn WebhookHandler, event: &WebhookEvent) -> PaymentResult<()> {
    match &event.kind {
        WebhookEventKind::CheckoutSessionCompleted { session } => {
            handler.on_checkout_completed(event, session)
        }
        WebhookEventKind::Unhandled { .. } => handler.on_unhandled_event(event),
    }
}

/// Events that should be enabled in the Stripe Dashboard for this endpoint
pub const HANDLED_WEBHOOK_EVENTS: &[&str] = &[pay_core::CHECKOUT_SESSION_COMPLETED];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session_object() -> Map<String, Value> {
        json!({
            "id": "cs_test_123",
            "payment_intent": "pi_test_456",
            "customer": "cus_test_789",
            "customer_details": {
                "email": "test@example.com"
            },
            "amount_total": 1000,
            "currency": "eur",
            "payment_status": "paid",
            "metadata": {
                "order_id": "ord_test_abc"
            }
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn event(kind: WebhookEventKind) -> WebhookEvent {
        WebhookEvent {
            id: "evt_test".to_string(),
            created: Some(Utc::now()),
            livemode: false,
            kind,
        }
    }

    #[derive(Default)]
    struct CountingHandler {
        completed: AtomicUsize,
        unhandled: AtomicUsize,
    }

    impl WebhookHandler for CountingHandler {
        fn on_checkout_completed(
            &self,
            _event: &WebhookEvent,
            _session: &Map<String, Value>,
        ) -> PaymentResult<()> {
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_unhandled_event(&self, _event: &WebhookEvent) -> PaymentResult<()> {
            self.unhandled.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_parse_checkout_completed() {
        let data = CheckoutCompletedData::from_object(&session_object()).unwrap();

        assert_eq!(data.session_id, "cs_test_123");
        assert_eq!(data.payment_intent_id, Some("pi_test_456".to_string()));
        assert_eq!(data.customer_email, Some("test@example.com".to_string()));
        assert_eq!(data.amount_total, Some(1000));
        assert_eq!(data.currency.as_deref(), Some("eur"));
        assert!(data.is_paid());
        assert_eq!(data.metadata.get("order_id").map(String::as_str), Some("ord_test_abc"));
    }

    #[test]
    fn test_parse_requires_session_id() {
        let mut obj = session_object();
        obj.remove("id");

        assert!(CheckoutCompletedData::from_object(&obj).is_err());
    }

    #[test]
    fn test_dispatch_completed() {
        let handler = CountingHandler::default();
        let event = event(WebhookEventKind::CheckoutSessionCompleted {
            session: session_object(),
        });

        dispatch_webhook_event(&handler, &event).unwrap();

        assert_eq!(handler.completed.load(Ordering::SeqCst), 1);
        assert_eq!(handler.unhandled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dispatch_unhandled() {
        let handler = CountingHandler::default();
        let event = event(WebhookEventKind::Unhandled {
            event_type: "invoice.paid".to_string(),
        });

        dispatch_webhook_event(&handler, &event).unwrap();

        assert_eq!(handler.completed.load(Ordering::SeqCst), 0);
        assert_eq!(handler.unhandled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_logging_handler_accepts_full_session() {
        let event = event(WebhookEventKind::CheckoutSessionCompleted {
            session: session_object(),
        });

        assert!(LoggingWebhookHandler.on_checkout_completed(&event, &session_object()).is_ok());
    }

    #[test]
    fn test_logging_handler_tolerates_partial_session() {
        let event = event(WebhookEventKind::CheckoutSessionCompleted {
            session: Map::new(),
        });

        assert!(dispatch_webhook_event(&LoggingWebhookHandler, &event).is_ok());
    }
}
