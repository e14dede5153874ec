//! # Stripe Webhook Signatures
//!
//! Verification of the `Stripe-Signature` header.
//!
//! The header looks like `t=1700000000,v1=<hex>,v1=<hex>,v0=<hex>`. Each `v1`
//! value is an HMAC-SHA256 over `"{t}." ++ body` keyed with the endpoint's
//! signing secret. Other schemes are ignored.

use hmac::{Hmac, Mac};
use pay_core::{PaymentError, PaymentResult};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_SCHEME: &str = "v1";

/// Parsed `Stripe-Signature` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> PaymentResult<Self> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            match key {
                "t" => timestamp = value.parse().ok(),
                SIGNATURE_SCHEME => signatures.push(value.to_string()),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            PaymentError::WebhookVerificationFailed(
                "Unable to extract timestamp from signature header".to_string(),
            )
        })?;

        if signatures.is_empty() {
            return Err(PaymentError::WebhookVerificationFailed(
                "No signatures found with expected scheme".to_string(),
            ));
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

/// Verify `payload` against a `Stripe-Signature` header.
///
/// `now` is the current unix time; `tolerance_secs` of 0 skips the age check.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: u64,
    now: i64,
) -> PaymentResult<()> {
    let parsed = SignatureHeader::parse(header)?;

    let matched = parsed.signatures.iter().any(|candidate| {
        let Ok(expected) = hex::decode(candidate) else {
            return false;
        };
        signed_mac(secret, parsed.timestamp, payload)
            .verify_slice(&expected)
            .is_ok()
    });

    if !matched {
        return Err(PaymentError::WebhookVerificationFailed(
            "No signatures found matching the expected signature for payload".to_string(),
        ));
    }

    if tolerance_secs > 0 && now.abs_diff(parsed.timestamp) > tolerance_secs {
        return Err(PaymentError::WebhookVerificationFailed(
            "Timestamp outside the tolerance zone".to_string(),
        ));
    }

    Ok(())
}

/// Build a valid `Stripe-Signature` header for a payload.
///
/// Useful for exercising webhook endpoints locally and in tests.
pub fn generate_test_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let signature = hex::encode(signed_mac(secret, timestamp, payload).finalize().into_bytes());
    format!("t={},{}={}", timestamp, SIGNATURE_SCHEME, signature)
}

fn signed_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const NOW: i64 = 1_700_000_000;
    const PAYLOAD: &[u8] = br#"{"id":"evt_test","type":"checkout.session.completed"}"#;

    #[test]
    fn test_parse_signature_header() {
        let header = "t=1234567890,v1=abc123,v1=def456,v0=ignored";
        let parsed = SignatureHeader::parse(header).unwrap();

        assert_eq!(parsed.timestamp, 1234567890);
        assert_eq!(parsed.signatures, vec!["abc123", "def456"]);
    }

    #[test]
    fn test_parse_rejects_missing_parts() {
        assert!(SignatureHeader::parse("v1=abc123").is_err());
        assert!(SignatureHeader::parse("t=1234567890,v0=abc123").is_err());
        assert!(SignatureHeader::parse("garbage").is_err());
        assert!(SignatureHeader::parse("").is_err());
    }

    #[test]
    fn test_generated_header_verifies() {
        let header = generate_test_header(PAYLOAD, SECRET, NOW);

        assert!(header.starts_with("t=1700000000,v1="));
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, NOW).is_ok());
    }

    #[test]
    fn test_any_matching_signature_is_enough() {
        let valid = generate_test_header(PAYLOAD, SECRET, NOW);
        let sig = valid.split_once("v1=").unwrap().1;
        let header = format!("t={},v1={},v1={}", NOW, "00".repeat(32), sig);

        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, NOW).is_ok());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let header = generate_test_header(PAYLOAD, "whsec_other", NOW);
        let err = verify_signature(PAYLOAD, &header, SECRET, 300, NOW).unwrap_err();

        assert!(matches!(err, PaymentError::WebhookVerificationFailed(_)));
    }

    #[test]
    fn test_tampered_payload_fails() {
        let header = generate_test_header(PAYLOAD, SECRET, NOW);
        let tampered = br#"{"id":"evt_test", "type":"checkout.session.completed"}"#;

        assert!(verify_signature(tampered, &header, SECRET, 300, NOW).is_err());
    }

    #[test]
    fn test_non_hex_signature_fails() {
        let header = format!("t={},v1=not-hex", NOW);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, NOW).is_err());
    }

    #[test]
    fn test_timestamp_tolerance() {
        let header = generate_test_header(PAYLOAD, SECRET, NOW - 301);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, NOW).is_err());

        let header = generate_test_header(PAYLOAD, SECRET, NOW - 300);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, NOW).is_ok());

        // Zero tolerance disables the age check
        let header = generate_test_header(PAYLOAD, SECRET, NOW - 86_400);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 0, NOW).is_ok());
    }
}
