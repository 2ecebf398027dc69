//! # Payment Signature Verification
//!
//! Razorpay proves that a payment belongs to an order by signing
//! `"{order_id}|{payment_id}"` with HMAC-SHA256 under the key secret and
//! sending the hex digest back with the client's confirmation callback.

use checkout_core::{CheckoutError, CheckoutResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the expected hex signature for an order/payment pair
pub fn compute_signature(gateway_order_id: &str, gateway_payment_id: &str, secret: &str) -> String {
    let message = format!("{gateway_order_id}|{gateway_payment_id}");
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a payment signature.
///
/// Recomputes the HMAC and compares constant-time. A mismatch returns
/// `Ok(false)`; only malformed (empty) inputs error.
pub fn verify_signature(
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature: &str,
    secret: &str,
) -> CheckoutResult<bool> {
    if gateway_order_id.is_empty() || gateway_payment_id.is_empty() || signature.is_empty() {
        return Err(CheckoutError::InvalidRequest(
            "gateway order id, payment id, and signature are required".to_string(),
        ));
    }
    let expected = compute_signature(gateway_order_id, gateway_payment_id, secret);
    Ok(constant_time_compare(&expected, signature))
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_signature() {
        // secret "s", message "o1|p1"
        let expected = compute_signature("o1", "p1", "s");
        assert_eq!(expected.len(), 64);
        assert!(verify_signature("o1", "p1", &expected, "s").unwrap());
    }

    #[test]
    fn test_any_other_string_rejected() {
        let valid = compute_signature("o1", "p1", "s");

        assert!(!verify_signature("o1", "p1", "deadbeef", "s").unwrap());
        assert!(!verify_signature("o1", "p1", &valid.to_uppercase(), "s").unwrap());
        // Signature for a different pair does not transfer.
        let other = compute_signature("o2", "p2", "s");
        assert!(!verify_signature("o1", "p1", &other, "s").unwrap());
        // Wrong secret.
        assert!(!verify_signature("o1", "p1", &valid, "t").unwrap());
    }

    #[test]
    fn test_malformed_inputs_error() {
        assert!(verify_signature("", "p1", "sig", "s").is_err());
        assert!(verify_signature("o1", "", "sig", "s").is_err());
        assert!(verify_signature("o1", "p1", "", "s").is_err());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
