//! Callback signature verification
//!
//! The gateway signs `"{order_id}|{payment_id}"` with HMAC-SHA256 under the
//! account secret and sends the hex digest back with the callback. This
//! check is the security boundary between the outside world and the wallet
//! ledger; a credit must never happen without it passing.

use crate::types::PaymentCallback;
use crate::{Error, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a payment callback signature against the account secret.
///
/// Comparison is constant-time via the MAC verifier. A malformed hex
/// signature fails the same way as a wrong one.
pub fn verify_callback(key_secret: &str, callback: &PaymentCallback) -> Result<()> {
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes())
        .map_err(|e| Error::Config(format!("Bad gateway secret: {}", e)))?;
    mac.update(format!("{}|{}", callback.order_id, callback.payment_id).as_bytes());

    let provided = hex::decode(&callback.signature).map_err(|_| {
        Error::PaymentVerificationFailed {
            order_id: callback.order_id.clone(),
        }
    })?;

    mac.verify_slice(&provided)
        .map_err(|_| Error::PaymentVerificationFailed {
            order_id: callback.order_id.clone(),
        })
}

/// Sign an order/payment pair the way the gateway does. Test builds use
/// this to fabricate valid callbacks.
pub fn sign(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
