//! Wire types for the gateway boundary

use serde::{Deserialize, Serialize};
use wallet_ledger::Amount;

/// An external top-up order minted at the gateway. The `key_id` travels to
/// the client so the checkout widget can open against the right account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Gateway-assigned order ID
    pub order_id: String,

    /// Amount in minor units
    pub amount: Amount,

    /// ISO currency code
    pub currency: String,

    /// Public key ID for the checkout widget
    pub key_id: String,
}

/// Callback fields posted back after the player completes checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCallback {
    /// Order ID the payment settles
    pub order_id: String,

    /// Gateway payment ID
    pub payment_id: String,

    /// HMAC-SHA256 hex signature over `"{order_id}|{payment_id}"`
    pub signature: String,
}
