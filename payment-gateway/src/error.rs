//! Error types for the payment gateway adapter

use thiserror::Error;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Gateway adapter errors
#[derive(Error, Debug)]
pub enum Error {
    /// Callback signature does not match the expected HMAC. Fatal for the
    /// request; money must never move on a failed check.
    #[error("Payment verification failed for order {order_id}")]
    PaymentVerificationFailed {
        /// Gateway order ID from the callback
        order_id: String,
    },

    /// Order amount must be positive
    #[error("Invalid order amount: {0}")]
    InvalidAmount(i64),

    /// Gateway HTTP call failed
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned a non-success status
    #[error("Gateway returned {status}: {body}")]
    GatewayRejected {
        /// HTTP status code
        status: u16,
        /// Response body, for operator logs
        body: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
