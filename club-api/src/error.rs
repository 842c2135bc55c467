//! Error aggregation across the component crates

use thiserror::Error;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, Error>;

/// One error surface for the request layer. Every variant carries the
/// component error unchanged so callers can still match on the typed cause.
#[derive(Error, Debug)]
pub enum Error {
    /// Wallet ledger error
    #[error(transparent)]
    Ledger(#[from] wallet_ledger::Error),

    /// Registration orchestrator error
    #[error(transparent)]
    Registration(#[from] registration::Error),

    /// Match consensus error
    #[error(transparent)]
    Consensus(#[from] match_consensus::Error),

    /// Payment gateway error
    #[error(transparent)]
    Gateway(#[from] payment_gateway::Error),

    /// Callback references an order this service never minted
    #[error("Unknown order: {0}")]
    UnknownOrder(String),

    /// Payment ID was already credited once
    #[error("Payment already credited: {0}")]
    DuplicatePayment(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
