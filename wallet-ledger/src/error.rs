//! Error types for the wallet ledger

use crate::types::{Amount, TeamId};
use thiserror::Error;
use uuid::Uuid;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
///
/// `UnknownPlayer` and `TransactionNotFound` are programming errors: no
/// user-facing flow can legitimately reference a player or transaction that
/// does not exist. They are logged for operator attention and must never
/// silently credit or debit.
#[derive(Error, Debug)]
pub enum Error {
    /// Debit would take the balance negative; recoverable by topping up
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount the caller tried to move
        required: Amount,
        /// Balance at the time of the check
        available: Amount,
    },

    /// Referenced player does not exist (programming error)
    #[error("Unknown player: {0}")]
    UnknownPlayer(TeamId),

    /// Phone number already registered
    #[error("Phone already registered: {0}")]
    DuplicatePhone(String),

    /// Generated team ID lost a concurrent registration race
    #[error("Team ID already taken: {0}")]
    DuplicateTeamId(TeamId),

    /// Referenced transaction does not exist or was already resolved
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Transaction is not in a state that permits the requested action
    #[error("Invalid transaction state: {0}")]
    InvalidState(String),

    /// Amounts must be positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(Amount),

    /// Account is deactivated; no new money movement allowed
    #[error("Player deactivated: {0}")]
    PlayerDeactivated(TeamId),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
