//! Club Wallet Ledger
//!
//! Append-only transaction ledger holding every player's spendable balance.
//!
//! # Architecture
//!
//! - **Event sourcing**: a balance is never stored; it is always folded from
//!   the player's immutable transaction log
//! - **Per-player serialization**: all mutations for one player go through
//!   that player's lock, so concurrent debits cannot both pass a stale
//!   balance check
//! - **Single owner of money**: no other component mutates balances; callers
//!   route every debit/credit through this crate
//!
//! # Invariants
//!
//! - `balance_of(p)` == Σ(completed credits) − Σ(completed + reserved debits)
//! - No debit takes a balance negative
//! - Pending withdrawals are reserved at creation and never reverse the
//!   debit; rejection issues a compensating credit instead

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod error;
pub mod ledger;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use ledger::WalletLedger;
pub use types::{
    Amount, Player, PlayerStatus, Profile, TeamId, Transaction, TxFilter, TxKind, TxMode, TxStatus,
};
