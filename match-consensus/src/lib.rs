//! Match Result Consensus
//!
//! Two-party agreement protocol for match scores. A score submitted by one
//! side becomes official only after the *other* side approves it:
//!
//! ```text
//! Unscored ──submit_score──▶ PendingVerification ──APPROVE──▶ Official
//!     ▲                              │
//!     └────────admin reset───────────┴──────DENY──▶ Disputed
//! ```
//!
//! # Invariants
//!
//! - No match becomes Official without agreement from both sides; a team can
//!   never approve its own submission
//! - Disputed is terminal except by admin override
//! - Concurrent verifications on one match serialize; the race loser gets a
//!   typed state-transition error, never a double-apply

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod consensus;
pub mod error;
pub mod score;
pub mod types;

// Re-exports
pub use consensus::MatchBook;
pub use error::{Error, Result};
pub use score::{Score, SetScore};
pub use types::{MatchRecord, MatchSpec, MatchStatus, Outcome, Side, VerifyAction};
