//! Error types for match consensus

use crate::types::MatchStatus;
use thiserror::Error;
use uuid::Uuid;
use wallet_ledger::TeamId;

/// Result type for consensus operations
pub type Result<T> = std::result::Result<T, Error>;

/// Consensus errors
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced match does not exist (programming error)
    #[error("Unknown match: {0}")]
    UnknownMatch(Uuid),

    /// Operation is not legal from the match's current status. Also the
    /// error handed to the loser of a concurrent verification race.
    #[error("Invalid state transition: match is {current:?}, operation requires {required:?}")]
    InvalidStateTransition {
        /// Status the match is actually in
        current: MatchStatus,
        /// Status the operation requires
        required: MatchStatus,
    },

    /// A team cannot approve or deny its own submission
    #[error("Team {0} cannot verify its own submission")]
    SelfVerification(TeamId),

    /// Acting team is not a participant in the match
    #[error("Team {0} is not a participant in this match")]
    Unauthorized(TeamId),

    /// Malformed score string; never silently produces a winner
    #[error("Score parse error: {0}")]
    ScoreParse(String),
}
