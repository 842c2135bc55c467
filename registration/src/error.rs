//! Error types for the registration orchestrator

use thiserror::Error;
use uuid::Uuid;
use wallet_ledger::TeamId;

/// Result type for orchestrator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Orchestrator errors. All user-facing variants are recoverable; a ledger
/// `InsufficientFunds` typically drives a top-up flow followed by a retry.
#[derive(Error, Debug)]
pub enum Error {
    /// Wallet ledger error (insufficient funds, unknown player, ...)
    #[error("Ledger error: {0}")]
    Ledger(#[from] wallet_ledger::Error),

    /// Player already holds a registration for this tournament + level
    #[error("Already registered in {tournament} ({level})")]
    DuplicateRegistration {
        /// Tournament name
        tournament: String,
        /// Level name
        level: String,
    },

    /// Partner team ID does not resolve to an existing player
    #[error("Unknown partner: {0}")]
    UnknownPartner(TeamId),

    /// Doubles registration without a partner
    #[error("Doubles registration requires a partner team ID")]
    PartnerRequired,

    /// Referenced tournament does not exist (programming error in admin
    /// flows, user typo in join flows)
    #[error("Unknown tournament: {0}")]
    UnknownTournament(String),

    /// Referenced level does not exist within the tournament
    #[error("Unknown level {level} in tournament {tournament}")]
    UnknownLevel {
        /// Tournament name
        tournament: String,
        /// Level name
        level: String,
    },

    /// Tournament name already taken
    #[error("Tournament already exists: {0}")]
    DuplicateTournament(String),

    /// Draw is full for this level
    #[error("Tournament full (limit {draw_size})")]
    TournamentFull {
        /// Configured draw size
        draw_size: u32,
    },

    /// Referenced registration does not exist
    #[error("Registration not found: {0}")]
    RegistrationNotFound(Uuid),

    /// Registration is not in a state that permits the action
    #[error("Invalid registration state: {0}")]
    InvalidState(String),

    /// Referenced pickup match does not exist
    #[error("Unknown pickup match: {0}")]
    UnknownPickupMatch(Uuid),

    /// Pickup spec fails validation (zero slots, negative cost)
    #[error("Invalid pickup match: {0}")]
    InvalidPickupSpec(String),

    /// All slots are confirmed
    #[error("Slots full")]
    SlotsFull,

    /// Player already confirmed on this pickup match
    #[error("Already joined: {0}")]
    AlreadyJoined(TeamId),

    /// Player already invited or requested on this pickup match
    #[error("Already invited: {0}")]
    AlreadyInvited(TeamId),

    /// Action reserved for the match host
    #[error("Not the host of this match: {0}")]
    NotHost(TeamId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
