//! Registration Orchestrator
//!
//! Turns join/host/invite intents into wallet-ledger entries plus
//! registration and pickup-match records.
//!
//! # Money rules
//!
//! - Every money movement routes through the wallet ledger; this crate never
//!   touches a balance directly
//! - Split payments (doubles, individual scope) are two independent debits
//!   against two different players, never one multi-party transaction
//! - There is no automatic refund path anywhere; cancellations and no-shows
//!   are left to manual admin wallet adjustment

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod groups;
pub mod notify;
pub mod orchestrator;
pub mod pickup;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use notify::{LogNotifier, PartnerNotifier};
pub use orchestrator::{JoinOutcome, JoinStatus, Orchestrator};
pub use pickup::PickupBoard;
pub use types::{
    Format, JoinMode, Level, PaymentScope, PickupMatch, PickupPlayer, PickupSpec, PickupStatus,
    RegRole, RegStatus, Registration, SlotStatus, Tournament, TournamentStatus,
};
