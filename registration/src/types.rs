//! Core types for registrations, tournaments, and pickup matches

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wallet_ledger::{Amount, TeamId};

/// Tournament format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// One player per slot
    Singles,
    /// Two players per slot
    Doubles,
}

/// Tournament lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStatus {
    /// Accepting registrations
    Open,
    /// Registration closed
    Closed,
}

/// One fee level (category) within a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Level name (e.g. "Beginner", "Open")
    pub name: String,

    /// Entry fee per person, minor units
    pub fee: Amount,

    /// First-place prize
    pub prize_1: Amount,

    /// Second-place prize
    pub prize_2: Amount,

    /// Third-place prize
    pub prize_3: Amount,

    /// Prize paid per match played
    pub per_match_prize: Amount,
}

/// A tournament. Immutable once matches exist except by explicit admin edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique tournament ID
    pub id: Uuid,

    /// Unique tournament name
    pub name: String,

    /// Host city
    pub city: String,

    /// Sport (e.g. "Padel", "Tennis")
    pub sport: String,

    /// Singles or doubles
    pub format: Format,

    /// Lifecycle state
    pub status: TournamentStatus,

    /// Maximum entries per level
    pub draw_size: u32,

    /// Fee levels
    pub levels: Vec<Level>,
}

impl Tournament {
    /// Find a level by name
    pub fn level(&self, name: &str) -> Option<&Level> {
        self.levels.iter().find(|level| level.name == name)
    }
}

/// Registration status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegStatus {
    /// Paid and holding a slot
    Confirmed,
    /// Waiting for the partner to pay their own share
    PendingPartner,
}

/// Who paid for a doubles entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentScope {
    /// Each partner pays their own share independently
    Individual,
    /// One payer covers both shares
    Team,
}

/// Role of a registration row within a doubles pair. The captain row holds
/// the pair's slot for capacity and group accounting; the partner row
/// mirrors the captain's group. Singles rows are always captains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegRole {
    /// Slot-holding row
    Captain,
    /// Mirrored half of a doubles pair
    Partner,
}

/// One player's registration row for a tournament level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Unique registration ID
    pub id: Uuid,

    /// Registered player
    pub team_id: TeamId,

    /// Tournament name
    pub tournament: String,

    /// Level name
    pub level: String,

    /// Assigned group; `None` until the entry holds a playable slot
    pub group: Option<String>,

    /// Confirmed or waiting on the partner
    pub status: RegStatus,

    /// Payment scope chosen at join time
    pub payment_scope: PaymentScope,

    /// Slot-holder or mirrored partner row
    pub role: RegRole,

    /// The other half of a doubles pair
    pub partner: Option<TeamId>,

    /// Monotonic registration sequence - deterministic standings tie-break
    pub seq: u64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Pickup-match visibility / join policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinMode {
    /// Anyone may pay and join
    Open,
    /// Joining requires host approval
    Request,
}

/// Pickup-match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupStatus {
    /// Accepting players
    Open,
    /// All slots confirmed
    Full,
    /// Played and closed by the host
    Completed,
}

/// Per-player sub-status on a pickup match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Invited by the host; not yet paid
    Invited,
    /// Asked to join; awaiting host approval
    Requested,
    /// Paid and playing
    Confirmed,
}

/// A player's slot on a pickup match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupPlayer {
    /// The player
    pub team_id: TeamId,
    /// Slot state
    pub status: SlotStatus,
}

/// Host input for creating a pickup match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupSpec {
    /// Sport
    pub sport: String,
    /// Venue / court name
    pub venue: String,
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Time (HH:MM)
    pub time: String,
    /// Number of paid slots (host plays outside the slot count)
    pub total_slots: u32,
    /// Total court cost split across slots, minor units
    pub total_cost: Amount,
    /// Join policy
    pub join_mode: JoinMode,
    /// Free-text description (level, gender, ...)
    pub description: String,
}

/// An open-play match hosted by a player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupMatch {
    /// Unique match ID
    pub id: Uuid,

    /// Hosting player; pays the platform fee, does not occupy a slot
    pub host: TeamId,

    /// Sport
    pub sport: String,

    /// Venue
    pub venue: String,

    /// Date
    pub date: String,

    /// Time
    pub time: String,

    /// Number of paid slots
    pub total_slots: u32,

    /// Total cost split across slots
    pub total_cost: Amount,

    /// Join policy
    pub join_mode: JoinMode,

    /// Lifecycle state
    pub status: PickupStatus,

    /// Free-text description
    pub description: String,

    /// Player slots (invited / requested / confirmed)
    pub players: Vec<PickupPlayer>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl PickupMatch {
    /// Each joiner's share of the court cost
    pub fn cost_per_slot(&self) -> Amount {
        self.total_cost / Amount::from(self.total_slots)
    }

    /// Number of paid, confirmed players
    pub fn confirmed_count(&self) -> u32 {
        self.players
            .iter()
            .filter(|p| p.status == SlotStatus::Confirmed)
            .count() as u32
    }

    /// A player's current slot status, if any
    pub fn slot_of(&self, team_id: &TeamId) -> Option<SlotStatus> {
        self.players
            .iter()
            .find(|p| &p.team_id == team_id)
            .map(|p| p.status)
    }
}
