//! Types for standings computation

use serde::{Deserialize, Serialize};
use wallet_ledger::TeamId;

/// Points awarded per completed official match. Configuration, not
/// hard-coded logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointsScheme {
    /// Points for a win
    pub win: u32,
    /// Points for a draw
    pub draw: u32,
    /// Points for a loss
    pub loss: u32,
}

impl Default for PointsScheme {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// One confirmed tournament entrant, as the aggregator sees them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entrant {
    /// Entrant's team ID
    pub team: TeamId,

    /// Display name
    pub name: String,

    /// Assigned round-robin group
    pub group: String,

    /// Registration sequence number - the final, deterministic tie-break
    pub seq: u64,
}

/// One row of computed standings. Derived on read, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// Entrant's team ID
    pub team: TeamId,

    /// Display name
    pub name: String,

    /// Group label
    pub group: String,

    /// Official matches involving this team
    pub played: u32,

    /// Total games won across those matches (game granularity, not sets)
    pub games_won: u32,

    /// Points under the configured scheme
    pub points: u32,

    /// Top-2 of the group, eligible for knockout seeding. Presentation
    /// flag consumed by the client, not persisted.
    pub qualified: bool,
}
