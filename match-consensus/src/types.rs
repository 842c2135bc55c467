//! Core types for match consensus

use crate::score::Score;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wallet_ledger::TeamId;

/// Match lifecycle state, mutated only through the consensus protocol or
/// admin override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// No score submitted yet
    Unscored,
    /// One side submitted; waiting on the other side
    PendingVerification,
    /// Both sides agreed; eligible for standings
    Official,
    /// The other side denied; terminal until admin intervention
    Disputed,
}

/// Which side of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// First listed team
    Team1,
    /// Second listed team
    Team2,
}

/// Result of a score, by majority of sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One side took more sets
    Winner(Side),
    /// Equal sets
    Draw,
}

/// Verification action taken by the non-submitting side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerifyAction {
    /// Accept the submitted score; match becomes Official
    Approve,
    /// Contest the submitted score; match becomes Disputed
    Deny,
}

/// Scheduler/admin input for creating a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSpec {
    /// Tournament name
    pub tournament: String,
    /// Fee level (category) within the tournament
    pub level: String,
    /// Round-robin group label
    pub group: String,
    /// First team
    pub team1: TeamId,
    /// Second team
    pub team2: TeamId,
    /// Stage label (e.g. "Group", "Semi Final")
    pub stage: String,
    /// Scheduled date (YYYY-MM-DD)
    pub date: String,
    /// Scheduled time (HH:MM)
    pub time: String,
}

/// A scheduled match and its consensus state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique match ID
    pub id: Uuid,

    /// Tournament name
    pub tournament: String,

    /// Fee level (category)
    pub level: String,

    /// Round-robin group label
    pub group: String,

    /// First team
    pub team1: TeamId,

    /// Second team
    pub team2: TeamId,

    /// Stage label
    pub stage: String,

    /// Scheduled date
    pub date: String,

    /// Scheduled time
    pub time: String,

    /// Submitted or official score
    pub score: Option<Score>,

    /// Consensus state
    pub status: MatchStatus,

    /// Team that submitted the pending score
    pub submitted_by: Option<TeamId>,
}

impl MatchRecord {
    /// Which side a team plays on, if any
    pub fn side_of(&self, team: &TeamId) -> Option<Side> {
        if &self.team1 == team {
            Some(Side::Team1)
        } else if &self.team2 == team {
            Some(Side::Team2)
        } else {
            None
        }
    }

    /// Is the team one of the two participants?
    pub fn is_participant(&self, team: &TeamId) -> bool {
        self.side_of(team).is_some()
    }
}
