//! Match book: the consensus state machine over scheduled matches
//!
//! Each match record sits behind its own lock, so concurrent verification
//! attempts on one match serialize and the loser observes the new status.

use crate::score::Score;
use crate::types::{MatchRecord, MatchSpec, MatchStatus, VerifyAction};
use crate::{Error, Result};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;
use wallet_ledger::TeamId;

/// All scheduled matches, keyed by match ID
#[derive(Default)]
pub struct MatchBook {
    matches: DashMap<Uuid, Arc<Mutex<MatchRecord>>>,
}

impl MatchBook {
    /// Create an empty match book
    pub fn new() -> Self {
        Self {
            matches: DashMap::new(),
        }
    }

    /// Scheduler/admin: create a match in Unscored state
    pub fn create_match(&self, spec: MatchSpec) -> MatchRecord {
        let record = MatchRecord {
            id: Uuid::now_v7(),
            tournament: spec.tournament,
            level: spec.level,
            group: spec.group,
            team1: spec.team1,
            team2: spec.team2,
            stage: spec.stage,
            date: spec.date,
            time: spec.time,
            score: None,
            status: MatchStatus::Unscored,
            submitted_by: None,
        };
        self.matches
            .insert(record.id, Arc::new(Mutex::new(record.clone())));
        tracing::info!(match_id = %record.id, tournament = %record.tournament, "Match created");
        record
    }

    /// Snapshot of one match
    pub fn get(&self, match_id: Uuid) -> Result<MatchRecord> {
        Ok(self.entry(match_id)?.lock().clone())
    }

    /// One side submits a score. Only legal from Unscored; the submitter
    /// must be a participant and the score must parse.
    pub fn submit_score(&self, match_id: Uuid, score: &str, submitted_by: &TeamId) -> Result<MatchRecord> {
        let score: Score = score.parse()?;
        let entry = self.entry(match_id)?;
        let mut record = entry.lock();

        if !record.is_participant(submitted_by) {
            return Err(Error::Unauthorized(submitted_by.clone()));
        }
        require_status(&record, MatchStatus::Unscored)?;

        record.score = Some(score);
        record.submitted_by = Some(submitted_by.clone());
        record.status = MatchStatus::PendingVerification;

        tracing::info!(match_id = %match_id, team = %submitted_by, "Score submitted, awaiting verification");
        Ok(record.clone())
    }

    /// The other side approves or denies a pending score.
    ///
    /// The submitting team can never verify its own submission; that check
    /// is what guarantees every Official result carries two-party agreement.
    pub fn verify_score(
        &self,
        match_id: Uuid,
        action: VerifyAction,
        acting_team: &TeamId,
    ) -> Result<MatchRecord> {
        let entry = self.entry(match_id)?;
        let mut record = entry.lock();

        if !record.is_participant(acting_team) {
            return Err(Error::Unauthorized(acting_team.clone()));
        }
        require_status(&record, MatchStatus::PendingVerification)?;
        if record.submitted_by.as_ref() == Some(acting_team) {
            return Err(Error::SelfVerification(acting_team.clone()));
        }

        record.status = match action {
            VerifyAction::Approve => MatchStatus::Official,
            VerifyAction::Deny => MatchStatus::Disputed,
        };

        match record.status {
            MatchStatus::Official => {
                tracing::info!(match_id = %match_id, team = %acting_team, "Score approved, match official")
            }
            _ => tracing::warn!(match_id = %match_id, team = %acting_team, "Score denied, match disputed"),
        }
        Ok(record.clone())
    }

    /// Admin override: set score and status directly, bypassing consensus.
    /// Used to resolve Disputed matches.
    pub fn admin_set_score(&self, match_id: Uuid, score: &str) -> Result<MatchRecord> {
        let score: Score = score.parse()?;
        let entry = self.entry(match_id)?;
        let mut record = entry.lock();

        record.score = Some(score);
        record.status = MatchStatus::Official;
        record.submitted_by = None;

        tracing::warn!(match_id = %match_id, "Admin override: score set official");
        Ok(record.clone())
    }

    /// Admin override: reset a disputed match for re-submission
    pub fn admin_reset(&self, match_id: Uuid) -> Result<MatchRecord> {
        let entry = self.entry(match_id)?;
        let mut record = entry.lock();
        require_status(&record, MatchStatus::Disputed)?;

        record.score = None;
        record.submitted_by = None;
        record.status = MatchStatus::Unscored;

        tracing::warn!(match_id = %match_id, "Admin override: disputed match reset");
        Ok(record.clone())
    }

    /// Admin: update schedule fields (date, time)
    pub fn reschedule(&self, match_id: Uuid, date: &str, time: &str) -> Result<MatchRecord> {
        let entry = self.entry(match_id)?;
        let mut record = entry.lock();
        record.date = date.to_string();
        record.time = time.to_string();
        Ok(record.clone())
    }

    /// Admin: replace the pairing and scheduling fields of a match that has
    /// not been scored yet. Scored matches must be reset first so a fixed
    /// score can never silently migrate to a different pairing.
    pub fn edit_match(&self, match_id: Uuid, spec: MatchSpec) -> Result<MatchRecord> {
        let entry = self.entry(match_id)?;
        let mut record = entry.lock();
        require_status(&record, MatchStatus::Unscored)?;

        record.tournament = spec.tournament;
        record.level = spec.level;
        record.group = spec.group;
        record.team1 = spec.team1;
        record.team2 = spec.team2;
        record.stage = spec.stage;
        record.date = spec.date;
        record.time = spec.time;

        tracing::info!(match_id = %match_id, "Match edited");
        Ok(record.clone())
    }

    /// Admin: remove a match entirely
    pub fn delete_match(&self, match_id: Uuid) -> Result<()> {
        self.matches
            .remove(&match_id)
            .map(|_| ())
            .ok_or(Error::UnknownMatch(match_id))
    }

    /// Snapshot of all matches for a tournament, optionally narrowed by
    /// level and group
    pub fn matches_for(
        &self,
        tournament: &str,
        level: Option<&str>,
        group: Option<&str>,
    ) -> Vec<MatchRecord> {
        self.matches
            .iter()
            .map(|entry| entry.value().lock().clone())
            .filter(|record| {
                record.tournament == tournament
                    && level.map_or(true, |l| record.level == l)
                    && group.map_or(true, |g| record.group == g)
            })
            .collect()
    }

    /// Consistent snapshot of Official matches only - the read surface for
    /// the standings aggregator (pull, not push)
    pub fn official_matches(
        &self,
        tournament: &str,
        level: Option<&str>,
        group: Option<&str>,
    ) -> Vec<MatchRecord> {
        let mut official: Vec<MatchRecord> = self
            .matches_for(tournament, level, group)
            .into_iter()
            .filter(|record| record.status == MatchStatus::Official)
            .collect();
        // Deterministic order for deterministic standings input
        official.sort_by_key(|record| record.id);
        official
    }

    fn entry(&self, match_id: Uuid) -> Result<Arc<Mutex<MatchRecord>>> {
        self.matches
            .get(&match_id)
            .map(|entry| entry.value().clone())
            .ok_or(Error::UnknownMatch(match_id))
    }
}

impl std::fmt::Debug for MatchBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchBook")
            .field("matches", &self.matches.len())
            .finish()
    }
}

fn require_status(record: &MatchRecord, required: MatchStatus) -> Result<()> {
    if record.status != required {
        return Err(Error::InvalidStateTransition {
            current: record.status,
            required,
        });
    }
    Ok(())
}
