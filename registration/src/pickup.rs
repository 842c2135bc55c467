//! Pickup-match board
//!
//! Open-play matches hosted by a player. The host pays a flat platform fee
//! up front (non-refundable, even if nobody joins) and plays outside the
//! slot count; joiners each pay an equal share of the court cost. One lock
//! per match serializes the join/invite/approve races.

use crate::types::{JoinMode, PickupMatch, PickupPlayer, PickupSpec, PickupStatus, SlotStatus};
use crate::{Error, Result};
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;
use wallet_ledger::{Amount, TeamId, TxMode, WalletLedger};

/// In-memory board of pickup matches
#[derive(Default)]
pub struct PickupBoard {
    matches: DashMap<Uuid, Arc<Mutex<PickupMatch>>>,
}

impl PickupBoard {
    /// Empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Host a new pickup match. The spec is validated before any money
    /// moves; the flat platform fee is debited before the match exists, and
    /// a failed debit creates nothing.
    pub fn host(
        &self,
        ledger: &WalletLedger,
        host_phone: &str,
        spec: PickupSpec,
        platform_fee: Amount,
    ) -> Result<PickupMatch> {
        if spec.total_slots == 0 {
            return Err(Error::InvalidPickupSpec(
                "total_slots must be at least 1".to_string(),
            ));
        }
        if spec.total_cost < 0 {
            return Err(Error::InvalidPickupSpec(format!(
                "negative total_cost: {}",
                spec.total_cost
            )));
        }

        let host = ledger.player_by_phone(host_phone)?;
        ledger.debit(
            &host.team_id,
            platform_fee,
            TxMode::EventFee,
            &format!("Pickup hosting fee - {}", spec.venue),
        )?;

        let m = PickupMatch {
            id: Uuid::now_v7(),
            host: host.team_id,
            sport: spec.sport,
            venue: spec.venue,
            date: spec.date,
            time: spec.time,
            total_slots: spec.total_slots,
            total_cost: spec.total_cost,
            join_mode: spec.join_mode,
            status: PickupStatus::Open,
            description: spec.description,
            players: Vec::new(),
            created_at: Utc::now(),
        };
        self.matches.insert(m.id, Arc::new(Mutex::new(m.clone())));
        tracing::info!(match_id = %m.id, host = %m.host, "Pickup match hosted");
        Ok(m)
    }

    /// Join a pickup match.
    ///
    /// Open mode debits the per-slot share and confirms immediately; request
    /// mode records the request without money movement until the host
    /// approves. An invited player joining accepts the invite (debit +
    /// confirm) regardless of mode; an invite holds no confirmed slot, so it
    /// lapses once the match fills or completes.
    pub fn join(&self, ledger: &WalletLedger, match_id: Uuid, phone: &str) -> Result<PickupMatch> {
        let player = ledger.player_by_phone(phone)?;
        let entry = self.entry(match_id)?;
        let mut m = entry.lock();

        if m.host == player.team_id {
            return Err(Error::AlreadyJoined(player.team_id));
        }
        match m.slot_of(&player.team_id) {
            Some(SlotStatus::Confirmed) => return Err(Error::AlreadyJoined(player.team_id)),
            Some(SlotStatus::Requested) => return Err(Error::AlreadyInvited(player.team_id)),
            _ => {}
        }
        match m.status {
            PickupStatus::Full => return Err(Error::SlotsFull),
            PickupStatus::Completed => {
                return Err(Error::InvalidState(format!(
                    "Pickup match {match_id} is completed"
                )))
            }
            PickupStatus::Open => {}
        }

        if m.slot_of(&player.team_id) == Some(SlotStatus::Invited) {
            // Accepting an invite pays the share right away
            ledger.debit(
                &player.team_id,
                m.cost_per_slot(),
                TxMode::EventFee,
                &format!("Pickup match - {}", m.venue),
            )?;
            set_slot(&mut m, &player.team_id, SlotStatus::Confirmed);
        } else {
            match m.join_mode {
                JoinMode::Open => {
                    ledger.debit(
                        &player.team_id,
                        m.cost_per_slot(),
                        TxMode::EventFee,
                        &format!("Pickup match - {}", m.venue),
                    )?;
                    m.players.push(PickupPlayer {
                        team_id: player.team_id.clone(),
                        status: SlotStatus::Confirmed,
                    });
                }
                JoinMode::Request => {
                    m.players.push(PickupPlayer {
                        team_id: player.team_id.clone(),
                        status: SlotStatus::Requested,
                    });
                }
            }
        }

        refresh_status(&mut m);
        Ok(m.clone())
    }

    /// Host invites a player. No money moves until the invite is accepted.
    pub fn invite(
        &self,
        ledger: &WalletLedger,
        match_id: Uuid,
        host_phone: &str,
        target: &TeamId,
    ) -> Result<PickupMatch> {
        let host = ledger.player_by_phone(host_phone)?;
        // Target must exist before a slot is held for them
        let target = ledger.player(target)?;

        let entry = self.entry(match_id)?;
        let mut m = entry.lock();
        require_host(&m, &host.team_id)?;
        if m.status == PickupStatus::Completed {
            return Err(Error::InvalidState(format!(
                "Pickup match {match_id} is completed"
            )));
        }
        match m.slot_of(&target.team_id) {
            Some(SlotStatus::Confirmed) => return Err(Error::AlreadyJoined(target.team_id)),
            Some(_) => return Err(Error::AlreadyInvited(target.team_id)),
            None => {}
        }

        m.players.push(PickupPlayer {
            team_id: target.team_id.clone(),
            status: SlotStatus::Invited,
        });
        tracing::info!(match_id = %match_id, target = %target.team_id, "Player invited to pickup match");
        Ok(m.clone())
    }

    /// Host approves a pending join request: the requester is debited their
    /// share and confirmed.
    pub fn approve_request(
        &self,
        ledger: &WalletLedger,
        match_id: Uuid,
        host_phone: &str,
        target: &TeamId,
    ) -> Result<PickupMatch> {
        let host = ledger.player_by_phone(host_phone)?;
        let entry = self.entry(match_id)?;
        let mut m = entry.lock();
        require_host(&m, &host.team_id)?;
        match m.status {
            PickupStatus::Full => return Err(Error::SlotsFull),
            PickupStatus::Completed => {
                return Err(Error::InvalidState(format!(
                    "Pickup match {match_id} is completed"
                )))
            }
            PickupStatus::Open => {}
        }
        if m.slot_of(target) != Some(SlotStatus::Requested) {
            return Err(Error::InvalidState(format!(
                "{target} has no pending request on this match"
            )));
        }

        ledger.debit(
            target,
            m.cost_per_slot(),
            TxMode::EventFee,
            &format!("Pickup match - {}", m.venue),
        )?;
        set_slot(&mut m, target, SlotStatus::Confirmed);
        refresh_status(&mut m);
        Ok(m.clone())
    }

    /// Host closes the match after play. Unaccepted invites and requests
    /// lapse; no money moves.
    pub fn complete(
        &self,
        ledger: &WalletLedger,
        match_id: Uuid,
        host_phone: &str,
    ) -> Result<PickupMatch> {
        let host = ledger.player_by_phone(host_phone)?;
        let entry = self.entry(match_id)?;
        let mut m = entry.lock();
        require_host(&m, &host.team_id)?;
        if m.status == PickupStatus::Completed {
            return Err(Error::InvalidState(format!(
                "Pickup match {match_id} is already completed"
            )));
        }
        m.status = PickupStatus::Completed;
        tracing::info!(match_id = %match_id, "Pickup match completed");
        Ok(m.clone())
    }

    /// One match, by ID
    pub fn details(&self, match_id: Uuid) -> Result<PickupMatch> {
        Ok(self.entry(match_id)?.lock().clone())
    }

    /// Matches still accepting players, oldest first
    pub fn open_matches(&self) -> Vec<PickupMatch> {
        let mut out: Vec<PickupMatch> = self
            .matches
            .iter()
            .map(|entry| entry.lock().clone())
            .filter(|m| m.status == PickupStatus::Open)
            .collect();
        out.sort_by_key(|m| m.id);
        out
    }

    /// Matches hosted by a player
    pub fn hosted_by(&self, team_id: &TeamId) -> Vec<PickupMatch> {
        let mut out: Vec<PickupMatch> = self
            .matches
            .iter()
            .map(|entry| entry.lock().clone())
            .filter(|m| &m.host == team_id)
            .collect();
        out.sort_by_key(|m| m.id);
        out
    }

    /// Matches a player holds any slot on
    pub fn joined_by(&self, team_id: &TeamId) -> Vec<PickupMatch> {
        let mut out: Vec<PickupMatch> = self
            .matches
            .iter()
            .map(|entry| entry.lock().clone())
            .filter(|m| m.slot_of(team_id).is_some())
            .collect();
        out.sort_by_key(|m| m.id);
        out
    }

    fn entry(&self, match_id: Uuid) -> Result<Arc<Mutex<PickupMatch>>> {
        self.matches
            .get(&match_id)
            .map(|entry| Arc::clone(&entry))
            .ok_or(Error::UnknownPickupMatch(match_id))
    }
}

impl std::fmt::Debug for PickupBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickupBoard")
            .field("matches", &self.matches.len())
            .finish()
    }
}

fn require_host(m: &PickupMatch, team_id: &TeamId) -> Result<()> {
    if &m.host != team_id {
        return Err(Error::NotHost(team_id.clone()));
    }
    Ok(())
}

fn set_slot(m: &mut PickupMatch, team_id: &TeamId, status: SlotStatus) {
    if let Some(slot) = m.players.iter_mut().find(|p| &p.team_id == team_id) {
        slot.status = status;
    }
}

fn refresh_status(m: &mut PickupMatch) {
    if m.status == PickupStatus::Open && m.confirmed_count() >= m.total_slots {
        m.status = PickupStatus::Full;
        tracing::info!(match_id = %m.id, "Pickup match full");
    }
}
