//! Tournament registration orchestration
//!
//! Translates join intents into ledger debits plus registration rows. The
//! registration table has one writer lock; it is held across the duplicate
//! check, the ledger debit, and the row insert so two concurrent joins by
//! the same player cannot both pass the duplicate check.

use crate::config::Config;
use crate::groups::next_group;
use crate::notify::{LogNotifier, PartnerNotifier};
use crate::pickup::PickupBoard;
use crate::types::{
    Format, Level, PaymentScope, RegRole, RegStatus, Registration, Tournament, TournamentStatus,
};
use crate::{Error, Result};
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;
use wallet_ledger::{Player, Profile, TeamId, TxMode, WalletLedger};

/// Outcome status of a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStatus {
    /// All halves paid; slot exists
    Joined,
    /// Waiting for the partner's independent payment
    PendingPartner,
}

/// Result of a join request
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// Joined or waiting on the partner
    pub status: JoinStatus,

    /// The paying player, post-debit
    pub payer: Player,

    /// Rows created by this join
    pub registrations: Vec<Registration>,
}

/// Registration orchestrator. Owns Registration and PickupMatch lifecycle;
/// every money movement routes through the wallet ledger.
pub struct Orchestrator {
    ledger: Arc<WalletLedger>,
    notifier: Arc<dyn PartnerNotifier>,
    config: Config,
    tournaments: DashMap<String, Tournament>,
    registrations: Mutex<Vec<Registration>>,
    seq: AtomicU64,
    pickup: PickupBoard,
}

impl Orchestrator {
    /// Create an orchestrator over a shared ledger
    pub fn new(ledger: Arc<WalletLedger>, config: Config) -> Self {
        Self::with_notifier(ledger, config, Arc::new(LogNotifier))
    }

    /// Create with a custom partner notifier
    pub fn with_notifier(
        ledger: Arc<WalletLedger>,
        config: Config,
        notifier: Arc<dyn PartnerNotifier>,
    ) -> Self {
        Self {
            ledger,
            notifier,
            config,
            tournaments: DashMap::new(),
            registrations: Mutex::new(Vec::new()),
            seq: AtomicU64::new(0),
            pickup: PickupBoard::new(),
        }
    }

    /// The pickup-match board
    pub fn pickup(&self) -> &PickupBoard {
        &self.pickup
    }

    /// The shared wallet ledger
    pub fn ledger(&self) -> &Arc<WalletLedger> {
        &self.ledger
    }

    /// Orchestrator configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ---- tournaments (admin) ----

    /// Admin: create a tournament
    pub fn create_tournament(
        &self,
        name: &str,
        city: &str,
        sport: &str,
        format: Format,
        draw_size: u32,
        levels: Vec<Level>,
    ) -> Result<Tournament> {
        if self.tournaments.contains_key(name) {
            return Err(Error::DuplicateTournament(name.to_string()));
        }
        let tournament = Tournament {
            id: Uuid::now_v7(),
            name: name.to_string(),
            city: city.to_string(),
            sport: sport.to_string(),
            format,
            status: TournamentStatus::Open,
            draw_size,
            levels,
        };
        self.tournaments
            .insert(tournament.name.clone(), tournament.clone());
        tracing::info!(tournament = %name, "Tournament created");
        Ok(tournament)
    }

    /// Admin: edit tournament settings
    pub fn update_tournament(
        &self,
        name: &str,
        status: TournamentStatus,
        draw_size: u32,
        levels: Vec<Level>,
    ) -> Result<Tournament> {
        let mut entry = self
            .tournaments
            .get_mut(name)
            .ok_or_else(|| Error::UnknownTournament(name.to_string()))?;
        entry.status = status;
        entry.draw_size = draw_size;
        entry.levels = levels;
        Ok(entry.clone())
    }

    /// Admin: delete a tournament and cascade its registrations.
    /// Matches are cascaded by the caller, which owns the match book.
    pub fn delete_tournament(&self, name: &str) -> Result<Tournament> {
        let (_, tournament) = self
            .tournaments
            .remove(name)
            .ok_or_else(|| Error::UnknownTournament(name.to_string()))?;
        self.registrations
            .lock()
            .retain(|reg| reg.tournament != name);
        tracing::warn!(tournament = %name, "Tournament deleted, registrations cascaded");
        Ok(tournament)
    }

    /// Look up a tournament by name
    pub fn tournament(&self, name: &str) -> Result<Tournament> {
        self.tournaments
            .get(name)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::UnknownTournament(name.to_string()))
    }

    /// All tournaments
    pub fn tournaments(&self) -> Vec<Tournament> {
        self.tournaments.iter().map(|entry| entry.clone()).collect()
    }

    // ---- joining ----

    /// Join a tournament level.
    ///
    /// Singles, or doubles with team scope: the payer covers every share in
    /// one debit and all rows confirm immediately. Doubles with individual
    /// scope: the payer covers only their own share; the partner's row is
    /// created `PendingPartner` and no group slot exists until the partner
    /// independently pays via [`Orchestrator::confirm_partner`].
    pub fn join_tournament(
        &self,
        phone: &str,
        tournament_name: &str,
        level_name: &str,
        partner_team_id: Option<&TeamId>,
        scope: PaymentScope,
    ) -> Result<JoinOutcome> {
        let payer = self.ledger.player_by_phone(phone)?;
        let tournament = self.tournament(tournament_name)?;
        if tournament.status != TournamentStatus::Open {
            return Err(Error::InvalidState(format!(
                "Tournament {tournament_name} is not open for registration"
            )));
        }
        let level = tournament
            .level(level_name)
            .ok_or_else(|| Error::UnknownLevel {
                tournament: tournament_name.to_string(),
                level: level_name.to_string(),
            })?;

        let mut regs = self.registrations.lock();
        check_duplicate(&regs, &payer.team_id, tournament_name, level_name)?;
        check_capacity(&regs, &tournament, level_name)?;

        let outcome = match tournament.format {
            Format::Singles => {
                self.join_singles(&mut regs, &payer, &tournament, level)?
            }
            Format::Doubles => {
                let partner_id = partner_team_id.ok_or(Error::PartnerRequired)?;
                if partner_id == &payer.team_id {
                    return Err(Error::InvalidState(
                        "Cannot register yourself as your own partner".to_string(),
                    ));
                }
                let partner = self
                    .ledger
                    .player(partner_id)
                    .map_err(|_| Error::UnknownPartner(partner_id.clone()))?;
                check_duplicate(&regs, &partner.team_id, tournament_name, level_name)?;
                match scope {
                    PaymentScope::Team => {
                        self.join_doubles_team(&mut regs, &payer, &partner, &tournament, level)?
                    }
                    PaymentScope::Individual => {
                        self.join_doubles_split(&mut regs, &payer, &partner, &tournament, level)?
                    }
                }
            }
        };

        // Re-read the payer so the response reflects the debit
        let payer = self.ledger.player(&payer.team_id)?;
        Ok(JoinOutcome {
            status: outcome.0,
            payer,
            registrations: outcome.1,
        })
    }

    fn join_singles(
        &self,
        regs: &mut Vec<Registration>,
        payer: &Player,
        tournament: &Tournament,
        level: &Level,
    ) -> Result<(JoinStatus, Vec<Registration>)> {
        let group = next_group(
            &grouped_counts(regs, &tournament.name, &level.name),
            tournament.draw_size,
            self.config.group_size,
        )?;
        self.ledger.debit(
            &payer.team_id,
            level.fee,
            TxMode::EventFee,
            &format!("{} entry - {}", tournament.name, level.name),
        )?;

        let row = self.push_row(
            regs,
            &payer.team_id,
            tournament,
            level,
            Some(group),
            RegStatus::Confirmed,
            PaymentScope::Individual,
            RegRole::Captain,
            None,
        );
        Ok((JoinStatus::Joined, vec![row]))
    }

    fn join_doubles_team(
        &self,
        regs: &mut Vec<Registration>,
        payer: &Player,
        partner: &Player,
        tournament: &Tournament,
        level: &Level,
    ) -> Result<(JoinStatus, Vec<Registration>)> {
        let group = next_group(
            &grouped_counts(regs, &tournament.name, &level.name),
            tournament.draw_size,
            self.config.group_size,
        )?;
        // One payer covers both shares in a single debit
        self.ledger.debit(
            &payer.team_id,
            level.fee * 2,
            TxMode::EventFee,
            &format!("{} doubles entry (team) - {}", tournament.name, level.name),
        )?;

        let captain = self.push_row(
            regs,
            &payer.team_id,
            tournament,
            level,
            Some(group.clone()),
            RegStatus::Confirmed,
            PaymentScope::Team,
            RegRole::Captain,
            Some(partner.team_id.clone()),
        );
        let mirror = self.push_row(
            regs,
            &partner.team_id,
            tournament,
            level,
            Some(group),
            RegStatus::Confirmed,
            PaymentScope::Team,
            RegRole::Partner,
            Some(payer.team_id.clone()),
        );
        Ok((JoinStatus::Joined, vec![captain, mirror]))
    }

    fn join_doubles_split(
        &self,
        regs: &mut Vec<Registration>,
        payer: &Player,
        partner: &Player,
        tournament: &Tournament,
        level: &Level,
    ) -> Result<(JoinStatus, Vec<Registration>)> {
        // Payer covers only their own share. No group until both halves pay.
        self.ledger.debit(
            &payer.team_id,
            level.fee,
            TxMode::EventFee,
            &format!("{} doubles entry (own share) - {}", tournament.name, level.name),
        )?;

        let captain = self.push_row(
            regs,
            &payer.team_id,
            tournament,
            level,
            None,
            RegStatus::Confirmed,
            PaymentScope::Individual,
            RegRole::Captain,
            Some(partner.team_id.clone()),
        );
        let pending = self.push_row(
            regs,
            &partner.team_id,
            tournament,
            level,
            None,
            RegStatus::PendingPartner,
            PaymentScope::Individual,
            RegRole::Partner,
            Some(payer.team_id.clone()),
        );

        self.notifier.partner_pending(
            &partner.team_id,
            &payer.team_id,
            &tournament.name,
            pending.id,
        );
        Ok((JoinStatus::PendingPartner, vec![captain, pending]))
    }

    /// The partner of a split-payment doubles entry pays their own share.
    ///
    /// Debits the partner independently, confirms their row, and assigns
    /// the pair's group - the pair's slot exists only from this point.
    /// The system tolerates `PendingPartner` indefinitely; there is no
    /// timeout and the partner may never confirm.
    pub fn confirm_partner(&self, reg_id: Uuid) -> Result<Registration> {
        let mut regs = self.registrations.lock();

        let index = regs
            .iter()
            .position(|reg| reg.id == reg_id)
            .ok_or(Error::RegistrationNotFound(reg_id))?;
        if regs[index].status != RegStatus::PendingPartner {
            return Err(Error::InvalidState(format!(
                "Registration {reg_id} is not awaiting partner payment"
            )));
        }

        let tournament = self.tournament(&regs[index].tournament)?;
        let level = tournament
            .level(&regs[index].level)
            .ok_or_else(|| Error::UnknownLevel {
                tournament: tournament.name.clone(),
                level: regs[index].level.clone(),
            })?;

        self.ledger.debit(
            &regs[index].team_id,
            level.fee,
            TxMode::EventFee,
            &format!("{} doubles entry (own share) - {}", tournament.name, level.name),
        )?;

        let group = next_group(
            &grouped_counts(&regs, &tournament.name, &level.name),
            tournament.draw_size,
            self.config.group_size,
        )?;

        regs[index].status = RegStatus::Confirmed;
        regs[index].group = Some(group.clone());
        let confirmed = regs[index].clone();

        // Mirror the group onto the captain half of the pair
        if let Some(captain_team) = confirmed.partner.clone() {
            if let Some(captain) = regs.iter_mut().find(|reg| {
                reg.team_id == captain_team
                    && reg.tournament == confirmed.tournament
                    && reg.level == confirmed.level
                    && reg.role == RegRole::Captain
            }) {
                captain.group = Some(group);
            }
        }

        tracing::info!(reg_id = %reg_id, team = %confirmed.team_id, "Partner confirmed, pair slot created");
        Ok(confirmed)
    }

    /// Admin: register a player without a fee debit, creating the player on
    /// the fly when the phone is unknown.
    pub fn manual_register(
        &self,
        name: &str,
        phone: &str,
        tournament_name: &str,
        level_name: &str,
    ) -> Result<(Player, Registration)> {
        let tournament = self.tournament(tournament_name)?;
        let level = tournament
            .level(level_name)
            .ok_or_else(|| Error::UnknownLevel {
                tournament: tournament_name.to_string(),
                level: level_name.to_string(),
            })?;

        let player = match self.ledger.player_by_phone(phone) {
            Ok(player) => player,
            Err(_) => self.ledger.register_player(name, phone, Profile::default())?,
        };

        let mut regs = self.registrations.lock();
        check_duplicate(&regs, &player.team_id, tournament_name, level_name)?;
        check_capacity(&regs, &tournament, level_name)?;
        let group = next_group(
            &grouped_counts(&regs, tournament_name, level_name),
            tournament.draw_size,
            self.config.group_size,
        )?;

        let row = self.push_row(
            &mut regs,
            &player.team_id,
            &tournament,
            level,
            Some(group),
            RegStatus::Confirmed,
            PaymentScope::Individual,
            RegRole::Captain,
            None,
        );
        Ok((player, row))
    }

    // ---- reads ----

    /// All registrations for a player
    pub fn registrations_for(&self, team_id: &TeamId) -> Vec<Registration> {
        self.registrations
            .lock()
            .iter()
            .filter(|reg| &reg.team_id == team_id)
            .cloned()
            .collect()
    }

    /// Slot-holding (captain) confirmed entries for a tournament level -
    /// the entrant set the standings aggregator ranks over
    pub fn entrants(&self, tournament: &str, level: Option<&str>) -> Vec<Registration> {
        self.registrations
            .lock()
            .iter()
            .filter(|reg| {
                reg.tournament == tournament
                    && reg.status == RegStatus::Confirmed
                    && reg.role == RegRole::Captain
                    && reg.group.is_some()
                    && level.map_or(true, |l| reg.level == l)
            })
            .cloned()
            .collect()
    }

    /// All registrations for a tournament (admin view)
    pub fn tournament_registrations(&self, tournament: &str) -> Vec<Registration> {
        self.registrations
            .lock()
            .iter()
            .filter(|reg| reg.tournament == tournament)
            .cloned()
            .collect()
    }

    // ---- internal ----

    #[allow(clippy::too_many_arguments)]
    fn push_row(
        &self,
        regs: &mut Vec<Registration>,
        team_id: &TeamId,
        tournament: &Tournament,
        level: &Level,
        group: Option<String>,
        status: RegStatus,
        payment_scope: PaymentScope,
        role: RegRole,
        partner: Option<TeamId>,
    ) -> Registration {
        let row = Registration {
            id: Uuid::now_v7(),
            team_id: team_id.clone(),
            tournament: tournament.name.clone(),
            level: level.name.clone(),
            group,
            status,
            payment_scope,
            role,
            partner,
            seq: self.seq.fetch_add(1, Ordering::SeqCst),
            created_at: Utc::now(),
        };
        regs.push(row.clone());
        row
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("tournaments", &self.tournaments.len())
            .field("registrations", &self.registrations.lock().len())
            .finish()
    }
}

fn check_duplicate(
    regs: &[Registration],
    team_id: &TeamId,
    tournament: &str,
    level: &str,
) -> Result<()> {
    let held = regs.iter().any(|reg| {
        &reg.team_id == team_id && reg.tournament == tournament && reg.level == level
    });
    if held {
        return Err(Error::DuplicateRegistration {
            tournament: tournament.to_string(),
            level: level.to_string(),
        });
    }
    Ok(())
}

/// Capacity counts slot holders: confirmed captain rows, grouped or not
/// (a split-payment payer holds the pair's slot while the partner pays).
fn check_capacity(regs: &[Registration], tournament: &Tournament, level: &str) -> Result<()> {
    let captains = regs
        .iter()
        .filter(|reg| {
            reg.tournament == tournament.name
                && reg.level == level
                && reg.role == RegRole::Captain
                && reg.status == RegStatus::Confirmed
        })
        .count() as u32;
    if captains >= tournament.draw_size {
        return Err(Error::TournamentFull {
            draw_size: tournament.draw_size,
        });
    }
    Ok(())
}

/// Per-group counts of slot-holding entries that already have a group
fn grouped_counts(regs: &[Registration], tournament: &str, level: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for reg in regs {
        if reg.tournament == tournament
            && reg.level == level
            && reg.role == RegRole::Captain
            && reg.status == RegStatus::Confirmed
        {
            if let Some(ref group) = reg.group {
                *counts.entry(group.clone()).or_insert(0) += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Orchestrator, Player, Player) {
        let ledger = Arc::new(WalletLedger::new());
        let payer = ledger
            .register_player("Asha", "9000000001", Profile::default())
            .unwrap();
        let partner = ledger
            .register_player("Bala", "9000000002", Profile::default())
            .unwrap();
        ledger
            .credit(&payer.team_id, 200_000, TxMode::WalletTopup, "seed")
            .unwrap();
        ledger
            .credit(&partner.team_id, 200_000, TxMode::WalletTopup, "seed")
            .unwrap();
        (Orchestrator::new(ledger, Config::default()), payer, partner)
    }

    fn level(fee: i64) -> Level {
        Level {
            name: "Beginner".to_string(),
            fee,
            prize_1: 0,
            prize_2: 0,
            prize_3: 0,
            per_match_prize: 0,
        }
    }

    fn singles_tournament(orch: &Orchestrator, draw_size: u32) {
        orch.create_tournament(
            "Summer Open",
            "Mumbai",
            "Padel",
            Format::Singles,
            draw_size,
            vec![level(50_000)],
        )
        .unwrap();
    }

    fn doubles_tournament(orch: &Orchestrator) {
        orch.create_tournament(
            "Doubles Cup",
            "Mumbai",
            "Padel",
            Format::Doubles,
            16,
            vec![level(50_000)],
        )
        .unwrap();
    }

    #[test]
    fn test_singles_join_debits_and_groups() {
        let (orch, payer, _) = fixture();
        singles_tournament(&orch, 16);

        let outcome = orch
            .join_tournament(&payer.phone, "Summer Open", "Beginner", None, PaymentScope::Individual)
            .unwrap();
        assert_eq!(outcome.status, JoinStatus::Joined);
        assert_eq!(outcome.registrations.len(), 1);
        assert_eq!(outcome.registrations[0].group.as_deref(), Some("A"));
        assert_eq!(orch.ledger().balance_of(&payer.team_id).unwrap(), 150_000);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let (orch, payer, _) = fixture();
        singles_tournament(&orch, 16);
        orch.join_tournament(&payer.phone, "Summer Open", "Beginner", None, PaymentScope::Individual)
            .unwrap();

        let err = orch
            .join_tournament(&payer.phone, "Summer Open", "Beginner", None, PaymentScope::Individual)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRegistration { .. }));
        // No second debit happened
        assert_eq!(orch.ledger().balance_of(&payer.team_id).unwrap(), 150_000);
    }

    #[test]
    fn test_insufficient_funds_leaves_no_row() {
        let (orch, _, _) = fixture();
        singles_tournament(&orch, 16);
        let broke = orch
            .ledger()
            .register_player("Cena", "9000000003", Profile::default())
            .unwrap();

        let err = orch
            .join_tournament(&broke.phone, "Summer Open", "Beginner", None, PaymentScope::Individual)
            .unwrap_err();
        assert!(matches!(err, Error::Ledger(wallet_ledger::Error::InsufficientFunds { .. })));
        assert!(orch.registrations_for(&broke.team_id).is_empty());
    }

    #[test]
    fn test_doubles_team_scope_single_double_debit() {
        let (orch, payer, partner) = fixture();
        doubles_tournament(&orch);

        let outcome = orch
            .join_tournament(
                &payer.phone,
                "Doubles Cup",
                "Beginner",
                Some(&partner.team_id),
                PaymentScope::Team,
            )
            .unwrap();
        assert_eq!(outcome.status, JoinStatus::Joined);
        // Payer covered both shares; partner untouched
        assert_eq!(orch.ledger().balance_of(&payer.team_id).unwrap(), 100_000);
        assert_eq!(orch.ledger().balance_of(&partner.team_id).unwrap(), 200_000);
        // Both rows share one group
        assert_eq!(outcome.registrations[0].group, outcome.registrations[1].group);
        assert!(outcome.registrations[0].group.is_some());
    }

    #[test]
    fn test_doubles_split_two_independent_debits() {
        let (orch, payer, partner) = fixture();
        doubles_tournament(&orch);

        let outcome = orch
            .join_tournament(
                &payer.phone,
                "Doubles Cup",
                "Beginner",
                Some(&partner.team_id),
                PaymentScope::Individual,
            )
            .unwrap();
        assert_eq!(outcome.status, JoinStatus::PendingPartner);
        // Payer paid ₹500 own share only - never one debit of ₹1000
        assert_eq!(orch.ledger().balance_of(&payer.team_id).unwrap(), 150_000);
        assert_eq!(orch.ledger().balance_of(&partner.team_id).unwrap(), 200_000);

        // No group slot exists while a half is pending
        assert!(outcome.registrations.iter().all(|reg| reg.group.is_none()));
        assert!(orch.entrants("Doubles Cup", Some("Beginner")).is_empty());

        let pending = outcome
            .registrations
            .iter()
            .find(|reg| reg.status == RegStatus::PendingPartner)
            .unwrap();
        let confirmed = orch.confirm_partner(pending.id).unwrap();
        assert_eq!(confirmed.status, RegStatus::Confirmed);
        assert!(confirmed.group.is_some());
        // Partner paid their own ₹500 independently
        assert_eq!(orch.ledger().balance_of(&partner.team_id).unwrap(), 150_000);

        // Captain half mirrored the group; the pair is now one entrant
        let entrants = orch.entrants("Doubles Cup", Some("Beginner"));
        assert_eq!(entrants.len(), 1);
        assert_eq!(entrants[0].group, confirmed.group);

        // Confirming twice cannot double-debit
        assert!(orch.confirm_partner(pending.id).is_err());
        assert_eq!(orch.ledger().balance_of(&partner.team_id).unwrap(), 150_000);
    }

    #[test]
    fn test_unknown_partner_rejected() {
        let (orch, payer, _) = fixture();
        doubles_tournament(&orch);

        let err = orch
            .join_tournament(
                &payer.phone,
                "Doubles Cup",
                "Beginner",
                Some(&TeamId::new("ZZ99")),
                PaymentScope::Individual,
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPartner(_)));
    }

    #[test]
    fn test_draw_capacity_enforced() {
        let (orch, _, _) = fixture();
        singles_tournament(&orch, 2);

        for i in 0..2 {
            let p = orch
                .ledger()
                .register_player(&format!("Player{i}"), &format!("90000001{i:02}"), Profile::default())
                .unwrap();
            orch.ledger()
                .credit(&p.team_id, 100_000, TxMode::WalletTopup, "seed")
                .unwrap();
            orch.join_tournament(&p.phone, "Summer Open", "Beginner", None, PaymentScope::Individual)
                .unwrap();
        }

        let late = orch
            .ledger()
            .register_player("Late", "9000000199", Profile::default())
            .unwrap();
        orch.ledger()
            .credit(&late.team_id, 100_000, TxMode::WalletTopup, "seed")
            .unwrap();
        let err = orch
            .join_tournament(&late.phone, "Summer Open", "Beginner", None, PaymentScope::Individual)
            .unwrap_err();
        assert!(matches!(err, Error::TournamentFull { draw_size: 2 }));
    }

    #[test]
    fn test_manual_register_creates_player_without_debit() {
        let (orch, _, _) = fixture();
        singles_tournament(&orch, 16);

        let (player, row) = orch
            .manual_register("Walkin", "9000000777", "Summer Open", "Beginner")
            .unwrap();
        assert_eq!(row.status, RegStatus::Confirmed);
        assert!(row.group.is_some());
        assert_eq!(orch.ledger().balance_of(&player.team_id).unwrap(), 0);
    }

    #[test]
    fn test_delete_tournament_cascades_registrations() {
        let (orch, payer, _) = fixture();
        singles_tournament(&orch, 16);
        orch.join_tournament(&payer.phone, "Summer Open", "Beginner", None, PaymentScope::Individual)
            .unwrap();

        orch.delete_tournament("Summer Open").unwrap();
        assert!(orch.registrations_for(&payer.team_id).is_empty());
        assert!(orch.tournament("Summer Open").is_err());
        // No refund: cancellation money handling is manual admin action
        assert_eq!(orch.ledger().balance_of(&payer.team_id).unwrap(), 150_000);
    }
}
