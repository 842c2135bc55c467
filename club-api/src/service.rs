//! The `ClubApi` facade
//!
//! One method per endpoint, wiring the ledger, orchestrator, match book,
//! aggregator, and gateway together. The gateway is the only collaborator
//! with real network latency; its calls are awaited with no ledger lock
//! held. Everything else completes synchronously.

use crate::config::ApiConfig;
use crate::types::{
    CreateOrderResponse, JoinTournamentRequest, JoinTournamentResponse, SubmitScoreRequest,
    TransactionsResponse, UserView, VerifyPaymentRequest, VerifyPaymentResponse,
    VerifyScoreRequest, WithdrawRequest,
};
use crate::{Error, Result};
use dashmap::{DashMap, DashSet};
use match_consensus::{MatchBook, MatchRecord, MatchSpec};
use payment_gateway::{PaymentCallback, PaymentGateway};
use registration::{
    Format, Level, Orchestrator, PickupMatch, PickupSpec, Registration, Tournament,
    TournamentStatus,
};
use standings::{compute_standings, Entrant, StandingsRow};
use std::sync::Arc;
use uuid::Uuid;
use wallet_ledger::{Amount, Player, Profile, TeamId, TxFilter, TxMode, WalletLedger};

/// Service facade over all club components
pub struct ClubApi {
    ledger: Arc<WalletLedger>,
    orchestrator: Orchestrator,
    matches: MatchBook,
    gateway: Arc<dyn PaymentGateway>,
    config: ApiConfig,

    /// Minted top-up orders and their amounts; credits never trust client
    /// amounts
    orders: DashMap<String, Amount>,

    /// Payment IDs already credited, so a replayed callback cannot credit
    /// twice
    settled_payments: DashSet<String>,
}

impl ClubApi {
    /// Wire up the service against a payment gateway implementation
    pub fn new(config: ApiConfig, gateway: Arc<dyn PaymentGateway>) -> Self {
        let ledger = Arc::new(WalletLedger::new());
        let orchestrator = Orchestrator::new(Arc::clone(&ledger), config.registration.clone());
        Self {
            ledger,
            orchestrator,
            matches: MatchBook::new(),
            gateway,
            config,
            orders: DashMap::new(),
            settled_payments: DashSet::new(),
        }
    }

    /// The underlying ledger, for admin tooling and tests
    pub fn ledger(&self) -> &Arc<WalletLedger> {
        &self.ledger
    }

    // ---- users ----

    /// Register a new player
    pub fn register_user(&self, name: &str, phone: &str, profile: Profile) -> Result<Player> {
        Ok(self.ledger.register_player(name, phone, profile)?)
    }

    /// A player with their balance and registrations
    pub fn user(&self, team_id: &str) -> Result<UserView> {
        let team_id = TeamId::new(team_id);
        let player = self.ledger.player(&team_id)?;
        self.user_view(player)
    }

    /// Login-style lookup by phone
    pub fn user_by_phone(&self, phone: &str) -> Result<UserView> {
        let player = self.ledger.player_by_phone(phone)?;
        self.user_view(player)
    }

    /// All players (admin directory)
    pub fn users(&self) -> Vec<Player> {
        self.ledger.players()
    }

    /// Admin: freeze a player's wallet
    pub fn deactivate_user(&self, team_id: &str) -> Result<()> {
        Ok(self.ledger.deactivate_player(&TeamId::new(team_id))?)
    }

    /// A player's filtered transaction history with their balance
    pub fn transactions(&self, team_id: &str, filter: &TxFilter) -> Result<TransactionsResponse> {
        let team_id = TeamId::new(team_id);
        Ok(TransactionsResponse {
            balance: self.ledger.balance_of(&team_id)?,
            transactions: self.ledger.transactions(&team_id, filter)?,
        })
    }

    fn user_view(&self, player: Player) -> Result<UserView> {
        let balance = self.ledger.balance_of(&player.team_id)?;
        let registrations = self.orchestrator.registrations_for(&player.team_id);
        Ok(UserView {
            player,
            balance,
            registrations,
        })
    }

    // ---- top-ups (gateway boundary) ----

    /// Mint an external top-up order. Awaited with no ledger lock held. The
    /// order's amount is recorded server-side for the later credit.
    pub async fn create_order(&self, amount: Amount) -> Result<CreateOrderResponse> {
        let order = self.gateway.create_order(amount).await?;
        self.orders.insert(order.order_id.clone(), order.amount);
        Ok(CreateOrderResponse {
            order_id: order.order_id,
            key: order.key_id,
            amount: order.amount,
            currency: order.currency,
        })
    }

    /// Verify a checkout callback and credit the wallet.
    ///
    /// The signature check happens before any ledger access; a mismatch
    /// returns `PaymentVerificationFailed` and never credits. The credited
    /// amount is the order's minted amount, and each payment ID credits at
    /// most once, so a replayed callback cannot double-credit.
    pub fn verify_payment(&self, req: &VerifyPaymentRequest) -> Result<VerifyPaymentResponse> {
        let amount = self
            .orders
            .get(&req.order_id)
            .map(|entry| *entry)
            .ok_or_else(|| Error::UnknownOrder(req.order_id.clone()))?;

        let callback = PaymentCallback {
            order_id: req.order_id.clone(),
            payment_id: req.payment_id.clone(),
            signature: req.signature.clone(),
        };
        if let Err(e) = self.gateway.verify(&callback) {
            tracing::error!(order_id = %req.order_id, team_id = %req.team_id, "Payment verification failed");
            return Err(Error::Gateway(e));
        }

        // Claim the payment ID before touching the ledger; a concurrent
        // replay loses here and credits nothing
        if !self.settled_payments.insert(req.payment_id.clone()) {
            return Err(Error::DuplicatePayment(req.payment_id.clone()));
        }

        let team_id = TeamId::new(&req.team_id);
        if let Err(e) = self.ledger.credit(
            &team_id,
            amount,
            TxMode::WalletTopup,
            &format!("Wallet top-up via order {}", req.order_id),
        ) {
            // Nothing was credited; release the claim so a corrected
            // request can still settle this payment
            self.settled_payments.remove(&req.payment_id);
            return Err(e.into());
        }
        Ok(VerifyPaymentResponse {
            new_balance: self.ledger.balance_of(&team_id)?,
        })
    }

    // ---- withdrawals ----

    /// Reserve a withdrawal; funds leave the spendable balance immediately
    /// and stay reserved until an admin confirms or rejects.
    pub fn withdraw(&self, req: &WithdrawRequest) -> Result<Uuid> {
        Ok(self.ledger.reserve_withdrawal(
            &TeamId::new(&req.team_id),
            req.amount,
            &req.bank_details,
        )?)
    }

    /// Admin: mark a reserved withdrawal as paid out
    pub fn confirm_withdrawal(&self, tx_id: Uuid) -> Result<()> {
        Ok(self.ledger.confirm_withdrawal(tx_id)?)
    }

    /// Admin: reject a reserved withdrawal, restoring the balance
    pub fn reject_withdrawal(&self, tx_id: Uuid) -> Result<()> {
        Ok(self.ledger.reject_withdrawal(tx_id)?)
    }

    // ---- tournaments ----

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
        Ok(self
            .orchestrator
            .create_tournament(name, city, sport, format, draw_size, levels)?)
    }

    /// Admin: edit a tournament
    pub fn update_tournament(
        &self,
        name: &str,
        status: TournamentStatus,
        draw_size: u32,
        levels: Vec<Level>,
    ) -> Result<Tournament> {
        Ok(self
            .orchestrator
            .update_tournament(name, status, draw_size, levels)?)
    }

    /// Admin: delete a tournament, cascading its registrations and matches
    pub fn delete_tournament(&self, name: &str) -> Result<Tournament> {
        let tournament = self.orchestrator.delete_tournament(name)?;
        for record in self.matches.matches_for(name, None, None) {
            self.matches.delete_match(record.id)?;
        }
        Ok(tournament)
    }

    /// All tournaments
    pub fn tournaments(&self) -> Vec<Tournament> {
        self.orchestrator.tournaments()
    }

    /// One tournament with its registrations (admin view)
    pub fn tournament_registrations(&self, name: &str) -> Result<Vec<Registration>> {
        self.orchestrator.tournament(name)?;
        Ok(self.orchestrator.tournament_registrations(name))
    }

    /// Join a tournament level
    pub fn join_tournament(&self, req: &JoinTournamentRequest) -> Result<JoinTournamentResponse> {
        let partner = req.partner_team_id.as_deref().map(TeamId::new);
        let outcome = self.orchestrator.join_tournament(
            &req.phone,
            &req.tournament,
            &req.level,
            partner.as_ref(),
            req.payment_scope,
        )?;
        let user = self.user_view(outcome.payer)?;
        Ok(JoinTournamentResponse {
            status: outcome.status,
            user,
            registrations: outcome.registrations,
        })
    }

    /// Partner pays their own share of a split doubles entry
    pub fn confirm_partner(&self, reg_id: Uuid) -> Result<Registration> {
        Ok(self.orchestrator.confirm_partner(reg_id)?)
    }

    /// Admin: register a player without a debit
    pub fn manual_register(
        &self,
        name: &str,
        phone: &str,
        tournament: &str,
        level: &str,
    ) -> Result<(Player, Registration)> {
        Ok(self
            .orchestrator
            .manual_register(name, phone, tournament, level)?)
    }

    // ---- pickup matches ----

    /// Host a pickup match; debits the platform fee
    pub fn host_pickup(&self, host_phone: &str, spec: PickupSpec) -> Result<PickupMatch> {
        Ok(self.orchestrator.pickup().host(
            &self.ledger,
            host_phone,
            spec,
            self.config.registration.platform_fee,
        )?)
    }

    /// Join (or accept an invite to) a pickup match
    pub fn join_pickup(&self, match_id: Uuid, phone: &str) -> Result<PickupMatch> {
        Ok(self.orchestrator.pickup().join(&self.ledger, match_id, phone)?)
    }

    /// Host invites a player by team ID
    pub fn invite_to_pickup(
        &self,
        match_id: Uuid,
        host_phone: &str,
        target: &str,
    ) -> Result<PickupMatch> {
        Ok(self.orchestrator.pickup().invite(
            &self.ledger,
            match_id,
            host_phone,
            &TeamId::new(target),
        )?)
    }

    /// Host approves a pending join request
    pub fn approve_pickup_request(
        &self,
        match_id: Uuid,
        host_phone: &str,
        target: &str,
    ) -> Result<PickupMatch> {
        Ok(self.orchestrator.pickup().approve_request(
            &self.ledger,
            match_id,
            host_phone,
            &TeamId::new(target),
        )?)
    }

    /// Host closes a pickup match after play
    pub fn complete_pickup(&self, match_id: Uuid, host_phone: &str) -> Result<PickupMatch> {
        Ok(self
            .orchestrator
            .pickup()
            .complete(&self.ledger, match_id, host_phone)?)
    }

    /// One pickup match
    pub fn pickup_details(&self, match_id: Uuid) -> Result<PickupMatch> {
        Ok(self.orchestrator.pickup().details(match_id)?)
    }

    /// Pickup matches still accepting players
    pub fn open_pickups(&self) -> Vec<PickupMatch> {
        self.orchestrator.pickup().open_matches()
    }

    /// Pickup matches hosted by a player
    pub fn my_hosted_pickups(&self, team_id: &str) -> Vec<PickupMatch> {
        self.orchestrator.pickup().hosted_by(&TeamId::new(team_id))
    }

    // ---- tournament matches ----

    /// Admin/scheduler: create a tournament match
    pub fn create_match(&self, spec: MatchSpec) -> MatchRecord {
        self.matches.create_match(spec)
    }

    /// One side submits a score
    pub fn submit_score(&self, req: &SubmitScoreRequest) -> Result<MatchRecord> {
        Ok(self.matches.submit_score(
            req.match_id,
            &req.score,
            &TeamId::new(&req.submitted_by),
        )?)
    }

    /// The other side approves or denies a pending score
    pub fn verify_score(&self, req: &VerifyScoreRequest) -> Result<MatchRecord> {
        Ok(self
            .matches
            .verify_score(req.match_id, req.action, &TeamId::new(&req.team_id))?)
    }

    /// Admin: set a score directly, bypassing consensus
    pub fn admin_set_score(&self, match_id: Uuid, score: &str) -> Result<MatchRecord> {
        Ok(self.matches.admin_set_score(match_id, score)?)
    }

    /// Admin: clear a disputed match for resubmission
    pub fn admin_reset_match(&self, match_id: Uuid) -> Result<MatchRecord> {
        Ok(self.matches.admin_reset(match_id)?)
    }

    /// Admin: move a match
    pub fn reschedule_match(&self, match_id: Uuid, date: &str, time: &str) -> Result<MatchRecord> {
        Ok(self.matches.reschedule(match_id, date, time)?)
    }

    /// Admin: replace pairing and schedule of an unscored match
    pub fn edit_match(&self, match_id: Uuid, spec: MatchSpec) -> Result<MatchRecord> {
        Ok(self.matches.edit_match(match_id, spec)?)
    }

    /// Admin: remove a match
    pub fn delete_match(&self, match_id: Uuid) -> Result<()> {
        Ok(self.matches.delete_match(match_id)?)
    }

    /// Matches for a tournament, optionally narrowed by level and group
    pub fn match_list(
        &self,
        tournament: &str,
        level: Option<&str>,
        group: Option<&str>,
    ) -> Vec<MatchRecord> {
        self.matches.matches_for(tournament, level, group)
    }

    /// One match
    pub fn match_details(&self, match_id: Uuid) -> Result<MatchRecord> {
        Ok(self.matches.get(match_id)?)
    }

    // ---- standings ----

    /// Compute standings for a tournament level on demand. Entrants are
    /// the confirmed slot holders; only Official matches count.
    pub fn standings(&self, tournament: &str, level: Option<&str>) -> Result<Vec<StandingsRow>> {
        self.orchestrator.tournament(tournament)?;

        let mut entrants = Vec::new();
        for reg in self.orchestrator.entrants(tournament, level) {
            let player = self.ledger.player(&reg.team_id)?;
            // entrants() only returns grouped rows
            let Some(group) = reg.group else { continue };
            entrants.push(Entrant {
                team: reg.team_id,
                name: player.name,
                group,
                seq: reg.seq,
            });
        }

        let official = self.matches.official_matches(tournament, level, None);
        Ok(compute_standings(&entrants, &official, self.config.points))
    }

    // ---- admin wallet adjustments ----

    /// Admin: credit a wallet (prize payouts, manual corrections)
    pub fn admin_credit(
        &self,
        team_id: &str,
        amount: Amount,
        mode: TxMode,
        description: &str,
    ) -> Result<Uuid> {
        Ok(self
            .ledger
            .credit(&TeamId::new(team_id), amount, mode, description)?)
    }

    /// Admin: debit a wallet (manual corrections)
    pub fn admin_debit(
        &self,
        team_id: &str,
        amount: Amount,
        mode: TxMode,
        description: &str,
    ) -> Result<Uuid> {
        Ok(self
            .ledger
            .debit(&TeamId::new(team_id), amount, mode, description)?)
    }
}

impl std::fmt::Debug for ClubApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClubApi")
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}
