//! Main ledger API
//!
//! The single source of truth for money. Every balance-affecting call takes
//! the owning player's lock, recomputes the balance fresh, and appends - so
//! two concurrent debits can never both pass a stale balance check.
//!
//! # Example
//!
//! ```
//! use wallet_ledger::{Profile, TxMode, WalletLedger};
//!
//! fn main() -> wallet_ledger::Result<()> {
//!     let ledger = WalletLedger::new();
//!     let player = ledger.register_player("Sana", "9876543210", Profile::default())?;
//!
//!     ledger.credit(&player.team_id, 500, TxMode::WalletTopup, "Top-up")?;
//!     assert_eq!(ledger.balance_of(&player.team_id)?, 500);
//!     Ok(())
//! }
//! ```

use crate::store::LedgerStore;
use crate::types::{
    Amount, Player, PlayerStatus, Profile, TeamId, Transaction, TxFilter, TxKind, TxMode, TxStatus,
};
use crate::{Error, Result};
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

/// Append-only wallet ledger with per-player mutual exclusion
#[derive(Debug, Default)]
pub struct WalletLedger {
    store: LedgerStore,
}

impl WalletLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            store: LedgerStore::new(),
        }
    }

    // ---- players ----

    /// Register a new player with a generated team ID.
    ///
    /// The ID is the first two letters of the name plus the last two phone
    /// digits; on collision, two random digits are retried.
    pub fn register_player(&self, name: &str, phone: &str, profile: Profile) -> Result<Player> {
        let phone = phone.trim().to_string();
        if self.store.team_by_phone(&phone).is_some() {
            return Err(Error::DuplicatePhone(phone));
        }

        let prefix: String = name
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .take(2)
            .collect::<String>()
            .to_uppercase();
        let prefix = if prefix.len() < 2 { format!("{prefix:X<2}") } else { prefix };

        let suffix: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>()
            .chars()
            .rev()
            .take(2)
            .collect::<String>()
            .chars()
            .rev()
            .collect();

        let mut team_id = TeamId::new(format!("{prefix}{suffix:0>2}"));
        let mut rng = rand::thread_rng();
        loop {
            while self.store.contains(&team_id) {
                team_id = TeamId::new(format!("{prefix}{}", rng.gen_range(10..100)));
            }

            let player = Player {
                team_id: team_id.clone(),
                name: name.trim().to_string(),
                phone: phone.clone(),
                status: PlayerStatus::Active,
                profile: profile.clone(),
                created_at: Utc::now(),
            };

            match self.store.insert(player.clone()) {
                Ok(()) => {
                    tracing::info!(team_id = %team_id, "Registered player");
                    return Ok(player);
                }
                // Another registration claimed this ID between the contains
                // check and the insert; roll new digits and retry
                Err(Error::DuplicateTeamId(_)) => {
                    team_id = TeamId::new(format!("{prefix}{}", rng.gen_range(10..100)));
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Look up a player by team ID
    pub fn player(&self, team_id: &TeamId) -> Result<Player> {
        Ok(self.store.account(team_id)?.lock().player.clone())
    }

    /// Look up a player by phone number
    pub fn player_by_phone(&self, phone: &str) -> Result<Player> {
        let team_id = self
            .store
            .team_by_phone(phone.trim())
            .ok_or_else(|| Error::UnknownPlayer(TeamId::new(phone)))?;
        self.player(&team_id)
    }

    /// All players, for admin listings
    pub fn players(&self) -> Vec<Player> {
        self.store
            .team_ids()
            .into_iter()
            .filter_map(|team_id| self.player(&team_id).ok())
            .collect()
    }

    /// Soft-deactivate a player. History stays auditable; no hard delete.
    pub fn deactivate_player(&self, team_id: &TeamId) -> Result<()> {
        let account = self.store.account(team_id)?;
        account.lock().player.status = PlayerStatus::Deactivated;
        tracing::info!(team_id = %team_id, "Deactivated player");
        Ok(())
    }

    // ---- money movement ----

    /// Atomically debit a player.
    ///
    /// The balance is recomputed under the player's lock before the entry is
    /// appended; a debit that would go negative fails with
    /// [`Error::InsufficientFunds`] and appends nothing.
    pub fn debit(
        &self,
        team_id: &TeamId,
        amount: Amount,
        mode: TxMode,
        description: &str,
    ) -> Result<Uuid> {
        self.append_debit(team_id, amount, mode, description, TxStatus::Completed, None)
    }

    /// Credit a player. Always succeeds for an existing, active player.
    pub fn credit(
        &self,
        team_id: &TeamId,
        amount: Amount,
        mode: TxMode,
        description: &str,
    ) -> Result<Uuid> {
        check_amount(amount)?;
        let account = self.store.account(team_id)?;
        let mut account = account.lock();
        check_active(&account.player)?;

        let tx = Transaction {
            id: Uuid::now_v7(),
            team_id: team_id.clone(),
            kind: TxKind::Credit,
            mode,
            amount,
            description: description.to_string(),
            created_at: Utc::now(),
            status: TxStatus::Completed,
            bank_details: None,
        };
        let tx_id = tx.id;
        account.transactions.push(tx);

        tracing::debug!(team_id = %team_id, amount, %mode, "Credit appended");
        Ok(tx_id)
    }

    /// Reserve funds for a withdrawal.
    ///
    /// The debit is appended with `Pending` status and counts against the
    /// balance immediately, so a second withdrawal cannot double-spend the
    /// same funds. Only admin confirmation or rejection resolves it.
    pub fn reserve_withdrawal(
        &self,
        team_id: &TeamId,
        amount: Amount,
        bank_details: &str,
    ) -> Result<Uuid> {
        let tx_id = self.append_debit(
            team_id,
            amount,
            TxMode::Withdrawal,
            "Withdrawal request",
            TxStatus::Pending,
            Some(bank_details.to_string()),
        )?;
        self.store.track_withdrawal(tx_id, team_id.clone());
        tracing::info!(team_id = %team_id, amount, %tx_id, "Withdrawal reserved");
        Ok(tx_id)
    }

    /// Admin: mark a pending withdrawal as paid out. Only the status
    /// changes; the debit was already applied at reservation time.
    pub fn confirm_withdrawal(&self, tx_id: Uuid) -> Result<()> {
        let team_id = self.store.resolve_withdrawal(tx_id)?;
        let account = self.store.account(&team_id)?;
        let mut account = account.lock();
        let tx = find_pending_withdrawal(&mut account.transactions, tx_id)?;
        tx.status = TxStatus::Completed;

        tracing::info!(team_id = %team_id, %tx_id, "Withdrawal confirmed");
        Ok(())
    }

    /// Admin: reject a pending withdrawal.
    ///
    /// The reserved debit is never reversed; the row completes and a
    /// compensating credit restores the balance, keeping the log
    /// append-only.
    pub fn reject_withdrawal(&self, tx_id: Uuid) -> Result<()> {
        let team_id = self.store.resolve_withdrawal(tx_id)?;
        let account = self.store.account(&team_id)?;
        let mut account = account.lock();
        let amount = {
            let tx = find_pending_withdrawal(&mut account.transactions, tx_id)?;
            tx.status = TxStatus::Completed;
            tx.amount
        };

        account.transactions.push(Transaction {
            id: Uuid::now_v7(),
            team_id: team_id.clone(),
            kind: TxKind::Credit,
            mode: TxMode::Withdrawal,
            amount,
            description: format!("Withdrawal {tx_id} rejected"),
            created_at: Utc::now(),
            status: TxStatus::Completed,
            bank_details: None,
        });

        tracing::warn!(team_id = %team_id, %tx_id, "Withdrawal rejected, funds restored");
        Ok(())
    }

    // ---- reads ----

    /// Current balance: a pure fold over the player's transaction log
    pub fn balance_of(&self, team_id: &TeamId) -> Result<Amount> {
        Ok(self.store.account(team_id)?.lock().balance())
    }

    /// Transaction history in append order, optionally filtered
    pub fn transactions(&self, team_id: &TeamId, filter: &TxFilter) -> Result<Vec<Transaction>> {
        let account = self.store.account(team_id)?;
        let account = account.lock();
        Ok(account
            .transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect())
    }

    // ---- internal ----

    fn append_debit(
        &self,
        team_id: &TeamId,
        amount: Amount,
        mode: TxMode,
        description: &str,
        status: TxStatus,
        bank_details: Option<String>,
    ) -> Result<Uuid> {
        check_amount(amount)?;
        let account = self.store.account(team_id)?;
        let mut account = account.lock();
        check_active(&account.player)?;

        let available = account.balance();
        if available < amount {
            return Err(Error::InsufficientFunds {
                required: amount,
                available,
            });
        }

        let tx = Transaction {
            id: Uuid::now_v7(),
            team_id: team_id.clone(),
            kind: TxKind::Debit,
            mode,
            amount,
            description: description.to_string(),
            created_at: Utc::now(),
            status,
            bank_details,
        };
        let tx_id = tx.id;
        account.transactions.push(tx);

        tracing::debug!(team_id = %team_id, amount, %mode, "Debit appended");
        Ok(tx_id)
    }
}

fn check_amount(amount: Amount) -> Result<()> {
    if amount <= 0 {
        return Err(Error::InvalidAmount(amount));
    }
    Ok(())
}

fn check_active(player: &Player) -> Result<()> {
    if player.status == PlayerStatus::Deactivated {
        return Err(Error::PlayerDeactivated(player.team_id.clone()));
    }
    Ok(())
}

fn find_pending_withdrawal(
    transactions: &mut [Transaction],
    tx_id: Uuid,
) -> Result<&mut Transaction> {
    let tx = transactions
        .iter_mut()
        .find(|tx| tx.id == tx_id)
        .ok_or(Error::TransactionNotFound(tx_id))?;
    if tx.status != TxStatus::Pending || tx.mode != TxMode::Withdrawal {
        return Err(Error::InvalidState(format!(
            "Transaction {tx_id} is not a pending withdrawal"
        )));
    }
    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_player(balance: Amount) -> (WalletLedger, TeamId) {
        let ledger = WalletLedger::new();
        let player = ledger
            .register_player("Sana", "9876543210", Profile::default())
            .unwrap();
        if balance > 0 {
            ledger
                .credit(&player.team_id, balance, TxMode::WalletTopup, "Seed")
                .unwrap();
        }
        (ledger, player.team_id)
    }

    #[test]
    fn test_team_id_generation() {
        let ledger = WalletLedger::new();
        let player = ledger
            .register_player("Sana", "9876543210", Profile::default())
            .unwrap();
        assert_eq!(player.team_id.as_str(), "SA10");
    }

    #[test]
    fn test_team_id_collision_regenerates() {
        let ledger = WalletLedger::new();
        let first = ledger
            .register_player("Sana", "9876543210", Profile::default())
            .unwrap();
        let second = ledger
            .register_player("Sanjay", "8876543210", Profile::default())
            .unwrap();
        // Both would prefer SA10; the second gets random digits
        assert_eq!(first.team_id.as_str(), "SA10");
        assert_ne!(second.team_id, first.team_id);
        assert!(second.team_id.as_str().starts_with("SA"));
    }

    #[test]
    fn test_debit_insufficient_funds() {
        let (ledger, team) = ledger_with_player(100);
        let err = ledger.debit(&team, 150, TxMode::EventFee, "Entry").unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientFunds { required: 150, available: 100 }
        ));
        // Nothing happened
        assert_eq!(ledger.balance_of(&team).unwrap(), 100);
    }

    #[test]
    fn test_debit_unknown_player_is_fatal() {
        let ledger = WalletLedger::new();
        let err = ledger
            .debit(&TeamId::new("ZZ99"), 10, TxMode::EventFee, "x")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPlayer(_)));
    }

    #[test]
    fn test_withdrawal_reserves_immediately() {
        let (ledger, team) = ledger_with_player(500);
        let tx_id = ledger.reserve_withdrawal(&team, 300, "Bank: X | Acc: 1").unwrap();
        assert_eq!(ledger.balance_of(&team).unwrap(), 200);

        // Second withdrawal cannot double-spend the reserved funds
        let err = ledger.reserve_withdrawal(&team, 300, "Bank: X | Acc: 1").unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }));

        // Confirmation changes status only, never the balance
        ledger.confirm_withdrawal(tx_id).unwrap();
        assert_eq!(ledger.balance_of(&team).unwrap(), 200);
    }

    #[test]
    fn test_withdrawal_rejection_restores_balance() {
        let (ledger, team) = ledger_with_player(500);
        let tx_id = ledger.reserve_withdrawal(&team, 300, "Bank: X | Acc: 1").unwrap();
        ledger.reject_withdrawal(tx_id).unwrap();
        assert_eq!(ledger.balance_of(&team).unwrap(), 500);

        // Resolving twice is an error, not a double credit
        assert!(ledger.reject_withdrawal(tx_id).is_err());
        assert_eq!(ledger.balance_of(&team).unwrap(), 500);
    }

    #[test]
    fn test_transaction_filtering() {
        let (ledger, team) = ledger_with_player(1000);
        ledger.debit(&team, 200, TxMode::EventFee, "Summer Open entry").unwrap();
        ledger.credit(&team, 150, TxMode::Prize, "Summer Open runner-up").unwrap();

        let fees = ledger
            .transactions(&team, &TxFilter { mode: Some(TxMode::EventFee), ..Default::default() })
            .unwrap();
        assert_eq!(fees.len(), 1);

        let summer = ledger
            .transactions(
                &team,
                &TxFilter {
                    description_contains: Some("Summer Open".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(summer.len(), 2);
    }

    #[test]
    fn test_deactivated_player_frozen() {
        let (ledger, team) = ledger_with_player(100);
        ledger.deactivate_player(&team).unwrap();
        assert!(ledger.debit(&team, 10, TxMode::EventFee, "x").is_err());
        assert!(ledger.credit(&team, 10, TxMode::Prize, "x").is_err());
        // Reads still work: history stays auditable
        assert_eq!(ledger.balance_of(&team).unwrap(), 100);
    }
}
