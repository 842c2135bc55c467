//! In-memory account store
//!
//! One entry per player. The `Mutex` inside each entry is the per-player
//! lock that serializes every balance-affecting mutation; different players
//! never contend with each other.

use crate::types::{Amount, Player, TeamId, Transaction};
use crate::{Error, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

/// A player plus their full transaction log, guarded as a unit
#[derive(Debug)]
pub struct Account {
    /// Player record
    pub player: Player,
    /// Append-only transaction log, in append order
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Fold the log into the current balance
    pub fn balance(&self) -> Amount {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }
}

/// Concurrent account map keyed by team ID
pub struct LedgerStore {
    accounts: DashMap<TeamId, Arc<Mutex<Account>>>,

    /// Phone uniqueness index
    phone_index: DashMap<String, TeamId>,

    /// Pending withdrawal transaction → owner, for admin confirm/reject
    pending_withdrawals: DashMap<Uuid, TeamId>,
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            phone_index: DashMap::new(),
            pending_withdrawals: DashMap::new(),
        }
    }

    /// Insert a new account. Caller has already checked phone uniqueness
    /// under no lock; this re-checks both indexes to close the races. The
    /// team-id slot is claimed through the entry API so a lost race never
    /// overwrites an existing account's log.
    pub fn insert(&self, player: Player) -> Result<()> {
        if self.phone_index.contains_key(&player.phone) {
            return Err(Error::DuplicatePhone(player.phone));
        }
        match self.accounts.entry(player.team_id.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateTeamId(player.team_id)),
            Entry::Vacant(slot) => {
                self.phone_index
                    .insert(player.phone.clone(), player.team_id.clone());
                slot.insert(Arc::new(Mutex::new(Account {
                    player,
                    transactions: Vec::new(),
                })));
                Ok(())
            }
        }
    }

    /// Does a team ID already exist?
    pub fn contains(&self, team_id: &TeamId) -> bool {
        self.accounts.contains_key(team_id)
    }

    /// Get the lockable account for a player
    pub fn account(&self, team_id: &TeamId) -> Result<Arc<Mutex<Account>>> {
        self.accounts
            .get(team_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::UnknownPlayer(team_id.clone()))
    }

    /// Resolve a phone number to its owner
    pub fn team_by_phone(&self, phone: &str) -> Option<TeamId> {
        self.phone_index.get(phone).map(|entry| entry.value().clone())
    }

    /// All team IDs, for admin listings
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.accounts.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Track a newly reserved withdrawal for later admin action
    pub fn track_withdrawal(&self, tx_id: Uuid, team_id: TeamId) {
        self.pending_withdrawals.insert(tx_id, team_id);
    }

    /// Resolve and forget a pending withdrawal. Errors if the transaction
    /// was never reserved or was already resolved.
    pub fn resolve_withdrawal(&self, tx_id: Uuid) -> Result<TeamId> {
        self.pending_withdrawals
            .remove(&tx_id)
            .map(|(_, team_id)| team_id)
            .ok_or(Error::TransactionNotFound(tx_id))
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("accounts", &self.accounts.len())
            .field("pending_withdrawals", &self.pending_withdrawals.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlayerStatus, Profile};
    use chrono::Utc;

    fn player(team_id: &str, phone: &str) -> Player {
        Player {
            team_id: TeamId::new(team_id),
            name: "Test".to_string(),
            phone: phone.to_string(),
            status: PlayerStatus::Active,
            profile: Profile::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let store = LedgerStore::new();
        store.insert(player("AB12", "9000000001")).unwrap();

        assert!(store.contains(&TeamId::new("AB12")));
        assert_eq!(store.team_by_phone("9000000001"), Some(TeamId::new("AB12")));
        assert!(store.account(&TeamId::new("ZZ99")).is_err());
    }

    #[test]
    fn test_duplicate_phone_rejected() {
        let store = LedgerStore::new();
        store.insert(player("AB12", "9000000001")).unwrap();

        let err = store.insert(player("CD34", "9000000001")).unwrap_err();
        assert!(matches!(err, Error::DuplicatePhone(_)));
    }

    #[test]
    fn test_duplicate_team_id_rejected() {
        let store = LedgerStore::new();
        store.insert(player("AB12", "9000000001")).unwrap();

        let err = store.insert(player("AB12", "9000000002")).unwrap_err();
        assert!(matches!(err, Error::DuplicateTeamId(_)));

        // First account untouched; loser's phone never indexed
        let account = store.account(&TeamId::new("AB12")).unwrap();
        assert_eq!(account.lock().player.phone, "9000000001");
        assert!(store.team_by_phone("9000000002").is_none());
    }

    #[test]
    fn test_withdrawal_tracking() {
        let store = LedgerStore::new();
        let tx_id = Uuid::now_v7();
        store.track_withdrawal(tx_id, TeamId::new("AB12"));

        assert_eq!(store.resolve_withdrawal(tx_id).unwrap(), TeamId::new("AB12"));
        // Second resolve fails: already actioned
        assert!(store.resolve_withdrawal(tx_id).is_err());
    }
}
