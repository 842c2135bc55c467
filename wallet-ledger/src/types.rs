//! Core types for the wallet ledger
//!
//! All money amounts are `i64` minor currency units (paise). The UI renders
//! whole rupees; the ledger never does float or decimal arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Money amount in minor currency units (paise). Always positive in a
/// transaction record; sign is carried by [`TxKind`].
pub type Amount = i64;

/// Human-typable unique player identifier (e.g. `SA25`), used in lieu of a
/// numeric ID for invites and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(String);

impl TeamId {
    /// Create a team ID, normalizing user input (trim + uppercase).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_uppercase())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player account state. `Deactivated` players are never hard-deleted; their
/// transaction history must stay auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Normal, spendable account
    Active,
    /// Soft-deleted; no new money movement allowed
    Deactivated,
}

/// Optional profile fields shown in the player directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Self-reported gender
    pub gender: Option<String>,
    /// Preferred court/venue
    pub play_location: Option<String>,
}

/// A registered player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique, human-typable identifier
    pub team_id: TeamId,

    /// Display name
    pub name: String,

    /// Phone number (unique across players)
    pub phone: String,

    /// Account state
    pub status: PlayerStatus,

    /// Profile fields
    pub profile: Profile,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    /// Money into the wallet
    Credit,
    /// Money out of the wallet
    Debit,
}

/// Business reason for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxMode {
    /// Real-money top-up via the payment gateway
    WalletTopup,
    /// Direct payment outside the wallet flow
    DirectPayment,
    /// Tournament or pickup-match entry fee
    EventFee,
    /// Withdrawal to a bank account
    Withdrawal,
    /// Prize payout
    Prize,
}

impl fmt::Display for TxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxMode::WalletTopup => "WALLET_TOPUP",
            TxMode::DirectPayment => "DIRECT_PAYMENT",
            TxMode::EventFee => "EVENT_FEE",
            TxMode::Withdrawal => "WITHDRAWAL",
            TxMode::Prize => "PRIZE",
        };
        write!(f, "{s}")
    }
}

/// Transaction lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Reserved but awaiting admin action (withdrawals only)
    Pending,
    /// Settled; counts toward the balance fold
    Completed,
}

/// Immutable ledger entry. Only `status` ever changes after append, and only
/// Pending → Completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID (UUIDv7 for time-ordering)
    pub id: Uuid,

    /// Owning player
    pub team_id: TeamId,

    /// Credit or debit
    pub kind: TxKind,

    /// Business reason
    pub mode: TxMode,

    /// Positive amount in minor units
    pub amount: Amount,

    /// Human-readable description (tournament name, match venue, ...)
    pub description: String,

    /// Append timestamp
    pub created_at: DateTime<Utc>,

    /// Lifecycle state
    pub status: TxStatus,

    /// Bank details, set on withdrawal debits only
    pub bank_details: Option<String>,
}

impl Transaction {
    /// Signed contribution of this transaction to the owner's balance.
    ///
    /// Completed credits count positive. Debits count negative when
    /// completed, and *also* while pending: a pending withdrawal has already
    /// reserved the funds.
    pub fn signed_amount(&self) -> Amount {
        match (self.kind, self.status) {
            (TxKind::Credit, TxStatus::Completed) => self.amount,
            (TxKind::Credit, TxStatus::Pending) => 0,
            (TxKind::Debit, _) => -self.amount,
        }
    }
}

/// Read-side filter for transaction listings (earnings views)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxFilter {
    /// Only transactions with this mode
    pub mode: Option<TxMode>,

    /// Only transactions whose description contains this substring
    /// (case-sensitive; descriptions embed tournament names)
    pub description_contains: Option<String>,
}

impl TxFilter {
    /// Does `tx` pass this filter?
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(mode) = self.mode {
            if tx.mode != mode {
                return false;
            }
        }
        if let Some(ref needle) = self.description_contains {
            if !tx.description.contains(needle.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: TxKind, status: TxStatus, amount: Amount) -> Transaction {
        Transaction {
            id: Uuid::now_v7(),
            team_id: TeamId::new("AB12"),
            kind,
            mode: TxMode::EventFee,
            amount,
            description: "test".to_string(),
            created_at: Utc::now(),
            status,
            bank_details: None,
        }
    }

    #[test]
    fn test_team_id_normalization() {
        assert_eq!(TeamId::new("  sa25 ").as_str(), "SA25");
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(tx(TxKind::Credit, TxStatus::Completed, 500).signed_amount(), 500);
        assert_eq!(tx(TxKind::Debit, TxStatus::Completed, 500).signed_amount(), -500);
        // Pending withdrawals are already reserved
        assert_eq!(tx(TxKind::Debit, TxStatus::Pending, 500).signed_amount(), -500);
        assert_eq!(tx(TxKind::Credit, TxStatus::Pending, 500).signed_amount(), 0);
    }

    #[test]
    fn test_filter_by_mode_and_description() {
        let t = tx(TxKind::Debit, TxStatus::Completed, 100);
        let by_mode = TxFilter { mode: Some(TxMode::EventFee), ..Default::default() };
        assert!(by_mode.matches(&t));

        let wrong_mode = TxFilter { mode: Some(TxMode::Prize), ..Default::default() };
        assert!(!wrong_mode.matches(&t));

        let by_desc = TxFilter {
            description_contains: Some("te".to_string()),
            ..Default::default()
        };
        assert!(by_desc.matches(&t));
    }
}
