//! Request/response DTOs for the request surface

use match_consensus::VerifyAction;
use registration::{JoinStatus, PaymentScope, Registration};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wallet_ledger::{Amount, Player, Transaction};

/// A player with the derived state a client renders: balance and
/// registrations. Always resynchronized from the server; the client is a
/// display cache, never a source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    /// The player record
    pub player: Player,

    /// Current wallet balance, minor units
    pub balance: Amount,

    /// All registration rows for this player
    pub registrations: Vec<Registration>,
}

/// Join a tournament level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinTournamentRequest {
    /// Phone of the paying player
    pub phone: String,
    /// Tournament name
    pub tournament: String,
    /// Level name
    pub level: String,
    /// Partner team ID, doubles only
    pub partner_team_id: Option<String>,
    /// Who pays: each half independently, or one payer for both
    pub payment_scope: PaymentScope,
}

/// Join outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinTournamentResponse {
    /// Joined, or waiting on the partner's payment
    pub status: JoinStatus,
    /// The payer, post-debit
    pub user: UserView,
    /// Rows created by the join
    pub registrations: Vec<Registration>,
}

/// One side submits a match score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    /// Match being scored
    pub match_id: Uuid,
    /// Set-score string, e.g. `"6-4,3-6,6-2"`
    pub score: String,
    /// Submitting team
    pub submitted_by: String,
}

/// The other side approves or denies a pending score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyScoreRequest {
    /// Match under verification
    pub match_id: Uuid,
    /// Acting team
    pub team_id: String,
    /// Approve or deny
    pub action: VerifyAction,
}

/// Reserve a withdrawal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// Withdrawing player
    pub team_id: String,
    /// Amount, minor units
    pub amount: Amount,
    /// Payout destination, stored verbatim on the transaction
    pub bank_details: String,
}

/// Mint a gateway top-up order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    /// Gateway order ID
    pub order_id: String,
    /// Public key ID for the checkout widget
    pub key: String,
    /// Amount, minor units
    pub amount: Amount,
    /// ISO currency code
    pub currency: String,
}

/// Checkout callback plus the wallet to credit. The credited amount is the
/// one the order was minted with, never client input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    /// Order the payment settles
    pub order_id: String,
    /// Gateway payment ID
    pub payment_id: String,
    /// Gateway signature over order and payment IDs
    pub signature: String,
    /// Wallet to credit on success
    pub team_id: String,
}

/// Balance after a verified top-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    /// New wallet balance, minor units
    pub new_balance: Amount,
}

/// A player's transaction history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// Current balance
    pub balance: Amount,
    /// Matching transactions, oldest first
    pub transactions: Vec<Transaction>,
}
