//! Partner notification seam
//!
//! Push/SMS delivery is an external collaborator; the orchestrator only
//! needs a fire-and-forget hook when a split-payment partner must be told
//! to pay their share.

use uuid::Uuid;
use wallet_ledger::TeamId;

/// Collaborator interface for partner-pending notifications
pub trait PartnerNotifier: Send + Sync {
    /// A doubles payer registered and named `partner`; the partner must
    /// confirm registration `reg_id` by paying their own share.
    fn partner_pending(&self, partner: &TeamId, payer: &TeamId, tournament: &str, reg_id: Uuid);
}

/// Default notifier: structured log only
#[derive(Debug, Default)]
pub struct LogNotifier;

impl PartnerNotifier for LogNotifier {
    fn partner_pending(&self, partner: &TeamId, payer: &TeamId, tournament: &str, reg_id: Uuid) {
        tracing::info!(
            partner = %partner,
            payer = %payer,
            tournament = %tournament,
            reg_id = %reg_id,
            "Partner notified: payment pending"
        );
    }
}
