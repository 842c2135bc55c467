//! Club API
//!
//! Request surface for the club ledger: players and wallets, tournament
//! registration, pickup matches, score consensus, standings, and gateway
//! top-ups, behind one [`ClubApi`] facade. Server-held state is the only
//! source of truth; clients resynchronize via explicit refresh calls.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod service;
pub mod types;

// Re-exports
pub use config::ApiConfig;
pub use error::{Error, Result};
pub use service::ClubApi;
pub use types::{
    CreateOrderResponse, JoinTournamentRequest, JoinTournamentResponse, SubmitScoreRequest,
    TransactionsResponse, UserView, VerifyPaymentRequest, VerifyPaymentResponse,
    VerifyScoreRequest, WithdrawRequest,
};
