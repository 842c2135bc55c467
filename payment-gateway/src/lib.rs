//! Payment Gateway Adapter
//!
//! External-checkout boundary for real-money wallet top-ups. This crate
//! mints orders at the gateway and verifies checkout callback signatures;
//! it never holds or mutates wallet state. Crediting the ledger after a
//! verified callback is the caller's job.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod client;
pub mod config;
pub mod error;
pub mod types;
pub mod verify;

// Re-exports
pub use client::{HttpGateway, MockGateway, PaymentGateway};
pub use config::GatewayConfig;
pub use error::{Error, Result};
pub use types::{Order, PaymentCallback};
pub use verify::{sign, verify_callback};
