//! Standings Aggregator
//!
//! A pure function from the set of Official matches to ranked group
//! standings. Nothing here is cached or persisted; callers recompute on
//! read, which keeps standings stale-proof by construction.
//!
//! # Determinism
//!
//! Ranking order is a total order: points descending, then total games won
//! descending, then registration sequence ascending. Given the same input,
//! the output ordering is byte-identical on every call.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod aggregator;
pub mod types;

// Re-exports
pub use aggregator::compute_standings;
pub use types::{Entrant, PointsScheme, StandingsRow};
