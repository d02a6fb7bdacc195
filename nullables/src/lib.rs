//! Nullable infrastructure for deterministic testing.
//!
//! Everything the contract consumes from outside (the replicated ledger, the
//! transaction header clock, client credentials) sits behind a trait or a
//! plain value. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod identity;
pub mod store;

pub use clock::NullClock;
pub use identity::NullIdentity;
pub use store::NullLedger;
