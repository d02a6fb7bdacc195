//! Fundamental types for the ballot ledger contract.
//!
//! This crate defines the entities persisted in the shared ledger keyspace
//! (users, elections, votes, tallies, revocations), the closed enumerations
//! that drive authorization and the election lifecycle, and timestamps.

pub mod election;
pub mod error;
pub mod revocation;
pub mod state;
pub mod tally;
pub mod time;
pub mod user;
pub mod vote;

pub use election::{Candidate, Election, ElectionInput};
pub use error::ParseError;
pub use revocation::UserRevocation;
pub use state::{ElectionStatus, Role, UserStatus};
pub use tally::VoteTally;
pub use time::Timestamp;
pub use user::User;
pub use vote::Vote;
