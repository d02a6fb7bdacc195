//! Election management contract over a replicated key-value ledger.
//!
//! Users, elections, ballots, tallies and suspension records live in the
//! ledger keyspace. Every operation runs against a [`TxContext`] that stages
//! its writes and events; the ledger applies the batch atomically or not at
//! all. Operations are deterministic: time and transaction ids come from the
//! [`Invocation`], never from the host.
//!
//! Operations are grouped by component:
//! - [`auth`]: role checks for privileged operations
//! - [`users`]: registration and moderation
//! - [`elections`]: creation and lifecycle
//! - [`votes`]: ballot casting
//! - [`tally`]: vote counting
//! - [`revocation`]: suspension audit log

pub mod auth;
pub mod config;
pub mod context;
pub mod contract;
pub mod dispatch;
pub mod elections;
pub mod error;
pub mod events;
pub mod revocation;
pub mod tally;
pub mod users;
pub mod votes;

pub use config::ContractConfig;
pub use context::{Invocation, TxContext};
pub use contract::{Prepared, VotingContract};
pub use error::{ContractError, ErrorKind};
