//! Shared utilities for the ballot ledger contract.

pub mod logging;

pub use logging::{init_logging, try_init_logging, LogFormat};
