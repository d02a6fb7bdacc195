//! Nullable clock: deterministic transaction timestamps and ids.

use ballot_types::Timestamp;
use std::cell::Cell;

/// A deterministic source of transaction header values for testing.
///
/// Time only advances when you tell it to; transaction ids are sequential.
pub struct NullClock {
    current: Cell<u64>,
    next_tx: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
            next_tx: Cell::new(1),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get() + secs);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }

    /// Mint the next transaction id (`tx-1`, `tx-2`, ...).
    pub fn next_tx_id(&self) -> String {
        let n = self.next_tx.get();
        self.next_tx.set(n + 1);
        format!("tx-{n}")
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(1_700_000_000)
    }
}
