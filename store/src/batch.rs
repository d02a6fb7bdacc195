//! Write batching: every mutation a contract invocation wants to make is
//! staged here and handed to [`LedgerStore::commit`](crate::LedgerStore::commit)
//! in one piece, so an invocation either lands entirely or not at all.
//!
//! The batch also carries the invocation's read-set (key → version observed),
//! which the store validates at commit to reject invocations whose inputs
//! were changed by a concurrently committed invocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An event to publish to off-chain subscribers once the batch commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub name: String,
    pub payload: Vec<u8>,
}

/// Staged writes, deletes, events and the read-set of one invocation.
#[derive(Clone, Debug, Default)]
pub struct WriteBatch {
    reads: BTreeMap<String, u64>,
    /// `None` marks a delete. Later writes to the same key replace earlier ones.
    writes: BTreeMap<String, Option<Vec<u8>>>,
    events: Vec<LedgerEvent>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the version of `key` observed by a read. Version 0 means absent.
    ///
    /// Only the first observation counts; the invocation's snapshot does not
    /// move while it runs.
    pub fn record_read(&mut self, key: &str, version: u64) {
        self.reads.entry(key.to_string()).or_insert(version);
    }

    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.writes.insert(key.into(), Some(value));
    }

    pub fn delete(&mut self, key: impl Into<String>) {
        self.writes.insert(key.into(), None);
    }

    pub fn emit_event(&mut self, name: impl Into<String>, payload: Vec<u8>) {
        self.events.push(LedgerEvent {
            name: name.into(),
            payload,
        });
    }

    pub fn reads(&self) -> &BTreeMap<String, u64> {
        &self.reads
    }

    pub fn writes(&self) -> &BTreeMap<String, Option<Vec<u8>>> {
        &self.writes
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Staged value for `key`: `Some(Some(_))` put, `Some(None)` delete, `None` untouched.
    pub fn staged(&self, key: &str) -> Option<Option<&[u8]>> {
        self.writes.get(key).map(|v| v.as_deref())
    }

    /// Whether the batch would change nothing (reads alone do not count).
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.events.is_empty()
    }
}
