//! Nullable ledger: thread-safe in-memory world state for testing.

use ballot_store::{KeyValue, LedgerEvent, LedgerStore, StoreError, VersionedValue, WriteBatch};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    entries: BTreeMap<String, VersionedValue>,
    events: Vec<LedgerEvent>,
    /// Number of committed batches; also the version stamped on their writes.
    height: u64,
}

/// An in-memory world state with MVCC read-set validation on commit.
/// Thread-safe for use from concurrent test threads.
pub struct NullLedger {
    state: Mutex<State>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Write a raw value outside of any batch (seeding fixtures, corrupting state).
    pub fn put_raw(&self, key: &str, value: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.height += 1;
        let version = state.height;
        state.entries.insert(
            key.to_string(),
            VersionedValue {
                value: value.to_vec(),
                version,
            },
        );
    }

    /// Raw committed bytes for `key`.
    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .entries
            .get(key)
            .map(|v| v.value.clone())
    }

    /// Every event published by a committed batch, in commit order.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Committed events with the given name.
    pub fn events_named(&self, name: &str) -> Vec<LedgerEvent> {
        self.events().into_iter().filter(|e| e.name == name).collect()
    }

    /// Number of keys in the world state.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of committed batches.
    pub fn height(&self) -> u64 {
        self.state.lock().unwrap().height
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for NullLedger {
    fn get(&self, key: &str) -> Result<Option<VersionedValue>, StoreError> {
        Ok(self.state.lock().unwrap().entries.get(key).cloned())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<KeyValue>, StoreError> {
        if start > end {
            return Err(StoreError::InvalidKey(format!(
                "range start {start:?} is after end {end:?}"
            )));
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .entries
            .range::<str, _>((
                std::ops::Bound::Included(start),
                std::ops::Bound::Excluded(end),
            ))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();

        for (key, &read) in batch.reads() {
            let current = state.entries.get(key).map_or(0, |v| v.version);
            if current != read {
                return Err(StoreError::Conflict {
                    key: key.clone(),
                    read,
                    current,
                });
            }
        }

        state.height += 1;
        let version = state.height;
        for (key, value) in batch.writes() {
            match value {
                Some(value) => {
                    state.entries.insert(
                        key.clone(),
                        VersionedValue {
                            value: value.clone(),
                            version,
                        },
                    );
                }
                None => {
                    state.entries.remove(key);
                }
            }
        }
        state.events.extend(batch.events().iter().cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_store::keys::{make_composite_key, prefix_range};

    #[test]
    fn committed_batch_is_visible_with_events() {
        let ledger = NullLedger::new();
        let mut batch = WriteBatch::new();
        batch.put("user_a", b"a".to_vec());
        batch.emit_event("user_registered", b"{}".to_vec());
        ledger.commit(batch).unwrap();

        let stored = ledger.get("user_a").unwrap().unwrap();
        assert_eq!(stored.value, b"a");
        assert_eq!(stored.version, 1);
        assert_eq!(ledger.events_named("user_registered").len(), 1);
    }

    #[test]
    fn stale_read_rejects_whole_batch() {
        let ledger = NullLedger::new();
        ledger.put_raw("user_a", b"v1");

        let mut first = WriteBatch::new();
        first.record_read("user_a", 1);
        first.put("user_a", b"v2".to_vec());

        let mut second = WriteBatch::new();
        second.record_read("user_a", 1);
        second.put("user_a", b"v3".to_vec());
        second.put("vote_x", b"x".to_vec());
        second.emit_event("vote_cast", Vec::new());

        ledger.commit(first).unwrap();
        let err = ledger.commit(second).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { read: 1, current: 2, .. }));
        assert_eq!(ledger.get_raw("user_a").unwrap(), b"v2");
        assert!(ledger.get_raw("vote_x").is_none());
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn absent_key_read_conflicts_with_concurrent_create() {
        let ledger = NullLedger::new();
        let mut batch = WriteBatch::new();
        batch.record_read("election_e1", 0);
        batch.put("election_e1", b"mine".to_vec());
        ledger.put_raw("election_e1", b"theirs");
        assert!(ledger.commit(batch).is_err());
    }

    #[test]
    fn delete_removes_key() {
        let ledger = NullLedger::new();
        ledger.put_raw("election_e1", b"e");
        let mut batch = WriteBatch::new();
        batch.delete("election_e1");
        ledger.commit(batch).unwrap();
        assert!(ledger.get("election_e1").unwrap().is_none());
    }

    #[test]
    fn range_scan_is_ordered_and_prefix_bounded() {
        let ledger = NullLedger::new();
        ledger.put_raw("vote_b", b"2");
        ledger.put_raw("vote_a", b"1");
        ledger.put_raw("voter", b"x");
        ledger.put_raw("user_a", b"u");
        let (start, end) = prefix_range("vote_");
        let keys: Vec<String> = ledger
            .range_scan(&start, &end)
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["vote_a", "vote_b"]);
    }

    #[test]
    fn partial_composite_scan_filters_by_leading_attributes() {
        let ledger = NullLedger::new();
        ledger.put_raw(&make_composite_key("revocation", &["u1", "tx1"]).unwrap(), b"1");
        ledger.put_raw(&make_composite_key("revocation", &["u1", "tx2"]).unwrap(), b"2");
        ledger.put_raw(&make_composite_key("revocation", &["u2", "tx3"]).unwrap(), b"3");

        assert_eq!(ledger.partial_composite_key_scan("revocation", &[]).unwrap().len(), 3);
        assert_eq!(ledger.partial_composite_key_scan("revocation", &["u1"]).unwrap().len(), 2);
    }
}
