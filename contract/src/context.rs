//! Per-invocation execution context.
//!
//! A [`TxContext`] is the only way operations touch the ledger. Reads go
//! straight to committed state and are recorded in the read-set; writes,
//! deletes and events are staged in a [`WriteBatch`] that the caller commits
//! (or drops) once the operation returns. Reads never observe the
//! invocation's own staged writes.

use serde::de::DeserializeOwned;
use serde::Serialize;

use ballot_crypto::extract_common_name;
use ballot_store::keys::prefix_range;
use ballot_store::{KeyValue, LedgerStore, WriteBatch};
use ballot_types::Timestamp;

use crate::ContractError;

/// The transaction header the ledger supplies with every invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Unique per transaction; used to key revocation records.
    pub tx_id: String,
    /// Agreed transaction timestamp. The only time source the contract uses.
    pub timestamp: Timestamp,
    /// Base64 client credential of the caller.
    pub credential: String,
}

impl Invocation {
    pub fn new(
        tx_id: impl Into<String>,
        timestamp: Timestamp,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            tx_id: tx_id.into(),
            timestamp,
            credential: credential.into(),
        }
    }
}

pub struct TxContext<'a> {
    store: &'a dyn LedgerStore,
    invocation: &'a Invocation,
    batch: WriteBatch,
}

impl<'a> TxContext<'a> {
    pub fn new(store: &'a dyn LedgerStore, invocation: &'a Invocation) -> Self {
        Self {
            store,
            invocation,
            batch: WriteBatch::new(),
        }
    }

    pub fn tx_id(&self) -> &str {
        &self.invocation.tx_id
    }

    pub fn timestamp(&self) -> Timestamp {
        self.invocation.timestamp
    }

    /// Canonical user id of the caller.
    pub fn caller_id(&self) -> Result<String, ContractError> {
        Ok(extract_common_name(&self.invocation.credential)?)
    }

    /// Read and decode the committed value of `key`.
    pub fn get_state<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, ContractError> {
        let found = self.store.get(key)?;
        self.batch
            .record_read(key, found.as_ref().map_or(0, |v| v.version));
        found.map(|v| decode(key, &v.value)).transpose()
    }

    pub fn exists(&mut self, key: &str) -> Result<bool, ContractError> {
        let found = self.store.get(key)?;
        self.batch
            .record_read(key, found.as_ref().map_or(0, |v| v.version));
        Ok(found.is_some())
    }

    /// Every committed entry whose key starts with `prefix`, in key order.
    pub fn scan_prefix<T: DeserializeOwned>(
        &mut self,
        prefix: &str,
    ) -> Result<Vec<(String, T)>, ContractError> {
        let (start, end) = prefix_range(prefix);
        let entries = self.store.range_scan(&start, &end)?;
        tracing::debug!(prefix, entries = entries.len(), "prefix scan");
        self.decode_all(entries)
    }

    /// Every committed composite-key entry of `object_type` whose leading
    /// attributes equal `attributes`, in key order.
    pub fn scan_composite<T: DeserializeOwned>(
        &mut self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<Vec<(String, T)>, ContractError> {
        let entries = self
            .store
            .partial_composite_key_scan(object_type, attributes)?;
        tracing::debug!(object_type, entries = entries.len(), "composite key scan");
        self.decode_all(entries)
    }

    pub fn put_state<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), ContractError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| ContractError::Serialization(format!("failed to marshal {key}: {e}")))?;
        self.batch.put(key, bytes);
        Ok(())
    }

    pub fn delete_state(&mut self, key: &str) {
        self.batch.delete(key);
    }

    /// Stage an event for publication on commit. Every staged event is kept.
    pub fn emit_event<T: Serialize>(&mut self, name: &str, payload: &T) -> Result<(), ContractError> {
        let bytes = serde_json::to_vec(payload)
            .map_err(|e| ContractError::Serialization(format!("failed to marshal {name} event: {e}")))?;
        self.batch.emit_event(name, bytes);
        Ok(())
    }

    pub fn batch(&self) -> &WriteBatch {
        &self.batch
    }

    pub fn into_batch(self) -> WriteBatch {
        self.batch
    }

    fn decode_all<T: DeserializeOwned>(
        &mut self,
        entries: Vec<KeyValue>,
    ) -> Result<Vec<(String, T)>, ContractError> {
        entries
            .into_iter()
            .map(|(key, v)| {
                self.batch.record_read(&key, v.version);
                let value = decode(&key, &v.value)?;
                Ok((key, value))
            })
            .collect()
    }
}

fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, ContractError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ContractError::Serialization(format!("failed to unmarshal {key}: {e}")))
}
