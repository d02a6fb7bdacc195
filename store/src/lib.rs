//! Abstract ledger store interface for the ballot contract.
//!
//! The replicated ledger (ordering, MVCC validation, persistence) lives
//! outside this workspace. The contract depends only on [`LedgerStore`];
//! tests use the in-memory implementation from `ballot-nullables`.

pub mod batch;
pub mod error;
pub mod keys;

pub use batch::{LedgerEvent, WriteBatch};
pub use error::StoreError;
pub use keys::make_composite_key;

/// A stored value together with the version it was committed at.
///
/// Versions are strictly positive; 0 is reserved for "absent".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: u64,
}

/// A key and its value, as yielded by scans.
pub type KeyValue = (String, VersionedValue);

/// The world-state store the contract reads from and commits batches to.
pub trait LedgerStore {
    /// Read the committed value of `key`.
    fn get(&self, key: &str) -> Result<Option<VersionedValue>, StoreError>;

    /// All committed entries with `start <= key < end`, in key order.
    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<KeyValue>, StoreError>;

    /// All committed composite-key entries of `object_type` whose leading
    /// attributes equal `attributes`, in key order.
    fn partial_composite_key_scan(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<Vec<KeyValue>, StoreError> {
        let (start, end) = keys::composite_prefix_range(object_type, attributes)?;
        self.range_scan(&start, &end)
    }

    /// Atomically apply every staged write and publish every staged event.
    ///
    /// Fails without applying anything if a key in the batch's read-set has
    /// been committed at a different version since it was read.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
