use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("read conflict on key {key}: read version {read}, committed version {current}")]
    Conflict { key: String, read: u64, current: u64 },
}
