use ballot_crypto::IdentityError;
use ballot_store::StoreError;
use ballot_types::ParseError;
use thiserror::Error;

/// Every failure a contract operation can report.
///
/// An operation returns the first error it hits; nothing it staged is
/// committed.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists with ID: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not authorized: {0}")]
    Authorization(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("identity error: {0}")]
    IdentityFormat(#[from] IdentityError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger error: {0}")]
    Ledger(String),

    #[error("config error: {0}")]
    Config(String),
}

/// Coarse classification of a [`ContractError`], stable for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Validation,
    Authorization,
    Conflict,
    IdentityFormat,
    Serialization,
    Ledger,
    Config,
}

impl ContractError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::IdentityFormat(_) => ErrorKind::IdentityFormat,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Ledger(_) => ErrorKind::Ledger,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<StoreError> for ContractError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidKey(msg) => ContractError::Validation(msg),
            conflict @ StoreError::Conflict { .. } => ContractError::Ledger(conflict.to_string()),
        }
    }
}

impl From<ParseError> for ContractError {
    fn from(e: ParseError) -> Self {
        ContractError::Validation(e.to_string())
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(e: serde_json::Error) -> Self {
        ContractError::Serialization(e.to_string())
    }
}
