use thiserror::Error;

/// Failure to parse one of the closed enumerations from its wire string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid role: {0}. Must be one of: voter, election_commission, auditor, admin")]
    Role(String),

    #[error("invalid user status: {0}. Must be one of: active, suspended")]
    UserStatus(String),

    #[error("invalid election status: {0}")]
    ElectionStatus(String),
}
