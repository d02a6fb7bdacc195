//! Individually cast votes.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// A single ballot as persisted under `vote_<vote_id>`. Never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub vote_id: String,
    pub voter_id: String,
    pub election_id: String,
    pub candidate_id: String,
    /// Hex SHA-256 over `vote_id || election_id || candidate_id`.
    pub receipt: String,
    pub created_at: Timestamp,
}
