//! Point-in-time vote count snapshots.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-candidate counts for one election, persisted under `tally_<id>`.
///
/// `tallies` is ordered so that the serialized snapshot is byte-identical on
/// every replica.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub id: String,
    /// Identity that computed the snapshot.
    pub user_id: String,
    pub election_id: String,
    pub tallies: BTreeMap<String, u64>,
    pub created_at: Timestamp,
    pub is_final: bool,
}

impl VoteTally {
    /// Total number of ballots counted.
    pub fn total_votes(&self) -> u64 {
        self.tallies.values().sum()
    }

    pub fn count_for(&self, candidate_id: &str) -> u64 {
        self.tallies.get(candidate_id).copied().unwrap_or(0)
    }
}
