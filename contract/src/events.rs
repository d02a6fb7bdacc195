//! Events published to off-chain subscribers when an invocation commits.
//!
//! `election_created` and `vote_cast` carry the full entity; the others carry
//! the payloads below.

use serde::{Deserialize, Serialize};

use ballot_types::{ElectionStatus, Timestamp};

pub const ELECTION_CREATED: &str = "election_created";
pub const ELECTION_STATUS_CHANGED: &str = "election_status_changed";
pub const VOTE_CAST: &str = "vote_cast";
pub const TALLY_COMPUTED: &str = "tally_computed";
pub const FINAL_TALLY_COMPUTED: &str = "final_tally_computed";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionStatusChanged {
    pub election_id: String,
    pub old_status: ElectionStatus,
    pub new_status: ElectionStatus,
    pub timestamp: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyComputed {
    #[serde(rename = "electionId")]
    pub election_id: String,
    pub timestamp: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalTallyComputed {
    pub election_id: String,
    pub tally_id: String,
    pub is_final: bool,
    pub timestamp: Timestamp,
}
