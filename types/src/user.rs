//! Registered users (voters and officials).

use crate::state::{Role, UserStatus};
use serde::{Deserialize, Serialize};

/// A registered user of the system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Administrative region; scopes which elections the user may vote in.
    pub governorate: String,
    /// Elections this user has already voted in. Append-only, no duplicates.
    #[serde(default)]
    pub voted_election_ids: Vec<String>,
    pub role: Role,
    pub status: UserStatus,
}

impl User {
    /// A freshly registered user: active, with no voting history.
    pub fn new(id: impl Into<String>, governorate: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            governorate: governorate.into(),
            voted_election_ids: Vec::new(),
            role,
            status: UserStatus::Active,
        }
    }

    pub fn has_voted_in(&self, election_id: &str) -> bool {
        self.voted_election_ids.iter().any(|id| id == election_id)
    }

    /// Append an election to the voting history.
    ///
    /// Returns `false` (and leaves the history untouched) if the election is
    /// already recorded.
    pub fn record_vote(&mut self, election_id: &str) -> bool {
        if self.has_voted_in(election_id) {
            return false;
        }
        self.voted_election_ids.push(election_id.to_string());
        true
    }
}
