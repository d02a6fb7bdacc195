//! Elections and their candidates.

use crate::state::ElectionStatus;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// A candidate standing in one election. Immutable once the election exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique within its election.
    pub candidate_id: String,
    pub name: String,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub description: String,
}

/// An election as persisted under `election_<id>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub election_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Fixed at creation, never empty.
    pub candidates: Vec<Candidate>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub eligible_governorates: Vec<String>,
    pub status: ElectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tally_time: Option<Timestamp>,
    #[serde(default)]
    pub election_image: String,
}

impl Election {
    pub fn has_candidate(&self, candidate_id: &str) -> bool {
        self.candidates.iter().any(|c| c.candidate_id == candidate_id)
    }

    pub fn is_eligible(&self, governorate: &str) -> bool {
        self.eligible_governorates.iter().any(|g| g == governorate)
    }

    pub fn candidate_ids(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.candidate_id.as_str())
    }
}

/// Client-supplied description of a new election.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionInput {
    #[serde(rename = "election_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub eligible_governorates: Vec<String>,
    #[serde(default)]
    pub election_image: String,
}

impl ElectionInput {
    /// Names of required fields that are empty or missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.is_empty() {
            missing.push("election_id");
        }
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.candidates.is_empty() {
            missing.push("candidates");
        }
        if self.start_time.is_empty() {
            missing.push("start_time");
        }
        if self.end_time.is_empty() {
            missing.push("end_time");
        }
        missing
    }

    /// First candidate id that appears more than once, if any.
    pub fn duplicate_candidate(&self) -> Option<&str> {
        self.candidates.iter().enumerate().find_map(|(i, c)| {
            self.candidates[..i]
                .iter()
                .any(|prev| prev.candidate_id == c.candidate_id)
                .then_some(c.candidate_id.as_str())
        })
    }

    pub fn into_election(self, status: ElectionStatus) -> Election {
        Election {
            election_id: self.id,
            name: self.name,
            description: self.description,
            candidates: self.candidates,
            start_time: self.start_time,
            end_time: self.end_time,
            eligible_governorates: self.eligible_governorates,
            status,
            last_tally_time: None,
            election_image: self.election_image,
        }
    }
}
