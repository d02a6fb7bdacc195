//! Closed enumerations for user roles, user status and the election lifecycle.
//!
//! These are persisted as snake_case strings so the ledger payloads stay
//! readable by off-chain consumers, but inside the contract every decision
//! point matches on the enum exhaustively.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a registered user holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May cast votes in elections their governorate is eligible for.
    Voter,
    /// May suspend/reinstate users and read the revocation log.
    ElectionCommission,
    /// Same moderation rights as the commission, used for oversight.
    Auditor,
    /// May assign roles and clear elections.
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Voter,
        Role::ElectionCommission,
        Role::Auditor,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voter => "voter",
            Self::ElectionCommission => "election_commission",
            Self::Auditor => "auditor",
            Self::Admin => "admin",
        }
    }

    /// Whether the role may be granted through registration or role
    /// assignment. Admins are provisioned out of band.
    pub fn is_registrable(&self) -> bool {
        match self {
            Self::Voter | Self::ElectionCommission | Self::Auditor => true,
            Self::Admin => false,
        }
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voter" => Ok(Self::Voter),
            "election_commission" => Ok(Self::ElectionCommission),
            "auditor" => Ok(Self::Auditor),
            "admin" => Ok(Self::Admin),
            other => Err(ParseError::Role(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a user account may currently act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }

    /// Whether the user is allowed to cast votes.
    pub fn can_vote(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for UserStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            other => Err(ParseError::UserStatus(other.to_string())),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lifecycle status of an election.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectionStatus {
    /// Initial status assigned on creation.
    Active,
    Scheduled,
    /// Votes are being accepted.
    Live,
    Ended,
    Published,
    Cancelled,
    /// Results are closed; tallies computed in this status are final.
    Completed,
}

impl ElectionStatus {
    /// Statuses an external scheduler may move an election into.
    pub const ASSIGNABLE: [ElectionStatus; 5] = [
        ElectionStatus::Scheduled,
        ElectionStatus::Live,
        ElectionStatus::Ended,
        ElectionStatus::Published,
        ElectionStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Ended => "ended",
            Self::Published => "published",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Whether `UpdateElectionStatus` may set this status.
    pub fn is_assignable(&self) -> bool {
        match self {
            Self::Scheduled | Self::Live | Self::Ended | Self::Published | Self::Cancelled => true,
            Self::Active | Self::Completed => false,
        }
    }

    /// Whether the election is open for ballots.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Whether a tally computed in this status is final.
    pub fn finalizes_tally(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl FromStr for ElectionStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "scheduled" => Ok(Self::Scheduled),
            "live" => Ok(Self::Live),
            "ended" => Ok(Self::Ended),
            "published" => Ok(Self::Published),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(ParseError::ElectionStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ElectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
