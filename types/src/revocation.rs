//! Audit records of user suspensions.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// One suspension event. Append-only; a user suspended twice has two records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRevocation {
    pub user_id: String,
    pub reason: String,
    pub timestamp: Timestamp,
    pub revoked_by: String,
}
