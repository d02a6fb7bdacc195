//! Ledger key layout.
//!
//! One key per entity, partitioned by prefix:
//!
//! | Entity         | Key                                   |
//! |----------------|---------------------------------------|
//! | User           | `user_<user_id>`                      |
//! | Election       | `election_<election_id>`              |
//! | Vote           | `vote_<vote_id>`                      |
//! | VoteTally      | `tally_<tally_id>`                    |
//! | UserRevocation | composite `("revocation", [user_id, tx_id])` |
//!
//! Composite keys live in a separate namespace: they start with a NUL byte and
//! NUL-delimit the object type and every attribute, so they never collide with
//! (or fall inside a range scan of) the simple prefixed keys.

use crate::StoreError;

pub const USER_PREFIX: &str = "user_";
pub const ELECTION_PREFIX: &str = "election_";
pub const VOTE_PREFIX: &str = "vote_";
pub const TALLY_PREFIX: &str = "tally_";

/// Object type of revocation composite keys.
pub const REVOCATION_OBJECT_TYPE: &str = "revocation";

const COMPOSITE_NAMESPACE: char = '\u{0}';
const MIN_UNICODE: char = '\u{0}';
const MAX_UNICODE: char = char::MAX;

pub fn user_key(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

pub fn election_key(election_id: &str) -> String {
    format!("{ELECTION_PREFIX}{election_id}")
}

pub fn vote_key(vote_id: &str) -> String {
    format!("{VOTE_PREFIX}{vote_id}")
}

pub fn tally_key(tally_id: &str) -> String {
    format!("{TALLY_PREFIX}{tally_id}")
}

/// Half-open range `[start, end)` covering exactly the keys that begin with `prefix`.
///
/// `prefix` must be non-empty ASCII; the end bound is the prefix with its last
/// byte incremented.
pub fn prefix_range(prefix: &str) -> (String, String) {
    let mut end = prefix.to_string();
    match end.pop() {
        Some(last) => {
            let next = char::from_u32(last as u32 + 1).unwrap_or(MAX_UNICODE);
            end.push(next);
        }
        None => end.push(MAX_UNICODE),
    }
    (prefix.to_string(), end)
}

/// Build a composite key from an object type and its attributes.
pub fn make_composite_key(object_type: &str, attributes: &[&str]) -> Result<String, StoreError> {
    validate_composite_part(object_type)?;
    let mut key = String::new();
    key.push(COMPOSITE_NAMESPACE);
    key.push_str(object_type);
    key.push(MIN_UNICODE);
    for attr in attributes {
        validate_composite_part(attr)?;
        key.push_str(attr);
        key.push(MIN_UNICODE);
    }
    Ok(key)
}

/// Range `[start, end)` of every composite key whose leading attributes equal `attributes`.
pub fn composite_prefix_range(
    object_type: &str,
    attributes: &[&str],
) -> Result<(String, String), StoreError> {
    let start = make_composite_key(object_type, attributes)?;
    let mut end = start.clone();
    end.push(MAX_UNICODE);
    Ok((start, end))
}

fn validate_composite_part(part: &str) -> Result<(), StoreError> {
    if part.contains(MIN_UNICODE) {
        return Err(StoreError::InvalidKey(format!(
            "composite key part {part:?} contains a NUL character"
        )));
    }
    Ok(())
}
