//! SHA-256 hashing for vote receipts.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Receipt binding a vote's identifiers: `hex(SHA-256(vote_id || election_id || candidate_id))`.
///
/// The voter is deliberately not part of the preimage, so the same three ids
/// always yield the same receipt regardless of who cast the vote.
pub fn vote_receipt(vote_id: &str, election_id: &str, candidate_id: &str) -> String {
    hex::encode(sha256_multi(&[
        vote_id.as_bytes(),
        election_id.as_bytes(),
        candidate_id.as_bytes(),
    ]))
}
