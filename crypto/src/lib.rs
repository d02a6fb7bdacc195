//! Cryptographic and identity primitives for the ballot ledger contract.
//!
//! - **SHA-256** for vote receipts (hex encoded)
//! - Identity resolution: the canonical user id is the common name (`CN`)
//!   of the X.509 subject carried in the client's ledger identity

pub mod hash;
pub mod identity;

pub use hash::{sha256, sha256_multi, vote_receipt};
pub use identity::{encode_x509_identity, extract_common_name, IdentityError};
