//! Nullable identities: build client credentials for a given user id.

use ballot_crypto::encode_x509_identity;

/// Builds credentials shaped like the ones a ledger peer presents.
pub struct NullIdentity;

impl NullIdentity {
    const ISSUER: &'static str = "CN=ca.org1.example.com,O=org1.example.com,L=Durham,C=US";

    /// Credential whose subject common name is `user_id`.
    pub fn credential(user_id: &str) -> String {
        encode_x509_identity(&format!("CN={user_id},OU=client+OU=org1"), Self::ISSUER)
    }

    /// Well-formed credential whose subject has no common name.
    pub fn anonymous() -> String {
        encode_x509_identity("OU=client", Self::ISSUER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_crypto::extract_common_name;

    #[test]
    fn credential_resolves_to_user_id() {
        let cred = NullIdentity::credential("voter42");
        assert_eq!(extract_common_name(&cred).unwrap(), "voter42");
    }

    #[test]
    fn anonymous_credential_has_no_cn() {
        assert!(extract_common_name(&NullIdentity::anonymous()).is_err());
    }
}
