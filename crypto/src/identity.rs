//! Identity resolution from ledger client credentials.
//!
//! The ledger hands the contract an opaque credential: the base64 encoding of
//! `x509::<subject DN>::<issuer DN>`, e.g.
//! `x509::CN=voter1,OU=client+OU=org1::CN=ca.org1.example.com,O=org1.example.com`.
//! The canonical user id is the value of the `CN` attribute of the subject.
//! Resolution is a pure function of the credential bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

const X509_PREFIX: &str = "x509";
const SEPARATOR: &str = "::";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("failed to decode identity: {0}")]
    Decode(String),

    #[error("invalid identity format: {0}")]
    Format(String),

    #[error("CN not found in identity: {0}")]
    MissingCommonName(String),
}

/// Extract the subject common name from a base64 client credential.
pub fn extract_common_name(credential: &str) -> Result<String, IdentityError> {
    let bytes = STANDARD
        .decode(credential.trim())
        .map_err(|e| IdentityError::Decode(e.to_string()))?;
    let full_id =
        String::from_utf8(bytes).map_err(|e| IdentityError::Decode(e.to_string()))?;

    let mut parts = full_id.split(SEPARATOR);
    let scheme = parts.next().unwrap_or_default();
    let subject = match parts.next() {
        Some(subject) if scheme == X509_PREFIX => subject,
        _ => return Err(IdentityError::Format(full_id.clone())),
    };

    // RDNs are comma separated; multi-valued RDNs join attributes with '+'.
    subject
        .split(',')
        .flat_map(|rdn| rdn.split('+'))
        .filter_map(|attr| attr.split_once('='))
        .find(|(key, _)| key.trim() == "CN")
        .map(|(_, value)| value.trim().to_string())
        .filter(|cn| !cn.is_empty())
        .ok_or_else(|| IdentityError::MissingCommonName(full_id.clone()))
}

/// Build a credential in the form the ledger presents it.
pub fn encode_x509_identity(subject: &str, issuer: &str) -> String {
    STANDARD.encode(format!("{X509_PREFIX}{SEPARATOR}{subject}{SEPARATOR}{issuer}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "CN=ca.org1.example.com,O=org1.example.com,C=US";

    #[test]
    fn extracts_cn_followed_by_other_attributes() {
        let cred = encode_x509_identity("CN=voter1,OU=client+OU=org1", ISSUER);
        assert_eq!(extract_common_name(&cred).unwrap(), "voter1");
    }

    #[test]
    fn extracts_cn_at_end_of_subject() {
        let cred = encode_x509_identity("OU=client,CN=auditor7", ISSUER);
        assert_eq!(extract_common_name(&cred).unwrap(), "auditor7");
    }

    #[test]
    fn ignores_issuer_cn() {
        let cred = encode_x509_identity("OU=client", ISSUER);
        assert!(matches!(
            extract_common_name(&cred),
            Err(IdentityError::MissingCommonName(_))
        ));
    }

    #[test]
    fn rejects_non_base64() {
        assert!(matches!(
            extract_common_name("not base64!!"),
            Err(IdentityError::Decode(_))
        ));
    }

    #[test]
    fn rejects_missing_subject_section() {
        let cred = STANDARD.encode("x509");
        assert!(matches!(
            extract_common_name(&cred),
            Err(IdentityError::Format(_))
        ));
    }

    #[test]
    fn rejects_unknown_scheme() {
        let cred = STANDARD.encode("idemix::CN=voter1::CN=ca");
        assert!(matches!(
            extract_common_name(&cred),
            Err(IdentityError::Format(_))
        ));
    }

    #[test]
    fn rejects_empty_common_name() {
        let cred = encode_x509_identity("CN=,OU=client", ISSUER);
        assert!(extract_common_name(&cred).is_err());
    }

    #[test]
    fn resolution_is_deterministic() {
        let cred = encode_x509_identity("CN=voter1", ISSUER);
        assert_eq!(
            extract_common_name(&cred).unwrap(),
            extract_common_name(&cred).unwrap()
        );
    }
}
