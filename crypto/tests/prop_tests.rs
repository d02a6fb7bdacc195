use proptest::prelude::*;

use ballot_crypto::{encode_x509_identity, extract_common_name, sha256, vote_receipt};

proptest! {
    /// The receipt is the hex SHA-256 of the three ids concatenated.
    #[test]
    fn receipt_is_hash_of_concatenated_ids(
        vote_id in "\\PC{0,16}",
        election_id in "\\PC{0,16}",
        candidate_id in "\\PC{0,16}",
    ) {
        let preimage = format!("{vote_id}{election_id}{candidate_id}");
        let receipt = vote_receipt(&vote_id, &election_id, &candidate_id);
        prop_assert_eq!(receipt.len(), 64);
        prop_assert_eq!(receipt, hex::encode(sha256(preimage.as_bytes())));
    }

    /// Any common name without DN delimiters survives encoding.
    #[test]
    fn common_name_is_recovered(cn in "[A-Za-z0-9._@-]{1,32}", ou in "[a-z]{1,8}") {
        let cred = encode_x509_identity(&format!("CN={cn},OU={ou}"), "CN=ca,O=org");
        prop_assert_eq!(extract_common_name(&cred).unwrap(), cn);
    }
}
