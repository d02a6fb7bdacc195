use proptest::prelude::*;

use ballot_types::{ElectionStatus, Role, Timestamp, User, UserStatus};

proptest! {
    /// Any string that is not a known role is rejected, never coerced.
    #[test]
    fn unknown_role_strings_are_rejected(s in "[a-z_]{0,24}") {
        let known = Role::ALL.iter().any(|r| r.as_str() == s);
        prop_assert_eq!(s.parse::<Role>().is_ok(), known);
    }

    /// Parsing the wire name of a status yields the same status.
    #[test]
    fn election_status_wire_name_parses_back(idx in 0usize..5) {
        let status = ElectionStatus::ASSIGNABLE[idx];
        prop_assert_eq!(status.as_str().parse::<ElectionStatus>(), Ok(status));
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Voting history never holds an election twice, whatever the call order.
    #[test]
    fn voting_history_has_no_duplicates(ids in prop::collection::vec("e[0-4]", 0..20)) {
        let mut user = User::new("v1", "Cairo", Role::Voter);
        for id in &ids {
            user.record_vote(id);
        }
        let mut sorted = user.voted_election_ids.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), user.voted_election_ids.len());
        prop_assert_eq!(user.status, UserStatus::Active);
    }
}
