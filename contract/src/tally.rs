//! Vote counting.
//!
//! A tally is a snapshot: every vote for the election is recounted from the
//! ledger each time. Counts for the same set of votes are always identical.
//! A final tally is never replaced by a non-final recount.

use std::collections::BTreeMap;

use ballot_store::keys::{election_key, tally_key, VOTE_PREFIX};
use ballot_types::{Vote, VoteTally};

use crate::context::TxContext;
use crate::elections::get_election;
use crate::events::{self, FinalTallyComputed, TallyComputed};
use crate::ContractError;

/// Tally id under which the final results of an election are stored.
pub fn final_tally_id(election_id: &str) -> String {
    format!("final_tally_{election_id}")
}

/// Recount `election_id` and store the snapshot as `tally_id`.
///
/// The tally is final if the election is completed.
pub fn compute_vote_tally(
    ctx: &mut TxContext<'_>,
    tally_id: &str,
    election_id: &str,
) -> Result<VoteTally, ContractError> {
    compute(ctx, tally_id, election_id, false)
}

/// Recount `election_id` into its final tally, `final_tally_<election_id>`.
pub fn compute_final_tally(
    ctx: &mut TxContext<'_>,
    election_id: &str,
) -> Result<VoteTally, ContractError> {
    let tally_id = final_tally_id(election_id);
    let tally = compute(ctx, &tally_id, election_id, true)?;
    let announced = FinalTallyComputed {
        election_id: election_id.to_string(),
        tally_id,
        is_final: tally.is_final,
        timestamp: ctx.timestamp(),
    };
    ctx.emit_event(events::FINAL_TALLY_COMPUTED, &announced)?;
    Ok(tally)
}

pub fn get_vote_tally(ctx: &mut TxContext<'_>, tally_id: &str) -> Result<VoteTally, ContractError> {
    ctx.get_state(&tally_key(tally_id))?
        .ok_or_else(|| ContractError::not_found("tally", tally_id))
}

/// The final tally of an election, once computed.
pub fn get_election_results(
    ctx: &mut TxContext<'_>,
    election_id: &str,
) -> Result<VoteTally, ContractError> {
    ctx.get_state(&tally_key(&final_tally_id(election_id)))?
        .ok_or_else(|| ContractError::not_found("final results for election", election_id))
}

fn compute(
    ctx: &mut TxContext<'_>,
    tally_id: &str,
    election_id: &str,
    force_final: bool,
) -> Result<VoteTally, ContractError> {
    if tally_id.is_empty() {
        return Err(ContractError::Validation("tally ID must not be empty".into()));
    }
    let mut election = get_election(ctx, election_id)?;
    let mut tallies: BTreeMap<String, u64> = election
        .candidate_ids()
        .map(|id| (id.to_string(), 0))
        .collect();

    let votes: Vec<(String, Vote)> = ctx.scan_prefix(VOTE_PREFIX)?;
    for (_, vote) in votes.iter().filter(|(_, v)| v.election_id == election_id) {
        match tallies.get_mut(&vote.candidate_id) {
            Some(count) => *count += 1,
            None => {
                tracing::error!(
                    vote_id = %vote.vote_id,
                    candidate_id = %vote.candidate_id,
                    election_id,
                    "stored vote references unknown candidate"
                );
                return Err(ContractError::Conflict(format!(
                    "invalid candidate ID found in vote {}: {}",
                    vote.vote_id, vote.candidate_id
                )));
            }
        }
    }

    let is_final = force_final || election.status.finalizes_tally();
    let key = tally_key(tally_id);
    if let Some(existing) = ctx.get_state::<VoteTally>(&key)? {
        if existing.election_id != election_id {
            return Err(ContractError::Conflict(format!(
                "tally {tally_id} belongs to election {}",
                existing.election_id
            )));
        }
        if existing.is_final && !is_final {
            return Err(ContractError::Conflict(format!(
                "tally {tally_id} is final and cannot be replaced by a non-final recount"
            )));
        }
    }

    let tally = VoteTally {
        id: tally_id.to_string(),
        user_id: ctx.caller_id()?,
        election_id: election_id.to_string(),
        tallies,
        created_at: ctx.timestamp(),
        is_final,
    };
    election.last_tally_time = Some(tally.created_at);

    ctx.put_state(&key, &tally)?;
    ctx.put_state(&election_key(election_id), &election)?;
    ctx.emit_event(
        events::TALLY_COMPUTED,
        &TallyComputed {
            election_id: election_id.to_string(),
            timestamp: tally.created_at,
        },
    )?;
    tracing::info!(
        tally_id,
        election_id,
        total = tally.total_votes(),
        is_final,
        at = %tally.created_at,
        "tally computed"
    );
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Invocation;
    use crate::ErrorKind;
    use ballot_nullables::{NullIdentity, NullLedger};
    use ballot_store::keys::vote_key;
    use ballot_store::LedgerStore;
    use ballot_types::{Candidate, Election, ElectionStatus, Timestamp};

    fn seed_election(ledger: &NullLedger, id: &str, status: ElectionStatus) {
        let election = Election {
            election_id: id.into(),
            name: id.into(),
            description: String::new(),
            candidates: ["c1", "c2"]
                .iter()
                .map(|c| Candidate {
                    candidate_id: c.to_string(),
                    name: c.to_string(),
                    party: String::new(),
                    profile_image: String::new(),
                    description: String::new(),
                })
                .collect(),
            start_time: "s".into(),
            end_time: "e".into(),
            eligible_governorates: vec!["Cairo".into()],
            status,
            last_tally_time: None,
            election_image: String::new(),
        };
        ledger.put_raw(&election_key(id), &serde_json::to_vec(&election).unwrap());
    }

    fn seed_vote(ledger: &NullLedger, vote_id: &str, election_id: &str, candidate_id: &str) {
        let vote = Vote {
            vote_id: vote_id.into(),
            voter_id: format!("voter-{vote_id}"),
            election_id: election_id.into(),
            candidate_id: candidate_id.into(),
            receipt: String::new(),
            created_at: Timestamp::new(1),
        };
        ledger.put_raw(&vote_key(vote_id), &serde_json::to_vec(&vote).unwrap());
    }

    fn run<T>(
        ledger: &NullLedger,
        op: impl FnOnce(&mut TxContext<'_>) -> Result<T, ContractError>,
    ) -> Result<T, ContractError> {
        let inv = Invocation::new("tx", Timestamp::new(900), NullIdentity::credential("clerk"));
        let mut ctx = TxContext::new(ledger, &inv);
        let out = op(&mut ctx)?;
        ledger.commit(ctx.into_batch())?;
        Ok(out)
    }

    #[test]
    fn counts_only_votes_of_the_election() {
        let ledger = NullLedger::new();
        seed_election(&ledger, "e1", ElectionStatus::Live);
        seed_election(&ledger, "e2", ElectionStatus::Live);
        seed_vote(&ledger, "a", "e1", "c1");
        seed_vote(&ledger, "b", "e1", "c1");
        seed_vote(&ledger, "c", "e2", "c2");

        let tally = run(&ledger, |ctx| compute_vote_tally(ctx, "t1", "e1")).unwrap();
        assert_eq!(tally.count_for("c1"), 2);
        assert_eq!(tally.count_for("c2"), 0);
        assert_eq!(tally.user_id, "clerk");
        assert!(!tally.is_final);

        let election: Election =
            serde_json::from_slice(&ledger.get_raw("election_e1").unwrap()).unwrap();
        assert_eq!(election.last_tally_time, Some(Timestamp::new(900)));
        let stored = run(&ledger, |ctx| get_vote_tally(ctx, "t1")).unwrap();
        assert_eq!(stored, tally);
    }

    #[test]
    fn stray_candidate_aborts_without_writes() {
        let ledger = NullLedger::new();
        seed_election(&ledger, "e1", ElectionStatus::Live);
        seed_vote(&ledger, "a", "e1", "c1");
        seed_vote(&ledger, "b", "e1", "c404");
        let height = ledger.height();

        let err = run(&ledger, |ctx| compute_vote_tally(ctx, "t1", "e1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("c404"));
        assert_eq!(ledger.height(), height);
    }

    #[test]
    fn completed_election_yields_final_tally() {
        let ledger = NullLedger::new();
        seed_election(&ledger, "e1", ElectionStatus::Completed);
        let tally = run(&ledger, |ctx| compute_vote_tally(ctx, "t1", "e1")).unwrap();
        assert!(tally.is_final);
    }

    #[test]
    fn final_tally_is_protected_from_non_final_recount() {
        let ledger = NullLedger::new();
        seed_election(&ledger, "e1", ElectionStatus::Ended);
        let final_tally = run(&ledger, |ctx| compute_final_tally(ctx, "e1")).unwrap();
        assert_eq!(final_tally.id, "final_tally_e1");
        assert!(final_tally.is_final);
        assert_eq!(ledger.events_named(events::FINAL_TALLY_COMPUTED).len(), 1);
        assert_eq!(ledger.events_named(events::TALLY_COMPUTED).len(), 1);

        let err = run(&ledger, |ctx| compute_vote_tally(ctx, "final_tally_e1", "e1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Recomputing the final tally itself is allowed.
        run(&ledger, |ctx| compute_final_tally(ctx, "e1")).unwrap();
        let results = run(&ledger, |ctx| get_election_results(ctx, "e1")).unwrap();
        assert!(results.is_final);
    }

    #[test]
    fn tally_id_cannot_be_reused_across_elections() {
        let ledger = NullLedger::new();
        seed_election(&ledger, "e1", ElectionStatus::Live);
        seed_election(&ledger, "e2", ElectionStatus::Live);
        run(&ledger, |ctx| compute_vote_tally(ctx, "shared", "e1")).unwrap();
        let err = run(&ledger, |ctx| compute_vote_tally(ctx, "shared", "e2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn results_are_not_found_before_finalisation() {
        let ledger = NullLedger::new();
        seed_election(&ledger, "e1", ElectionStatus::Live);
        run(&ledger, |ctx| compute_vote_tally(ctx, "t1", "e1")).unwrap();
        let err = run(&ledger, |ctx| get_election_results(ctx, "e1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
