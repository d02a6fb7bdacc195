//! By-name invocation, the way ledger clients address the contract.
//!
//! Arguments arrive as strings; `CreateElection` takes a single JSON
//! [`ElectionInput`](ballot_types::ElectionInput). Results are JSON bytes.

use serde::Serialize;

use ballot_store::LedgerStore;
use ballot_types::ElectionInput;

use crate::contract::{Prepared, VotingContract};
use crate::context::{Invocation, TxContext};
use crate::{auth, elections, revocation, tally, users, votes, ContractError};

/// Functions that only read state.
const QUERIES: &[&str] = &[
    "GetUser",
    "GetAllUsers",
    "IsUserAdmin",
    "GetElection",
    "GetAllElections",
    "GetVote",
    "GetAllVotes",
    "GetVoteTally",
    "GetElectionResults",
    "GetUserRevocations",
];

pub fn is_query(function: &str) -> bool {
    QUERIES.contains(&function)
}

impl<S: LedgerStore> VotingContract<S> {
    /// Invoke `function` by name. Mutating functions commit on success.
    pub fn invoke(
        &self,
        invocation: &Invocation,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, ContractError> {
        if is_query(function) {
            return self.evaluate(invocation, |ctx| self.route(ctx, function, args));
        }
        let prepared = self.prepare_invoke(invocation, function, args)?;
        self.commit(prepared).map_err(|e| {
            tracing::warn!(tx_id = %invocation.tx_id, function, error = %e, "commit rejected");
            e
        })
    }

    /// Run `function` and return its output with the uncommitted batch.
    pub fn prepare_invoke(
        &self,
        invocation: &Invocation,
        function: &str,
        args: &[&str],
    ) -> Result<Prepared<Vec<u8>>, ContractError> {
        self.prepare(invocation, |ctx| self.route(ctx, function, args))
    }

    fn route(
        &self,
        ctx: &mut TxContext<'_>,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, ContractError> {
        tracing::trace!(function, args = args.len(), tx_id = ctx.tx_id(), "dispatch");
        match function {
            "RegisterUser" => {
                let [id, governorate, role] = arity::<3>(function, args)?;
                to_json(&users::register_user(ctx, id, governorate, role)?)
            }
            "GetUser" => {
                let [id] = arity::<1>(function, args)?;
                to_json(&users::get_user(ctx, id)?)
            }
            "GetAllUsers" => {
                let [] = arity::<0>(function, args)?;
                to_json(&users::get_all_users(ctx)?)
            }
            "SetUserRole" => {
                let [id, role] = arity::<2>(function, args)?;
                to_json(&users::set_user_role(ctx, id, role)?)
            }
            "UpdateUserStatus" => {
                let [id, status, reason] = arity::<3>(function, args)?;
                to_json(&users::update_user_status(ctx, id, status, reason)?)
            }
            "IsUserAdmin" => {
                let [] = arity::<0>(function, args)?;
                to_json(&auth::is_admin(ctx)?)
            }
            "CreateElection" => {
                let [json] = arity::<1>(function, args)?;
                let input: ElectionInput = serde_json::from_str(json).map_err(|e| {
                    ContractError::Validation(format!("failed to parse election input: {e}"))
                })?;
                to_json(&elections::create_election(ctx, input)?)
            }
            "GetElection" => {
                let [id] = arity::<1>(function, args)?;
                to_json(&elections::get_election(ctx, id)?)
            }
            "GetAllElections" => {
                let [] = arity::<0>(function, args)?;
                to_json(&elections::get_all_elections(ctx)?)
            }
            "UpdateElectionStatus" => {
                let [id, status] = arity::<2>(function, args)?;
                to_json(&elections::update_election_status(ctx, id, status)?)
            }
            "ClearElections" => {
                let [] = arity::<0>(function, args)?;
                to_json(&elections::clear_elections(ctx)?)
            }
            "CastVote" => {
                let [vote_id, election_id, candidate_id] = arity::<3>(function, args)?;
                to_json(&votes::cast_vote(
                    ctx,
                    self.config(),
                    vote_id,
                    election_id,
                    candidate_id,
                )?)
            }
            "GetVote" => {
                let [vote_id] = arity::<1>(function, args)?;
                to_json(&votes::get_vote(ctx, vote_id)?)
            }
            "GetAllVotes" => {
                let [] = arity::<0>(function, args)?;
                to_json(&votes::get_all_votes(ctx)?)
            }
            "ComputeVoteTally" => {
                let [tally_id, election_id] = arity::<2>(function, args)?;
                to_json(&tally::compute_vote_tally(ctx, tally_id, election_id)?)
            }
            "ComputeFinalTally" => {
                let [election_id] = arity::<1>(function, args)?;
                to_json(&tally::compute_final_tally(ctx, election_id)?)
            }
            "GetVoteTally" => {
                let [tally_id] = arity::<1>(function, args)?;
                to_json(&tally::get_vote_tally(ctx, tally_id)?)
            }
            "GetElectionResults" => {
                let [election_id] = arity::<1>(function, args)?;
                to_json(&tally::get_election_results(ctx, election_id)?)
            }
            "GetUserRevocations" => {
                let [] = arity::<0>(function, args)?;
                to_json(&revocation::get_user_revocations(ctx)?)
            }
            other => Err(ContractError::Validation(format!(
                "unknown function {other}"
            ))),
        }
    }
}

fn arity<'a, const N: usize>(function: &str, args: &[&'a str]) -> Result<[&'a str; N], ContractError> {
    <[&'a str; N]>::try_from(args).map_err(|_| {
        ContractError::Validation(format!(
            "{function} expects {N} arguments, got {}",
            args.len()
        ))
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    Ok(serde_json::to_vec(value)?)
}
