//! Ballot casting.
//!
//! Every check in [`cast_vote`] runs before anything is staged. The voter's
//! user record is both read and rewritten, so two concurrent ballots from the
//! same voter conflict at commit and only one lands.

use ballot_crypto::vote_receipt;
use ballot_store::keys::{user_key, vote_key, VOTE_PREFIX};
use ballot_types::{User, Vote};

use crate::config::ContractConfig;
use crate::context::TxContext;
use crate::elections::get_election;
use crate::events;
use crate::ContractError;

/// Cast the caller's ballot. Returns the vote receipt.
pub fn cast_vote(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    vote_id: &str,
    election_id: &str,
    candidate_id: &str,
) -> Result<String, ContractError> {
    let election = get_election(ctx, election_id)?;
    if config.require_live_election && !election.status.accepts_votes() {
        return Err(ContractError::Validation(format!(
            "election {election_id} is {} and not accepting votes",
            election.status
        )));
    }

    let voter_id = ctx.caller_id()?;
    let mut voter: User = ctx
        .get_state(&user_key(&voter_id))?
        .ok_or_else(|| ContractError::not_found("registered user", &voter_id))?;
    if !voter.status.can_vote() {
        return Err(ContractError::Validation(format!(
            "user account {voter_id} is not active"
        )));
    }
    if voter.has_voted_in(election_id) {
        return Err(ContractError::Conflict(format!(
            "user {voter_id} has already voted in election {election_id}"
        )));
    }
    if !election.is_eligible(&voter.governorate) {
        return Err(ContractError::Authorization(format!(
            "user from {} is not eligible to vote in election {election_id}",
            voter.governorate
        )));
    }
    if !election.has_candidate(candidate_id) {
        return Err(ContractError::Validation(format!(
            "invalid candidate ID: {candidate_id} for election {election_id}"
        )));
    }
    if vote_id.is_empty() {
        return Err(ContractError::Validation("vote ID must not be empty".into()));
    }
    let key = vote_key(vote_id);
    if ctx.exists(&key)? {
        return Err(ContractError::already_exists("vote", vote_id));
    }

    let receipt = vote_receipt(vote_id, election_id, candidate_id);
    let vote = Vote {
        vote_id: vote_id.to_string(),
        voter_id,
        election_id: election_id.to_string(),
        candidate_id: candidate_id.to_string(),
        receipt: receipt.clone(),
        created_at: ctx.timestamp(),
    };
    voter.record_vote(election_id);

    ctx.put_state(&key, &vote)?;
    ctx.put_state(&user_key(&voter.id), &voter)?;
    ctx.emit_event(events::VOTE_CAST, &vote)?;
    tracing::info!(vote_id, election_id, voter = %vote.voter_id, "vote cast");
    Ok(receipt)
}

pub fn get_vote(ctx: &mut TxContext<'_>, vote_id: &str) -> Result<Vote, ContractError> {
    ctx.get_state(&vote_key(vote_id))?
        .ok_or_else(|| ContractError::not_found("vote", vote_id))
}

pub fn get_all_votes(ctx: &mut TxContext<'_>) -> Result<Vec<Vote>, ContractError> {
    let votes = ctx.scan_prefix(VOTE_PREFIX)?;
    Ok(votes.into_iter().map(|(_, v)| v).collect())
}
