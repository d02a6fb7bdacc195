//! Election creation, lookup and lifecycle.
//!
//! The status transition graph is deliberately open: any assignable status
//! may follow any other. Sequencing is enforced by the external scheduler.

use ballot_store::keys::{election_key, ELECTION_PREFIX};
use ballot_types::{Election, ElectionInput, ElectionStatus};

use crate::auth;
use crate::context::TxContext;
use crate::events::{self, ElectionStatusChanged};
use crate::ContractError;

pub fn create_election(
    ctx: &mut TxContext<'_>,
    input: ElectionInput,
) -> Result<Election, ContractError> {
    let missing = input.missing_fields();
    if !missing.is_empty() {
        return Err(ContractError::Validation(format!(
            "missing required fields in election input: {}",
            missing.join(", ")
        )));
    }
    if let Some(dup) = input.duplicate_candidate() {
        return Err(ContractError::Validation(format!(
            "duplicate candidate ID {dup} in election {}",
            input.id
        )));
    }

    let key = election_key(&input.id);
    if ctx.exists(&key)? {
        return Err(ContractError::already_exists("election", input.id));
    }

    let election = input.into_election(ElectionStatus::Active);
    ctx.put_state(&key, &election)?;
    ctx.emit_event(events::ELECTION_CREATED, &election)?;
    tracing::info!(
        election_id = %election.election_id,
        candidates = election.candidates.len(),
        governorates = election.eligible_governorates.len(),
        "election created"
    );
    Ok(election)
}

pub fn get_election(ctx: &mut TxContext<'_>, id: &str) -> Result<Election, ContractError> {
    ctx.get_state(&election_key(id))?
        .ok_or_else(|| ContractError::not_found("the election", id))
}

pub fn get_all_elections(ctx: &mut TxContext<'_>) -> Result<Vec<Election>, ContractError> {
    let elections = ctx.scan_prefix(ELECTION_PREFIX)?;
    Ok(elections.into_iter().map(|(_, e)| e).collect())
}

pub fn update_election_status(
    ctx: &mut TxContext<'_>,
    id: &str,
    new_status: &str,
) -> Result<Election, ContractError> {
    let new_status: ElectionStatus = new_status.parse()?;
    if !new_status.is_assignable() {
        return Err(ContractError::Validation(format!(
            "invalid status {new_status} for election {id}"
        )));
    }
    let mut election = get_election(ctx, id)?;

    let old_status = election.status;
    election.status = new_status;
    let change = ElectionStatusChanged {
        election_id: id.to_string(),
        old_status,
        new_status,
        timestamp: ctx.timestamp(),
    };
    ctx.put_state(&election_key(id), &election)?;
    ctx.emit_event(events::ELECTION_STATUS_CHANGED, &change)?;
    tracing::info!(election_id = id, from = %old_status, to = %new_status, "election status changed");
    Ok(election)
}

/// Delete every election record. Returns how many were removed.
pub fn clear_elections(ctx: &mut TxContext<'_>) -> Result<usize, ContractError> {
    let admin = auth::require_admin(ctx, "clearing elections")?;
    let elections: Vec<(String, Election)> = ctx.scan_prefix(ELECTION_PREFIX)?;
    for (key, _) in &elections {
        ctx.delete_state(key);
    }
    tracing::warn!(count = elections.len(), by = %admin.id, "all elections cleared");
    Ok(elections.len())
}
