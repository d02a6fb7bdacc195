//! Append-only log of user suspensions.
//!
//! Records live under the composite key `("revocation", [user_id, tx_id])`,
//! so repeated suspensions of one user never overwrite each other.

use ballot_store::keys::REVOCATION_OBJECT_TYPE;
use ballot_store::make_composite_key;
use ballot_types::UserRevocation;

use crate::auth::{self, MODERATORS};
use crate::context::TxContext;
use crate::ContractError;

/// Stage a revocation record for `user_id`, revoked by the caller.
pub(crate) fn record_user_revocation(
    ctx: &mut TxContext<'_>,
    user_id: &str,
    reason: &str,
) -> Result<UserRevocation, ContractError> {
    let revoked_by = ctx.caller_id()?;
    let key = make_composite_key(REVOCATION_OBJECT_TYPE, &[user_id, ctx.tx_id()])?;
    if ctx.exists(&key)? {
        return Err(ContractError::Conflict(format!(
            "revocation for user {user_id} already recorded in transaction {}",
            ctx.tx_id()
        )));
    }

    let revocation = UserRevocation {
        user_id: user_id.to_string(),
        reason: reason.to_string(),
        timestamp: ctx.timestamp(),
        revoked_by,
    };
    ctx.put_state(&key, &revocation)?;
    tracing::info!(
        user_id,
        revoked_by = %revocation.revoked_by,
        at = %revocation.timestamp,
        "user revocation recorded"
    );
    Ok(revocation)
}

/// Every revocation record, ordered by user then transaction id.
pub fn get_user_revocations(ctx: &mut TxContext<'_>) -> Result<Vec<UserRevocation>, ContractError> {
    auth::require_role(ctx, MODERATORS, "viewing revocations")?;
    let records = ctx.scan_composite(REVOCATION_OBJECT_TYPE, &[])?;
    Ok(records.into_iter().map(|(_, r)| r).collect())
}
