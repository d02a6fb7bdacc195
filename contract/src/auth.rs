//! Role checks for privileged operations.

use ballot_store::keys::user_key;
use ballot_types::{Role, User};

use crate::context::TxContext;
use crate::ContractError;

/// Roles allowed to moderate users and read the revocation log.
pub const MODERATORS: &[Role] = &[Role::ElectionCommission, Role::Auditor];

/// Load the caller's user record. An unregistered caller is `NotFound`.
pub fn caller(ctx: &mut TxContext<'_>) -> Result<User, ContractError> {
    let caller_id = ctx.caller_id()?;
    ctx.get_state(&user_key(&caller_id))?
        .ok_or_else(|| ContractError::not_found("caller", caller_id))
}

/// The caller, if their role is one of `allowed`.
pub fn require_role(
    ctx: &mut TxContext<'_>,
    allowed: &[Role],
    action: &str,
) -> Result<User, ContractError> {
    let user = caller(ctx)?;
    if !allowed.contains(&user.role) {
        tracing::warn!(caller = %user.id, role = %user.role, action, "role check failed");
        let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
        return Err(ContractError::Authorization(format!(
            "{action} requires one of [{}], caller {} is {}",
            names.join(", "),
            user.id,
            user.role
        )));
    }
    Ok(user)
}

pub fn require_admin(ctx: &mut TxContext<'_>, action: &str) -> Result<User, ContractError> {
    require_role(ctx, &[Role::Admin], action)
}

/// Whether the caller holds the admin role.
pub fn is_admin(ctx: &mut TxContext<'_>) -> Result<bool, ContractError> {
    Ok(caller(ctx)?.role == Role::Admin)
}
