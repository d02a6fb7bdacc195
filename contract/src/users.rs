//! User registration, lookup and moderation.

use ballot_store::keys::{user_key, USER_PREFIX};
use ballot_types::{Role, User, UserStatus};

use crate::auth::{self, MODERATORS};
use crate::context::TxContext;
use crate::revocation;
use crate::ContractError;

/// Parse a role a caller asks to grant. `admin` is never grantable.
fn grantable_role(role: &str) -> Result<Role, ContractError> {
    let role: Role = role.parse()?;
    if !role.is_registrable() {
        return Err(ContractError::Validation(format!(
            "role {role} cannot be granted through the contract"
        )));
    }
    Ok(role)
}

pub fn register_user(
    ctx: &mut TxContext<'_>,
    id: &str,
    governorate: &str,
    role: &str,
) -> Result<User, ContractError> {
    if id.is_empty() {
        return Err(ContractError::Validation("user ID must not be empty".into()));
    }
    let key = user_key(id);
    if ctx.exists(&key)? {
        return Err(ContractError::already_exists("user", id));
    }
    let role = grantable_role(role)?;

    let user = User::new(id, governorate, role);
    ctx.put_state(&key, &user)?;
    tracing::info!(user_id = id, governorate, role = %role, "user registered");
    Ok(user)
}

pub fn get_user(ctx: &mut TxContext<'_>, id: &str) -> Result<User, ContractError> {
    ctx.get_state(&user_key(id))?
        .ok_or_else(|| ContractError::not_found("user", id))
}

/// Every user, in ledger key order.
pub fn get_all_users(ctx: &mut TxContext<'_>) -> Result<Vec<User>, ContractError> {
    let users = ctx.scan_prefix(USER_PREFIX)?;
    Ok(users.into_iter().map(|(_, u)| u).collect())
}

pub fn set_user_role(ctx: &mut TxContext<'_>, id: &str, role: &str) -> Result<User, ContractError> {
    let admin = auth::require_admin(ctx, "setting user roles")?;
    let role = grantable_role(role)?;
    let mut user = get_user(ctx, id)?;

    let previous = user.role;
    user.role = role;
    ctx.put_state(&user_key(id), &user)?;
    tracing::info!(user_id = id, from = %previous, to = %role, by = %admin.id, "user role changed");
    Ok(user)
}

/// Set a user's status. Suspending also appends a revocation record in the
/// same transaction.
pub fn update_user_status(
    ctx: &mut TxContext<'_>,
    id: &str,
    status: &str,
    reason: &str,
) -> Result<User, ContractError> {
    let moderator = auth::require_role(ctx, MODERATORS, "updating user status")?;
    let status: UserStatus = status.parse()?;
    let mut user = get_user(ctx, id)?;

    user.status = status;
    ctx.put_state(&user_key(id), &user)?;
    match status {
        UserStatus::Suspended => {
            revocation::record_user_revocation(ctx, id, reason)?;
        }
        UserStatus::Active => {}
    }
    tracing::info!(user_id = id, status = %status, by = %moderator.id, "user status updated");
    Ok(user)
}
