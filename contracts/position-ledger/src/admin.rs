use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events::{AdminUpdated, PoolUpdated};
use crate::helpers::*;
use crate::lifecycle;
use crate::storage::*;

pub fn initialize(env: &Env, admin: Address, pool: Address) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::Initialized) {
        return Err(Error::AlreadyInitialized);
    }
    admin.require_auth();
    set_admin(env, &admin);
    set_pool(env, &pool);
    write_counter(env, &DataKey::PositionCounter, 0);
    write_counter(env, &DataKey::SupplyPositionCounter, 0);
    write_counter(env, &DataKey::ActivePositions, 0);
    write_counter(env, &DataKey::ActiveSupplyPositions, 0);
    env.storage().instance().set(&DataKey::Initialized, &true);
    bump_core_ttl(env);
    Ok(())
}

pub fn update_admin(env: &Env, admin: Address, new_admin: Address) -> Result<(), Error> {
    ensure_admin(env, &admin)?;
    new_admin.require_auth();
    set_admin(env, &new_admin);
    AdminUpdated { admin: new_admin }.publish(env);
    Ok(())
}

pub fn update_pool(env: &Env, admin: Address, pool: Address) -> Result<(), Error> {
    ensure_admin(env, &admin)?;
    set_pool(env, &pool);
    PoolUpdated { pool }.publish(env);
    Ok(())
}

/// Closes any user's position on behalf of the contract owner.
///
/// Normal mode repays the tracked debt with the admin's funds and returns the
/// collateral to the position owner. `emergency_close` skips repayment entirely
/// and writes the tracked debt off the ledger: this breaks the rule that the
/// ledger mirrors the pool, and is meant only for positions the pool refuses to
/// settle (typically dust debt it reports as "no debt of selected type"). If the
/// pool also refuses to release the collateral, it stays in the owner's pool
/// account and the position is closed anyway.
pub fn admin_close_position(
    env: &Env,
    admin: Address,
    id: u64,
    emergency_close: bool,
) -> Result<(), Error> {
    ensure_admin(env, &admin)?;
    let mut position = load_position(env, id)?;
    ensure_active(position.active)?;
    lifecycle::close(env, &mut position, &admin, true, emergency_close)
}
