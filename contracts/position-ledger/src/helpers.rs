use soroban_sdk::{Address, Env};

use crate::constants::*;
use crate::errors::Error;
use crate::storage::*;

// Authorization guards. Each entry point composes exactly one of these.

/// Contract-owner capability: stored admin, authorized.
pub fn ensure_admin(env: &Env, admin: &Address) -> Result<(), Error> {
    let stored = get_admin(env)?;
    if stored != *admin {
        return Err(Error::NotAdmin);
    }
    admin.require_auth();
    Ok(())
}

/// Position-owner capability: the caller authorizes and must own the active record.
pub fn owned_position(env: &Env, owner: &Address, id: u64) -> Result<Position, Error> {
    owner.require_auth();
    let position = load_position(env, id)?;
    if position.owner != *owner {
        return Err(Error::NotOwner);
    }
    ensure_active(position.active)?;
    Ok(position)
}

pub fn owned_supply_position(
    env: &Env,
    owner: &Address,
    id: u64,
) -> Result<SupplyPosition, Error> {
    owner.require_auth();
    let position = load_supply_position(env, id)?;
    if position.owner != *owner {
        return Err(Error::NotOwner);
    }
    ensure_active(position.active)?;
    Ok(position)
}

/// Any-caller capability: only proof that the caller signed.
pub fn ensure_caller(caller: &Address) {
    caller.require_auth();
}

pub fn ensure_active(active: bool) -> Result<(), Error> {
    if active {
        Ok(())
    } else {
        Err(Error::PositionInactive)
    }
}

pub fn ensure_amount(amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}

/// Resolves an "everything" sentinel against what the position tracks.
pub fn resolve_amount(requested: u128, sentinel: u128, tracked: u128) -> u128 {
    if requested == sentinel {
        tracked
    } else {
        requested
    }
}

pub fn next_position_id(env: &Env) -> Result<u64, Error> {
    next_id(env, &DataKey::PositionCounter)
}

pub fn next_supply_position_id(env: &Env) -> Result<u64, Error> {
    next_id(env, &DataKey::SupplyPositionCounter)
}

fn next_id(env: &Env, key: &DataKey) -> Result<u64, Error> {
    let id = read_counter(env, key)
        .checked_add(1)
        .ok_or(Error::TooManyPositions)?;
    write_counter(env, key, id);
    Ok(id)
}

/// Appends to an owner index. Indexes never shrink.
pub fn push_user_position(env: &Env, key: DataKey, id: u64) -> Result<(), Error> {
    let mut positions = user_positions(env, &key);
    if positions.len() >= MAX_USER_POSITIONS {
        return Err(Error::TooManyPositions);
    }
    positions.push_back(id);
    env.storage().persistent().set(&key, &positions);
    bump_key_ttl(env, &key);
    Ok(())
}

pub fn increment_counter(env: &Env, key: &DataKey) {
    let value = read_counter(env, key);
    write_counter(env, key, value.saturating_add(1));
}

pub fn decrement_counter(env: &Env, key: &DataKey) {
    let value = read_counter(env, key);
    write_counter(env, key, value.saturating_sub(1));
}

pub fn add_total(env: &Env, key: &DataKey, amount: u128) {
    let value = read_total(env, key);
    write_total(env, key, value.saturating_add(amount));
}

pub fn sub_total(env: &Env, key: &DataKey, amount: u128) {
    let value = read_total(env, key);
    write_total(env, key, value.saturating_sub(amount));
}

pub fn bump_core_ttl(env: &Env) {
    for key in [
        DataKey::Admin,
        DataKey::Pool,
        DataKey::PositionCounter,
        DataKey::SupplyPositionCounter,
        DataKey::ActivePositions,
        DataKey::ActiveSupplyPositions,
    ] {
        bump_key_ttl(env, &key);
    }
    if env.storage().instance().has(&DataKey::Initialized) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

pub fn bump_position_ttl(env: &Env, id: u64) {
    bump_key_ttl(env, &DataKey::Position(id));
}

pub fn bump_supply_position_ttl(env: &Env, id: u64) {
    bump_key_ttl(env, &DataKey::SupplyPosition(id));
}

pub fn bump_key_ttl(env: &Env, key: &DataKey) {
    let persistent = env.storage().persistent();
    if persistent.has(key) {
        persistent.extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
