use soroban_sdk::{Address, Env};

use crate::adapter::PoolAdapter;
use crate::constants::WITHDRAW_ALL;
use crate::errors::Error;
use crate::events::*;
use crate::gateway;
use crate::helpers::*;
use crate::storage::*;

pub fn supply(env: &Env, owner: Address, asset: Address, amount: u128) -> Result<u64, Error> {
    owner.require_auth();
    ensure_amount(amount)?;
    let pool = PoolAdapter::load(env)?;

    gateway::pull(env, &asset, &owner, amount)?;
    pool.supply(&asset, amount, &owner)?;

    let id = next_supply_position_id(env)?;
    let position = SupplyPosition {
        id,
        owner: owner.clone(),
        asset: asset.clone(),
        amount,
        active: true,
        opened_at: env.ledger().timestamp(),
    };
    save_supply_position(env, &position);
    push_user_position(env, DataKey::UserSupplyPositions(owner.clone()), id)?;
    increment_counter(env, &DataKey::ActiveSupplyPositions);
    add_total(env, &DataKey::TotalSupplied(asset.clone()), amount);

    SupplyPositionCreated {
        id,
        owner,
        asset,
        amount,
    }
    .publish(env);
    Ok(id)
}

pub fn increase_supply(env: &Env, owner: Address, id: u64, amount: u128) -> Result<(), Error> {
    let mut position = owned_supply_position(env, &owner, id)?;
    ensure_amount(amount)?;
    let pool = PoolAdapter::load(env)?;

    gateway::pull(env, &position.asset, &owner, amount)?;
    pool.supply(&position.asset, amount, &owner)?;
    position.amount = position
        .amount
        .checked_add(amount)
        .ok_or(Error::InvalidAmount)?;
    add_total(env, &DataKey::TotalSupplied(position.asset.clone()), amount);
    save_supply_position(env, &position);

    SupplyIncreased {
        id,
        amount,
        supplied: position.amount,
    }
    .publish(env);
    Ok(())
}

pub fn withdraw_supply(env: &Env, owner: Address, id: u64, amount: u128) -> Result<u128, Error> {
    let mut position = owned_supply_position(env, &owner, id)?;
    let requested = resolve_amount(amount, WITHDRAW_ALL, position.amount);
    ensure_amount(requested)?;
    if requested > position.amount {
        return Err(Error::AmountExceedsPosition);
    }
    let pool = PoolAdapter::load(env)?;

    let withdrawn = pool.withdraw(&position.asset, requested, &owner, &owner)?;
    let booked = withdrawn.min(position.amount);
    position.amount -= booked;
    sub_total(env, &DataKey::TotalSupplied(position.asset.clone()), booked);
    save_supply_position(env, &position);

    SupplyWithdrawn {
        id,
        amount: withdrawn,
        supplied: position.amount,
    }
    .publish(env);
    Ok(withdrawn)
}

pub fn close_supply_position(env: &Env, owner: Address, id: u64) -> Result<(), Error> {
    let mut position = owned_supply_position(env, &owner, id)?;
    let pool = PoolAdapter::load(env)?;

    let mut returned = 0u128;
    if position.amount > 0 {
        returned = pool.withdraw(&position.asset, position.amount, &owner, &owner)?;
    }
    sub_total(env, &DataKey::TotalSupplied(position.asset.clone()), position.amount);
    position.amount = 0;
    position.active = false;
    save_supply_position(env, &position);
    decrement_counter(env, &DataKey::ActiveSupplyPositions);

    SupplyPositionClosed {
        id,
        owner,
        amount_returned: returned,
    }
    .publish(env);
    Ok(())
}
