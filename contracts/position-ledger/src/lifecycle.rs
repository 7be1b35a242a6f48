use soroban_sdk::{Address, Env};

use crate::adapter::PoolAdapter;
use crate::constants::*;
use crate::errors::Error;
use crate::events::*;
use crate::gateway;
use crate::helpers::*;
use crate::storage::*;

pub fn create_position(
    env: &Env,
    owner: Address,
    collateral_asset: Address,
    collateral_amount: u128,
    borrow_asset: Address,
    borrow_amount: u128,
    interest_rate_mode: InterestRateMode,
) -> Result<u64, Error> {
    owner.require_auth();
    ensure_amount(collateral_amount)?;
    let pool = PoolAdapter::load(env)?;

    gateway::pull(env, &collateral_asset, &owner, collateral_amount)?;
    pool.supply(&collateral_asset, collateral_amount, &owner)?;

    // A zero borrow is a plain deposit; no minimal-debt workaround.
    if borrow_amount > 0 {
        let received = pool.borrow(&borrow_asset, borrow_amount, interest_rate_mode, &owner)?;
        gateway::push(env, &borrow_asset, &owner, received)?;
        add_total(env, &DataKey::TotalBorrowed(borrow_asset.clone()), borrow_amount);
    }

    let id = next_position_id(env)?;
    let position = Position {
        id,
        owner: owner.clone(),
        collateral_asset: collateral_asset.clone(),
        collateral_amount,
        borrow_asset: borrow_asset.clone(),
        borrow_amount,
        interest_rate_mode,
        active: true,
        opened_at: env.ledger().timestamp(),
    };
    save_position(env, &position);
    push_user_position(env, DataKey::UserPositions(owner.clone()), id)?;
    increment_counter(env, &DataKey::ActivePositions);

    PositionCreated {
        id,
        owner,
        collateral_asset,
        collateral_amount,
        borrow_asset,
        borrow_amount,
        interest_rate_mode,
    }
    .publish(env);
    Ok(id)
}

pub fn add_collateral(env: &Env, owner: Address, id: u64, amount: u128) -> Result<(), Error> {
    let mut position = owned_position(env, &owner, id)?;
    ensure_amount(amount)?;
    let pool = PoolAdapter::load(env)?;

    gateway::pull(env, &position.collateral_asset, &owner, amount)?;
    // Supply is never capped by the pool, so the requested amount is what was booked.
    pool.supply(&position.collateral_asset, amount, &position.owner)?;
    position.collateral_amount = position
        .collateral_amount
        .checked_add(amount)
        .ok_or(Error::InvalidAmount)?;
    save_position(env, &position);

    CollateralAdded {
        id,
        amount,
        collateral_amount: position.collateral_amount,
    }
    .publish(env);
    Ok(())
}

pub fn withdraw_collateral(env: &Env, owner: Address, id: u64, amount: u128) -> Result<u128, Error> {
    let mut position = owned_position(env, &owner, id)?;
    let requested = resolve_amount(amount, WITHDRAW_ALL, position.collateral_amount);
    ensure_amount(requested)?;
    if requested > position.collateral_amount {
        return Err(Error::AmountExceedsPosition);
    }
    let pool = PoolAdapter::load(env)?;

    let withdrawn = pool.withdraw(&position.collateral_asset, requested, &owner, &owner)?;
    position.collateral_amount = position.collateral_amount.saturating_sub(withdrawn);
    save_position(env, &position);

    CollateralWithdrawn {
        id,
        amount: withdrawn,
        collateral_amount: position.collateral_amount,
    }
    .publish(env);
    Ok(withdrawn)
}

pub fn increase_borrow(env: &Env, owner: Address, id: u64, amount: u128) -> Result<(), Error> {
    let mut position = owned_position(env, &owner, id)?;
    ensure_amount(amount)?;
    let pool = PoolAdapter::load(env)?;

    let received = pool.borrow(
        &position.borrow_asset,
        amount,
        position.interest_rate_mode,
        &owner,
    )?;
    gateway::push(env, &position.borrow_asset, &owner, received)?;
    position.borrow_amount = position
        .borrow_amount
        .checked_add(amount)
        .ok_or(Error::InvalidAmount)?;
    add_total(env, &DataKey::TotalBorrowed(position.borrow_asset.clone()), amount);
    save_position(env, &position);

    DebtIncreased {
        id,
        amount,
        borrow_amount: position.borrow_amount,
    }
    .publish(env);
    Ok(())
}

pub fn repay_debt(env: &Env, owner: Address, id: u64, amount: u128) -> Result<u128, Error> {
    let mut position = owned_position(env, &owner, id)?;
    let requested = resolve_amount(amount, REPAY_ALL, position.borrow_amount);
    ensure_amount(requested)?;
    let pool = PoolAdapter::load(env)?;

    let repaid = repay_through_pool(env, &pool, &position, &owner, requested)?;
    book_repayment(env, &mut position, repaid);
    save_position(env, &position);

    DebtRepaid {
        id,
        payer: owner,
        amount: repaid,
        borrow_amount: position.borrow_amount,
    }
    .publish(env);
    Ok(repaid)
}

pub fn close_position(env: &Env, owner: Address, id: u64) -> Result<(), Error> {
    let mut position = owned_position(env, &owner, id)?;
    close(env, &mut position, &owner, false, false)
}

/// Shared close path for owner and admin closes.
///
/// `payer` funds the repayment; collateral always goes back to the position
/// owner. With `emergency` the repay step is skipped, the tracked debt is
/// dropped from the ledger even though the pool may still hold it, and a
/// refused collateral withdrawal is recorded as nothing returned.
pub(crate) fn close(
    env: &Env,
    position: &mut Position,
    payer: &Address,
    by_admin: bool,
    emergency: bool,
) -> Result<(), Error> {
    let pool = PoolAdapter::load(env)?;
    let tracked_debt = position.borrow_amount;

    let mut repaid = 0u128;
    if !emergency && tracked_debt > 0 {
        repaid = repay_through_pool(env, &pool, position, payer, tracked_debt)?;
    }

    let mut returned = 0u128;
    if position.collateral_amount > 0 {
        let withdrawn = pool.withdraw(
            &position.collateral_asset,
            position.collateral_amount,
            &position.owner,
            &position.owner,
        );
        returned = match withdrawn {
            Ok(amount) => amount,
            // Collateral the pool holds back stays in the owner's pool account.
            Err(_) if emergency => 0,
            Err(err) => return Err(err),
        };
    }

    sub_total(env, &DataKey::TotalBorrowed(position.borrow_asset.clone()), tracked_debt);
    position.collateral_amount = 0;
    position.borrow_amount = 0;
    position.active = false;
    save_position(env, position);
    decrement_counter(env, &DataKey::ActivePositions);

    PositionClosed {
        id: position.id,
        owner: position.owner.clone(),
        collateral_returned: returned,
        debt_repaid: repaid,
        debt_written_off: tracked_debt.saturating_sub(repaid),
        by_admin,
        emergency,
    }
    .publish(env);
    Ok(())
}

/// Pulls `amount` from `payer`, repays the position's debt and refunds whatever
/// the pool did not take. Returns the pool's repaid amount.
fn repay_through_pool(
    env: &Env,
    pool: &PoolAdapter,
    position: &Position,
    payer: &Address,
    amount: u128,
) -> Result<u128, Error> {
    gateway::pull(env, &position.borrow_asset, payer, amount)?;
    let repaid = pool.repay(
        &position.borrow_asset,
        amount,
        position.interest_rate_mode,
        &position.owner,
    )?;
    gateway::push(env, &position.borrow_asset, payer, amount.saturating_sub(repaid))?;
    Ok(repaid)
}

fn book_repayment(env: &Env, position: &mut Position, repaid: u128) {
    let booked = repaid.min(position.borrow_amount);
    position.borrow_amount -= booked;
    sub_total(env, &DataKey::TotalBorrowed(position.borrow_asset.clone()), booked);
}
