use soroban_sdk::{Address, Env};

use crate::adapter::PoolAdapter;
use crate::errors::Error;
use crate::events::PositionLiquidated;
use crate::helpers::*;
use crate::storage::*;

/// Liquidates part or all of a position through the pool.
///
/// The pool decides eligibility and the seized amount; the liquidator pays the
/// pool directly. One pool account can back several positions of the same
/// owner, so the cover is capped at this position's debt before the call and
/// the reported amounts are clamped to what this position tracks.
pub fn liquidate_position(
    env: &Env,
    liquidator: Address,
    id: u64,
    debt_to_cover: u128,
    receive_a_token: bool,
) -> Result<(u128, u128), Error> {
    ensure_caller(&liquidator);
    ensure_amount(debt_to_cover)?;
    let mut position = load_position(env, id)?;
    ensure_active(position.active)?;
    if position.borrow_amount == 0 {
        return Err(Error::NothingToLiquidate);
    }
    let pool = PoolAdapter::load(env)?;

    let (seized, covered) = pool.liquidation_call(
        &liquidator,
        &position.collateral_asset,
        &position.borrow_asset,
        &position.owner,
        debt_to_cover.min(position.borrow_amount),
        receive_a_token,
    )?;

    let collateral_delta = seized.min(position.collateral_amount);
    let debt_delta = covered.min(position.borrow_amount);
    position.collateral_amount -= collateral_delta;
    position.borrow_amount -= debt_delta;
    sub_total(env, &DataKey::TotalBorrowed(position.borrow_asset.clone()), debt_delta);

    if position.collateral_amount == 0 && position.borrow_amount == 0 {
        position.active = false;
        decrement_counter(env, &DataKey::ActivePositions);
    }
    save_position(env, &position);

    PositionLiquidated {
        id,
        liquidator,
        collateral_seized: seized,
        debt_covered: covered,
        collateral_amount: position.collateral_amount,
        borrow_amount: position.borrow_amount,
        active: position.active,
    }
    .publish(env);
    Ok((seized, covered))
}
