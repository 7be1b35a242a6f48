use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

use crate::adapter::PoolAdapter;
use crate::errors::Error;
use crate::helpers::*;
use crate::storage::*;
use crate::{admin, lifecycle, liquidation, supply};

#[contract]
pub struct PositionLedger;

#[contractimpl]
impl PositionLedger {
    pub fn initialize(env: Env, admin: Address, pool: Address) -> Result<(), Error> {
        admin::initialize(&env, admin, pool)
    }

    pub fn set_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), Error> {
        bump_core_ttl(&env);
        admin::update_admin(&env, admin, new_admin)
    }

    pub fn set_pool(env: Env, admin: Address, pool: Address) -> Result<(), Error> {
        bump_core_ttl(&env);
        admin::update_pool(&env, admin, pool)
    }

    pub fn upgrade_wasm(env: Env, admin: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        bump_core_ttl(&env);
        ensure_admin(&env, &admin)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // Borrow-coupled positions

    pub fn create_position(
        env: Env,
        owner: Address,
        collateral_asset: Address,
        collateral_amount: u128,
        borrow_asset: Address,
        borrow_amount: u128,
        interest_rate_mode: InterestRateMode,
    ) -> Result<u64, Error> {
        bump_core_ttl(&env);
        lifecycle::create_position(
            &env,
            owner,
            collateral_asset,
            collateral_amount,
            borrow_asset,
            borrow_amount,
            interest_rate_mode,
        )
    }

    pub fn add_collateral(env: Env, owner: Address, id: u64, amount: u128) -> Result<(), Error> {
        bump_core_ttl(&env);
        lifecycle::add_collateral(&env, owner, id, amount)
    }

    /// Pass `WITHDRAW_ALL` to withdraw everything the position tracks.
    /// Returns the amount the pool released.
    pub fn withdraw_collateral(
        env: Env,
        owner: Address,
        id: u64,
        amount: u128,
    ) -> Result<u128, Error> {
        bump_core_ttl(&env);
        lifecycle::withdraw_collateral(&env, owner, id, amount)
    }

    pub fn increase_borrow(env: Env, owner: Address, id: u64, amount: u128) -> Result<(), Error> {
        bump_core_ttl(&env);
        lifecycle::increase_borrow(&env, owner, id, amount)
    }

    /// Returns the amount the pool accepted; any excess is refunded.
    pub fn repay_debt(env: Env, owner: Address, id: u64, amount: u128) -> Result<u128, Error> {
        bump_core_ttl(&env);
        lifecycle::repay_debt(&env, owner, id, amount)
    }

    pub fn close_position(env: Env, owner: Address, id: u64) -> Result<(), Error> {
        bump_core_ttl(&env);
        lifecycle::close_position(&env, owner, id)
    }

    pub fn liquidate_position(
        env: Env,
        liquidator: Address,
        id: u64,
        debt_to_cover: u128,
        receive_a_token: bool,
    ) -> Result<(u128, u128), Error> {
        bump_core_ttl(&env);
        liquidation::liquidate_position(&env, liquidator, id, debt_to_cover, receive_a_token)
    }

    pub fn admin_close_position(
        env: Env,
        admin: Address,
        id: u64,
        emergency_close: bool,
    ) -> Result<(), Error> {
        bump_core_ttl(&env);
        admin::admin_close_position(&env, admin, id, emergency_close)
    }

    // Supply-only positions

    pub fn supply(env: Env, owner: Address, asset: Address, amount: u128) -> Result<u64, Error> {
        bump_core_ttl(&env);
        supply::supply(&env, owner, asset, amount)
    }

    pub fn increase_supply(env: Env, owner: Address, id: u64, amount: u128) -> Result<(), Error> {
        bump_core_ttl(&env);
        supply::increase_supply(&env, owner, id, amount)
    }

    pub fn withdraw_supply(env: Env, owner: Address, id: u64, amount: u128) -> Result<u128, Error> {
        bump_core_ttl(&env);
        supply::withdraw_supply(&env, owner, id, amount)
    }

    pub fn close_supply_position(env: Env, owner: Address, id: u64) -> Result<(), Error> {
        bump_core_ttl(&env);
        supply::close_supply_position(&env, owner, id)
    }

    // Queries

    pub fn get_position_details(env: Env, id: u64) -> Result<Position, Error> {
        load_position(&env, id)
    }

    pub fn get_user_positions(env: Env, owner: Address) -> Vec<u64> {
        let key = DataKey::UserPositions(owner);
        bump_key_ttl(&env, &key);
        user_positions(&env, &key)
    }

    pub fn get_supply_position_details(env: Env, id: u64) -> Result<SupplyPosition, Error> {
        load_supply_position(&env, id)
    }

    pub fn get_user_supply_positions(env: Env, owner: Address) -> Vec<u64> {
        let key = DataKey::UserSupplyPositions(owner);
        bump_key_ttl(&env, &key);
        user_positions(&env, &key)
    }

    /// Health factor the pool reports for `user`, scaled 1e18.
    pub fn get_health_factor(env: Env, user: Address) -> Result<u128, Error> {
        Ok(PoolAdapter::load(&env)?.account_data(&user)?.health_factor)
    }

    pub fn get_account_data(env: Env, user: Address) -> Result<AccountData, Error> {
        PoolAdapter::load(&env)?.account_data(&user)
    }

    pub fn total_active_positions(env: Env) -> u64 {
        read_counter(&env, &DataKey::ActivePositions)
    }

    pub fn total_active_supply_positions(env: Env) -> u64 {
        read_counter(&env, &DataKey::ActiveSupplyPositions)
    }

    pub fn total_borrowed_by_asset(env: Env, asset: Address) -> u128 {
        read_total(&env, &DataKey::TotalBorrowed(asset))
    }

    pub fn total_supplied_by_asset(env: Env, asset: Address) -> u128 {
        read_total(&env, &DataKey::TotalSupplied(asset))
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        get_admin(&env)
    }

    pub fn get_pool(env: Env) -> Result<Address, Error> {
        get_pool(&env)
    }
}
