use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::Error;
use crate::helpers::{bump_core_ttl, bump_position_ttl, bump_supply_position_ttl};

#[contracttype]
pub enum DataKey {
    Admin,
    Pool,
    PositionCounter,
    SupplyPositionCounter,
    Position(u64),
    SupplyPosition(u64),
    UserPositions(Address),
    UserSupplyPositions(Address),
    ActivePositions,
    ActiveSupplyPositions,
    TotalBorrowed(Address), // debt asset
    TotalSupplied(Address), // supply-only asset
    Initialized,
}

/// Borrow-rate policy forwarded to the pool; discriminants match the pool's encoding.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum InterestRateMode {
    Stable = 1,
    Variable = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub id: u64,
    pub owner: Address,
    pub collateral_asset: Address,
    pub collateral_amount: u128,
    pub borrow_asset: Address,
    pub borrow_amount: u128,
    pub interest_rate_mode: InterestRateMode,
    pub active: bool,
    pub opened_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyPosition {
    pub id: u64,
    pub owner: Address,
    pub asset: Address,
    pub amount: u128,
    pub active: bool,
    pub opened_at: u64,
}

/// Pool-side view of an account. Base-currency values, health factor scaled 1e18.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountData {
    pub total_collateral_base: u128,
    pub total_debt_base: u128,
    pub available_borrows_base: u128,
    pub current_liquidation_threshold: u128,
    pub ltv: u128,
    pub health_factor: u128,
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    bump_core_ttl(env);
    env.storage()
        .persistent()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
}

pub fn get_pool(env: &Env) -> Result<Address, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Pool)
        .ok_or(Error::NotInitialized)
}

pub fn set_pool(env: &Env, pool: &Address) {
    env.storage().persistent().set(&DataKey::Pool, pool);
}

pub fn load_position(env: &Env, id: u64) -> Result<Position, Error> {
    bump_position_ttl(env, id);
    env.storage()
        .persistent()
        .get(&DataKey::Position(id))
        .ok_or(Error::PositionNotFound)
}

pub fn save_position(env: &Env, position: &Position) {
    env.storage()
        .persistent()
        .set(&DataKey::Position(position.id), position);
    bump_position_ttl(env, position.id);
}

pub fn load_supply_position(env: &Env, id: u64) -> Result<SupplyPosition, Error> {
    bump_supply_position_ttl(env, id);
    env.storage()
        .persistent()
        .get(&DataKey::SupplyPosition(id))
        .ok_or(Error::PositionNotFound)
}

pub fn save_supply_position(env: &Env, position: &SupplyPosition) {
    env.storage()
        .persistent()
        .set(&DataKey::SupplyPosition(position.id), position);
    bump_supply_position_ttl(env, position.id);
}

pub fn user_positions(env: &Env, key: &DataKey) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or(Vec::new(env))
}

pub fn read_counter(env: &Env, key: &DataKey) -> u64 {
    env.storage().persistent().get(key).unwrap_or(0u64)
}

pub fn write_counter(env: &Env, key: &DataKey, value: u64) {
    env.storage().persistent().set(key, &value);
}

pub fn read_total(env: &Env, key: &DataKey) -> u128 {
    env.storage().persistent().get(key).unwrap_or(0u128)
}

pub fn write_total(env: &Env, key: &DataKey, value: u128) {
    env.storage().persistent().set(key, &value);
}
