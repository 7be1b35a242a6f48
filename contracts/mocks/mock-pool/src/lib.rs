#![no_std]
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, Vec};

const BPS: u128 = 10_000;
const PRICE_SCALE: u128 = 1_000_000;
const WAD: u128 = 1_000_000_000_000_000_000;
// Below this health factor a single liquidation may cover the whole debt.
const CLOSE_FACTOR_HF_THRESHOLD: u128 = 950_000_000_000_000_000;
const DEFAULT_CLOSE_FACTOR_BPS: u128 = 5_000;

pub const RATE_MODE_STABLE: u32 = 1;
pub const RATE_MODE_VARIABLE: u32 = 2;

#[contracttype]
enum DataKey {
    Admin,
    Reserves,
    Reserve(Address),
    Supplied(Address, Address),  // (user, asset)
    Debt(Address, Address, u32), // (user, asset, rate_mode)
    Delegate(Address, Address),  // (user, delegate)
    DustThreshold,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveConfig {
    pub price: u128,
    pub ltv_bps: u128,
    pub liquidation_threshold_bps: u128,
    pub liquidation_bonus_bps: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserAccountData {
    pub total_collateral_base: u128,
    pub total_debt_base: u128,
    pub available_borrows_base: u128,
    pub current_liquidation_threshold: u128,
    pub ltv: u128,
    pub health_factor: u128,
}

/// Aave-style money market used to exercise the position ledger.
///
/// Prices are scaled by 1e6, health factors by 1e18. Debt at or below the dust
/// threshold is invisible to solvency checks and cannot be repaid.
#[contract]
pub struct MockPool;

#[contractimpl]
impl MockPool {
    pub fn initialize(env: Env, admin: Address) {
        if env.storage().persistent().has(&DataKey::Admin) {
            panic!("already initialized");
        }
        env.storage().persistent().set(&DataKey::Admin, &admin);
        env.storage()
            .persistent()
            .set(&DataKey::Reserves, &Vec::<Address>::new(&env));
    }

    pub fn set_reserve(
        env: Env,
        asset: Address,
        price: u128,
        ltv_bps: u128,
        liquidation_threshold_bps: u128,
        liquidation_bonus_bps: u128,
    ) {
        require_admin(&env);
        if price == 0 {
            panic!("bad price");
        }
        let key = DataKey::Reserve(asset.clone());
        if !env.storage().persistent().has(&key) {
            let mut reserves = reserves(&env);
            reserves.push_back(asset.clone());
            env.storage().persistent().set(&DataKey::Reserves, &reserves);
        }
        let config = ReserveConfig {
            price,
            ltv_bps,
            liquidation_threshold_bps,
            liquidation_bonus_bps,
        };
        env.storage().persistent().set(&key, &config);
    }

    pub fn set_dust_threshold(env: Env, amount: u128) {
        require_admin(&env);
        env.storage()
            .persistent()
            .set(&DataKey::DustThreshold, &amount);
    }

    /// Lets `delegate` withdraw and borrow against `user`'s account.
    pub fn set_delegate(env: Env, user: Address, delegate: Address, approved: bool) {
        user.require_auth();
        env.storage()
            .persistent()
            .set(&DataKey::Delegate(user, delegate), &approved);
    }

    pub fn supply(env: Env, caller: Address, asset: Address, amount: u128, on_behalf_of: Address) {
        caller.require_auth();
        if amount == 0 {
            panic!("bad amount");
        }
        reserve(&env, &asset);
        pull(&env, &asset, &caller, amount);
        let supplied = get_supplied(&env, &on_behalf_of, &asset);
        set_supplied(&env, &on_behalf_of, &asset, supplied.saturating_add(amount));
    }

    pub fn withdraw(
        env: Env,
        caller: Address,
        asset: Address,
        amount: u128,
        on_behalf_of: Address,
        to: Address,
    ) -> u128 {
        caller.require_auth();
        require_operator(&env, &caller, &on_behalf_of);
        let balance = get_supplied(&env, &on_behalf_of, &asset);
        if balance == 0 || amount == 0 {
            panic!("nothing to withdraw");
        }
        let actual = amount.min(balance);
        set_supplied(&env, &on_behalf_of, &asset, balance - actual);
        if account_data(&env, &on_behalf_of).health_factor < WAD {
            panic!("health factor lower than liquidation threshold");
        }
        push(&env, &asset, &to, actual);
        actual
    }

    pub fn borrow(
        env: Env,
        caller: Address,
        asset: Address,
        amount: u128,
        rate_mode: u32,
        on_behalf_of: Address,
    ) {
        caller.require_auth();
        require_operator(&env, &caller, &on_behalf_of);
        require_rate_mode(rate_mode);
        if amount == 0 {
            panic!("bad amount");
        }
        reserve(&env, &asset);
        let liquidity = token::Client::new(&env, &asset).balance(&env.current_contract_address());
        if liquidity < to_i128(amount) {
            panic!("insufficient liquidity");
        }
        let debt = get_debt(&env, &on_behalf_of, &asset, rate_mode);
        set_debt(&env, &on_behalf_of, &asset, rate_mode, debt.saturating_add(amount));
        let (data, capacity) = account_snapshot(&env, &on_behalf_of);
        if data.total_debt_base > capacity {
            panic!("collateral cannot cover new borrow");
        }
        push(&env, &asset, &caller, amount);
    }

    pub fn repay(
        env: Env,
        caller: Address,
        asset: Address,
        amount: u128,
        rate_mode: u32,
        on_behalf_of: Address,
    ) -> u128 {
        caller.require_auth();
        require_rate_mode(rate_mode);
        let debt = get_debt(&env, &on_behalf_of, &asset, rate_mode);
        if debt <= dust_threshold(&env) {
            panic!("no debt of selected type");
        }
        if amount == 0 {
            panic!("bad amount");
        }
        let actual = amount.min(debt);
        pull(&env, &asset, &caller, actual);
        set_debt(&env, &on_behalf_of, &asset, rate_mode, debt - actual);
        actual
    }

    pub fn liquidation_call(
        env: Env,
        liquidator: Address,
        collateral_asset: Address,
        debt_asset: Address,
        user: Address,
        debt_to_cover: u128,
        receive_a_token: bool,
    ) -> (u128, u128) {
        liquidator.require_auth();
        if debt_to_cover == 0 {
            panic!("bad amount");
        }
        let data = account_data(&env, &user);
        if data.health_factor >= WAD {
            panic!("health factor not below threshold");
        }
        let collateral_config = reserve(&env, &collateral_asset);
        let debt_config = reserve(&env, &debt_asset);
        let user_collateral = get_supplied(&env, &user, &collateral_asset);
        if user_collateral == 0 {
            panic!("collateral cannot be liquidated");
        }
        let variable = get_debt(&env, &user, &debt_asset, RATE_MODE_VARIABLE);
        let stable = get_debt(&env, &user, &debt_asset, RATE_MODE_STABLE);
        let total_debt = variable.saturating_add(stable);
        if total_debt == 0 {
            panic!("specified currency not borrowed by user");
        }

        let close_factor = if data.health_factor > CLOSE_FACTOR_HF_THRESHOLD {
            DEFAULT_CLOSE_FACTOR_BPS
        } else {
            BPS
        };
        let max_cover = total_debt.saturating_mul(close_factor) / BPS;
        let bonus = BPS.saturating_add(collateral_config.liquidation_bonus_bps);
        let mut covered = debt_to_cover.min(max_cover);
        let mut seized = covered
            .saturating_mul(debt_config.price)
            .saturating_mul(bonus)
            / BPS
            / collateral_config.price;
        if seized > user_collateral {
            seized = user_collateral;
            covered = user_collateral
                .saturating_mul(collateral_config.price)
                .saturating_mul(BPS)
                / bonus
                / debt_config.price;
        }
        if covered == 0 {
            panic!("liquidation too small");
        }

        pull(&env, &debt_asset, &liquidator, covered);
        let from_variable = covered.min(variable);
        set_debt(&env, &user, &debt_asset, RATE_MODE_VARIABLE, variable - from_variable);
        set_debt(
            &env,
            &user,
            &debt_asset,
            RATE_MODE_STABLE,
            stable.saturating_sub(covered - from_variable),
        );

        set_supplied(&env, &user, &collateral_asset, user_collateral - seized);
        if receive_a_token {
            let credited = get_supplied(&env, &liquidator, &collateral_asset);
            set_supplied(
                &env,
                &liquidator,
                &collateral_asset,
                credited.saturating_add(seized),
            );
        } else {
            push(&env, &collateral_asset, &liquidator, seized);
        }
        (seized, covered)
    }

    pub fn get_user_account_data(env: Env, user: Address) -> UserAccountData {
        account_data(&env, &user)
    }

    pub fn get_supplied(env: Env, user: Address, asset: Address) -> u128 {
        get_supplied(&env, &user, &asset)
    }

    pub fn get_debt(env: Env, user: Address, asset: Address, rate_mode: u32) -> u128 {
        get_debt(&env, &user, &asset, rate_mode)
    }
}

fn require_admin(env: &Env) {
    let admin: Address = env
        .storage()
        .persistent()
        .get(&DataKey::Admin)
        .expect("not initialized");
    admin.require_auth();
}

fn require_operator(env: &Env, caller: &Address, user: &Address) {
    if caller == user {
        return;
    }
    let approved: bool = env
        .storage()
        .persistent()
        .get(&DataKey::Delegate(user.clone(), caller.clone()))
        .unwrap_or(false);
    if !approved {
        panic!("caller is not a delegate");
    }
}

fn require_rate_mode(rate_mode: u32) {
    if rate_mode != RATE_MODE_STABLE && rate_mode != RATE_MODE_VARIABLE {
        panic!("invalid interest rate mode");
    }
}

fn reserves(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Reserves)
        .unwrap_or(Vec::new(env))
}

fn reserve(env: &Env, asset: &Address) -> ReserveConfig {
    env.storage()
        .persistent()
        .get(&DataKey::Reserve(asset.clone()))
        .expect("reserve not listed")
}

fn dust_threshold(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::DustThreshold)
        .unwrap_or(0u128)
}

fn get_supplied(env: &Env, user: &Address, asset: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Supplied(user.clone(), asset.clone()))
        .unwrap_or(0u128)
}

fn set_supplied(env: &Env, user: &Address, asset: &Address, value: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::Supplied(user.clone(), asset.clone()), &value);
}

fn get_debt(env: &Env, user: &Address, asset: &Address, rate_mode: u32) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Debt(user.clone(), asset.clone(), rate_mode))
        .unwrap_or(0u128)
}

fn set_debt(env: &Env, user: &Address, asset: &Address, rate_mode: u32, value: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::Debt(user.clone(), asset.clone(), rate_mode), &value);
}

fn account_data(env: &Env, user: &Address) -> UserAccountData {
    account_snapshot(env, user).0
}

/// Account data plus the ltv-weighted borrow capacity in base currency.
fn account_snapshot(env: &Env, user: &Address) -> (UserAccountData, u128) {
    let dust = dust_threshold(env);
    let mut collateral = 0u128;
    let mut weighted_threshold = 0u128;
    let mut weighted_ltv = 0u128;
    let mut debt = 0u128;
    for asset in reserves(env).iter() {
        let config = reserve(env, &asset);
        let supplied = get_supplied(env, user, &asset);
        if supplied > 0 {
            let value = supplied.saturating_mul(config.price) / PRICE_SCALE;
            collateral = collateral.saturating_add(value);
            weighted_threshold = weighted_threshold
                .saturating_add(value.saturating_mul(config.liquidation_threshold_bps));
            weighted_ltv = weighted_ltv.saturating_add(value.saturating_mul(config.ltv_bps));
        }
        let owed = get_debt(env, user, &asset, RATE_MODE_VARIABLE)
            .saturating_add(get_debt(env, user, &asset, RATE_MODE_STABLE));
        if owed > dust {
            debt = debt.saturating_add(owed.saturating_mul(config.price) / PRICE_SCALE);
        }
    }
    let (threshold, ltv) = if collateral == 0 {
        (0, 0)
    } else {
        (weighted_threshold / collateral, weighted_ltv / collateral)
    };
    let health_factor = if debt == 0 {
        u128::MAX
    } else {
        weighted_threshold.saturating_mul(WAD / BPS) / debt
    };
    let capacity = weighted_ltv / BPS;
    let data = UserAccountData {
        total_collateral_base: collateral,
        total_debt_base: debt,
        available_borrows_base: capacity.saturating_sub(debt),
        current_liquidation_threshold: threshold,
        ltv,
        health_factor,
    };
    (data, capacity)
}

fn to_i128(amount: u128) -> i128 {
    i128::try_from(amount).expect("amount overflow")
}

fn pull(env: &Env, asset: &Address, from: &Address, amount: u128) {
    let pool = env.current_contract_address();
    token::Client::new(env, asset).transfer_from(&pool, from, &pool, &to_i128(amount));
}

fn push(env: &Env, asset: &Address, to: &Address, amount: u128) {
    let pool = env.current_contract_address();
    token::Client::new(env, asset).transfer(&pool, to, &to_i128(amount));
}

