use soroban_sdk::{log, symbol_short, Address, Env, Symbol};

use crate::errors::Error;
use crate::gateway;
use crate::storage::{get_pool, AccountData, InterestRateMode};

#[soroban_sdk::contractclient(name = "LendingPoolClient")]
pub trait LendingPool {
    fn supply(env: Env, caller: Address, asset: Address, amount: u128, on_behalf_of: Address);
    fn withdraw(
        env: Env,
        caller: Address,
        asset: Address,
        amount: u128,
        on_behalf_of: Address,
        to: Address,
    ) -> u128;
    fn borrow(
        env: Env,
        caller: Address,
        asset: Address,
        amount: u128,
        rate_mode: u32,
        on_behalf_of: Address,
    );
    fn repay(
        env: Env,
        caller: Address,
        asset: Address,
        amount: u128,
        rate_mode: u32,
        on_behalf_of: Address,
    ) -> u128;
    fn liquidation_call(
        env: Env,
        liquidator: Address,
        collateral_asset: Address,
        debt_asset: Address,
        user: Address,
        debt_to_cover: u128,
        receive_a_token: bool,
    ) -> (u128, u128);
    fn get_user_account_data(env: Env, user: Address) -> AccountData;
}

/// Stateless translation of ledger intents into pool calls.
///
/// Every method returns what the pool reports; callers must book that value,
/// never their own argument. Any refusal by the pool becomes `PoolRejected` and
/// the surrounding invocation rolls back.
pub struct PoolAdapter<'a> {
    env: &'a Env,
    pool: Address,
    client: LendingPoolClient<'a>,
    this: Address,
}

impl<'a> PoolAdapter<'a> {
    pub fn load(env: &'a Env) -> Result<Self, Error> {
        let pool = get_pool(env)?;
        let client = LendingPoolClient::new(env, &pool);
        Ok(Self {
            env,
            pool,
            client,
            this: env.current_contract_address(),
        })
    }

    /// Supplies ledger-held funds to the pool for `on_behalf_of`.
    pub fn supply(&self, asset: &Address, amount: u128, on_behalf_of: &Address) -> Result<(), Error> {
        gateway::approve(self.env, asset, &self.pool, amount)?;
        let result = self
            .client
            .try_supply(&self.this, asset, &amount, on_behalf_of);
        settle(self.env, symbol_short!("supply"), result)
    }

    /// Returns the amount the pool actually released to `to`.
    pub fn withdraw(
        &self,
        asset: &Address,
        amount: u128,
        on_behalf_of: &Address,
        to: &Address,
    ) -> Result<u128, Error> {
        let result = self
            .client
            .try_withdraw(&self.this, asset, &amount, on_behalf_of, to);
        settle(self.env, symbol_short!("withdraw"), result)
    }

    /// Borrows into the ledger and returns what actually arrived.
    pub fn borrow(
        &self,
        asset: &Address,
        amount: u128,
        rate_mode: InterestRateMode,
        on_behalf_of: &Address,
    ) -> Result<u128, Error> {
        let before = gateway::balance(self.env, asset)?;
        let result = self.client.try_borrow(
            &self.this,
            asset,
            &amount,
            &(rate_mode as u32),
            on_behalf_of,
        );
        settle(self.env, symbol_short!("borrow"), result)?;
        Ok(gateway::balance(self.env, asset)?.saturating_sub(before))
    }

    /// Repays from ledger-held funds. The pool may take less than `amount`.
    pub fn repay(
        &self,
        asset: &Address,
        amount: u128,
        rate_mode: InterestRateMode,
        on_behalf_of: &Address,
    ) -> Result<u128, Error> {
        gateway::approve(self.env, asset, &self.pool, amount)?;
        let result = self.client.try_repay(
            &self.this,
            asset,
            &amount,
            &(rate_mode as u32),
            on_behalf_of,
        );
        settle(self.env, symbol_short!("repay"), result)
    }

    /// Returns `(collateral_seized, debt_covered)` as computed by the pool.
    pub fn liquidation_call(
        &self,
        liquidator: &Address,
        collateral_asset: &Address,
        debt_asset: &Address,
        user: &Address,
        debt_to_cover: u128,
        receive_a_token: bool,
    ) -> Result<(u128, u128), Error> {
        let result = self.client.try_liquidation_call(
            liquidator,
            collateral_asset,
            debt_asset,
            user,
            &debt_to_cover,
            &receive_a_token,
        );
        settle(self.env, symbol_short!("liquidate"), result)
    }

    pub fn account_data(&self, user: &Address) -> Result<AccountData, Error> {
        let result = self.client.try_get_user_account_data(user);
        settle(self.env, symbol_short!("account"), result)
    }
}

fn settle<T, C, E>(env: &Env, op: Symbol, result: Result<Result<T, C>, E>) -> Result<T, Error> {
    match result {
        Ok(Ok(value)) => Ok(value),
        _ => {
            log!(env, "pool rejected", op);
            Err(Error::PoolRejected)
        }
    }
}
