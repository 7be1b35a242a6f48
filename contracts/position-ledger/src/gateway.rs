use soroban_sdk::{log, token, Address, Env};

use crate::constants::ALLOWANCE_LEDGERS;
use crate::errors::Error;

pub fn to_token_amount(amount: u128) -> Result<i128, Error> {
    i128::try_from(amount).map_err(|_| Error::InvalidAmount)
}

/// Pulls `amount` of `asset` from `from` into the ledger against a prior allowance.
///
/// Balance and allowance are checked up front so a refusal never reaches the pool.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: u128) -> Result<(), Error> {
    let value = to_token_amount(amount)?;
    let client = token::Client::new(env, asset);
    let this = env.current_contract_address();
    if client.balance(from) < value {
        log!(env, "pull refused: balance", from.clone(), amount);
        return Err(Error::InsufficientBalance);
    }
    if client.allowance(from, &this) < value {
        log!(env, "pull refused: allowance", from.clone(), amount);
        return Err(Error::InsufficientAllowance);
    }
    client.transfer_from(&this, from, &this, &value);
    Ok(())
}

/// Sends ledger-held funds out. No-op for zero.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let value = to_token_amount(amount)?;
    token::Client::new(env, asset).transfer(&env.current_contract_address(), to, &value);
    Ok(())
}

/// Grants `spender` a short-lived allowance over ledger-held funds.
pub fn approve(env: &Env, asset: &Address, spender: &Address, amount: u128) -> Result<(), Error> {
    let value = to_token_amount(amount)?;
    let expiration = env.ledger().sequence().saturating_add(ALLOWANCE_LEDGERS);
    token::Client::new(env, asset).approve(
        &env.current_contract_address(),
        spender,
        &value,
        &expiration,
    );
    Ok(())
}

pub fn balance(env: &Env, asset: &Address) -> Result<u128, Error> {
    let value = token::Client::new(env, asset).balance(&env.current_contract_address());
    u128::try_from(value).map_err(|_| Error::InvalidAmount)
}
