use soroban_sdk::{contractevent, Address};

use crate::storage::InterestRateMode;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionCreated {
    #[topic]
    pub id: u64,
    #[topic]
    pub owner: Address,
    pub collateral_asset: Address,
    pub collateral_amount: u128,
    pub borrow_asset: Address,
    pub borrow_amount: u128,
    pub interest_rate_mode: InterestRateMode,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralAdded {
    #[topic]
    pub id: u64,
    pub amount: u128,
    pub collateral_amount: u128,
}

/// `amount` is what the pool released, not what was asked for.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralWithdrawn {
    #[topic]
    pub id: u64,
    pub amount: u128,
    pub collateral_amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebtIncreased {
    #[topic]
    pub id: u64,
    pub amount: u128,
    pub borrow_amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebtRepaid {
    #[topic]
    pub id: u64,
    #[topic]
    pub payer: Address,
    pub amount: u128,
    pub borrow_amount: u128,
}

/// Emitted by owner close and admin close alike. `debt_written_off` is nonzero
/// when the ledger dropped debt it did not repay (emergency close).
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionClosed {
    #[topic]
    pub id: u64,
    #[topic]
    pub owner: Address,
    pub collateral_returned: u128,
    pub debt_repaid: u128,
    pub debt_written_off: u128,
    pub by_admin: bool,
    pub emergency: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionLiquidated {
    #[topic]
    pub id: u64,
    #[topic]
    pub liquidator: Address,
    pub collateral_seized: u128,
    pub debt_covered: u128,
    pub collateral_amount: u128,
    pub borrow_amount: u128,
    pub active: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyPositionCreated {
    #[topic]
    pub id: u64,
    #[topic]
    pub owner: Address,
    pub asset: Address,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyIncreased {
    #[topic]
    pub id: u64,
    pub amount: u128,
    pub supplied: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyWithdrawn {
    #[topic]
    pub id: u64,
    pub amount: u128,
    pub supplied: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyPositionClosed {
    #[topic]
    pub id: u64,
    #[topic]
    pub owner: Address,
    pub amount_returned: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminUpdated {
    #[topic]
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdated {
    #[topic]
    pub pool: Address,
}
