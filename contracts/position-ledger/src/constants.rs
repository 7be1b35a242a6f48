/// Sentinel for `withdraw_collateral` / `withdraw_supply`: everything the position tracks.
pub const WITHDRAW_ALL: u128 = u128::MAX;
/// Sentinel for `repay_debt`: the position's tracked debt.
pub const REPAY_ALL: u128 = u128::MAX;
/// Per-owner index length; creating past it fails with `TooManyPositions`.
pub const MAX_USER_POSITIONS: u32 = 512;
/// Lifetime, in ledgers, of the allowance granted to the pool before a supply or repay.
pub const ALLOWANCE_LEDGERS: u32 = 100;
pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;
