use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAdmin = 3,
    PositionNotFound = 4,
    NotOwner = 5,
    PositionInactive = 6,
    InvalidAmount = 7,
    InsufficientBalance = 8,
    InsufficientAllowance = 9,
    PoolRejected = 10,
    AmountExceedsPosition = 11,
    TooManyPositions = 12,
    NothingToLiquidate = 13,
}
