#![no_std]
//! Position-accounting ledger over an external Aave-style lending pool.
//!
//! The pool holds custody and decides solvency; this contract keeps per-owner
//! records of borrow-coupled positions and deposit-only supply positions, and
//! books every change from the amounts the pool reports.

mod adapter;
mod admin;
mod constants;
mod contract;
mod errors;
mod events;
mod gateway;
mod helpers;
mod lifecycle;
mod liquidation;
mod storage;
mod supply;

pub use adapter::LendingPoolClient;
pub use constants::{REPAY_ALL, WITHDRAW_ALL};
pub use contract::{PositionLedger, PositionLedgerClient};
pub use errors::Error;
pub use storage::{AccountData, InterestRateMode, Position, SupplyPosition};
