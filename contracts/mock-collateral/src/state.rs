use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use keel_types::collateral::{Config, Loan};
use mars_owner::Owner;

pub const OWNER: Owner = Owner::new("owner");
pub const CONFIG: Item<Config> = Item::new("config");
/// Loans keyed by (borrower, loan id)
pub const LOANS: Map<(&Addr, u64), Loan> = Map::new("loans");
/// Loans ever opened; the next loan gets id `TOTAL_LOANS + 1`
pub const TOTAL_LOANS: Item<u64> = Item::new("total_loans");
pub const OPEN_LOANS: Item<u64> = Item::new("open_loans");
/// Collateral released but not yet collected (deferred-claims instances)
pub const PENDING_WITHDRAWALS: Map<&Addr, Uint128> = Map::new("pending_withdrawals");
