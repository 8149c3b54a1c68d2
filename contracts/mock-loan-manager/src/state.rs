use cosmwasm_std::{Addr, Empty, Uint128};
use cw_storage_plus::{Item, Map};
use mars_owner::Owner;

pub const OWNER: Owner = Owner::new("owner");
/// Collateral contracts allowed to report exposure
pub const COLLATERALS: Map<&Addr, Empty> = Map::new("collaterals");
/// Aggregate long exposure per currency
pub const LONG: Map<&str, Uint128> = Map::new("long");
/// Aggregate short exposure per currency
pub const SHORT: Map<&str, Uint128> = Map::new("short");
/// Debt carried by the wider system; never moved by loan issuance
pub const SYSTEM_DEBT: Item<Uint128> = Item::new("system_debt");
