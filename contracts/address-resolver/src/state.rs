use cosmwasm_std::Addr;
use cw_storage_plus::Map;
use mars_owner::Owner;

pub const OWNER: Owner = Owner::new("owner");
/// Registered addresses, keyed by the string form of `ContractKey`
pub const ADDRESSES: Map<String, Addr> = Map::new("addresses");
