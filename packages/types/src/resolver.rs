use std::{any::type_name, fmt, str::FromStr};

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::StdError;
use mars_owner::OwnerUpdate;
use strum::EnumIter;

/// Every contract the suite (or another contract) may need to locate is
/// registered in the address resolver under one of these keys.
#[cw_serde]
#[derive(Copy, Eq, Hash, EnumIter)]
pub enum ContractKey {
    /// Aggregate long/short exposure bookkeeping
    LoanManager,
    /// Price source used for collateral-ratio checks
    Oracle,
    /// Account receiving issuance fees
    FeePool,
    /// Collateral contract taking the chain's native denom
    CollateralNative,
    /// Collateral contract taking a non-native token denom
    CollateralToken,
    /// Collateral contract issuing short exposure against the stable denom
    CollateralShort,
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContractKey::LoanManager => "loan_manager",
            ContractKey::Oracle => "oracle",
            ContractKey::FeePool => "fee_pool",
            ContractKey::CollateralNative => "collateral_native",
            ContractKey::CollateralToken => "collateral_token",
            ContractKey::CollateralShort => "collateral_short",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ContractKey {
    type Err = StdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loan_manager" => Ok(ContractKey::LoanManager),
            "oracle" => Ok(ContractKey::Oracle),
            "fee_pool" => Ok(ContractKey::FeePool),
            "collateral_native" => Ok(ContractKey::CollateralNative),
            "collateral_token" => Ok(ContractKey::CollateralToken),
            "collateral_short" => Ok(ContractKey::CollateralShort),
            _ => Err(StdError::parse_err(type_name::<Self>(), s)),
        }
    }
}

#[cw_serde]
pub struct InstantiateMsg {
    /// The contract's owner
    pub owner: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Set address
    SetAddress {
        key: ContractKey,
        address: String,
    },
    /// Manages owner role state
    UpdateOwner(OwnerUpdate),
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get config
    #[returns(ConfigResponse)]
    Config {},
    /// Get a single address
    #[returns(AddressResponseItem)]
    Address(ContractKey),
    /// Get a list of addresses
    #[returns(Vec<AddressResponseItem>)]
    Addresses(Vec<ContractKey>),
    /// Query all stored addresses with pagination
    #[returns(Vec<AddressResponseItem>)]
    AllAddresses {
        start_after: Option<ContractKey>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    /// The contract's owner
    pub owner: Option<String>,
    /// The contract's proposed owner
    pub proposed_new_owner: Option<String>,
}

#[cw_serde]
pub struct AddressResponseItem {
    /// The key under which the address is registered
    pub key: ContractKey,
    /// Address value
    pub address: String,
}

pub mod helpers {
    use std::collections::HashMap;

    use cosmwasm_std::{Addr, Deps, StdResult};

    use super::{AddressResponseItem, ContractKey, QueryMsg};

    /// Query a single registered contract address
    pub fn query_contract_addr(
        deps: Deps,
        resolver_addr: &Addr,
        key: ContractKey,
    ) -> StdResult<Addr> {
        deps.querier
            .query_wasm_smart::<AddressResponseItem>(resolver_addr, &QueryMsg::Address(key))
            .map(|res| deps.api.addr_validate(&res.address))?
    }

    /// Query several registered contract addresses in one call
    pub fn query_contract_addrs(
        deps: Deps,
        resolver_addr: &Addr,
        keys: Vec<ContractKey>,
    ) -> StdResult<HashMap<ContractKey, Addr>> {
        deps.querier
            .query_wasm_smart::<Vec<AddressResponseItem>>(
                resolver_addr,
                &QueryMsg::Addresses(keys),
            )?
            .into_iter()
            .map(|item| Ok((item.key, deps.api.addr_validate(&item.address)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::ContractKey;

    #[test]
    fn contract_key_fmt_and_from_string() {
        for key in ContractKey::iter() {
            assert_eq!(ContractKey::from_str(&key.to_string()).unwrap(), key);
        }
    }

    #[test]
    fn contract_key_from_invalid_string() {
        assert!(ContractKey::from_str("liquidator").is_err());
    }
}
