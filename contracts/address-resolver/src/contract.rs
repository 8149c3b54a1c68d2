use std::str::FromStr;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult,
};
use cw_storage_plus::Bound;
use keel_types::resolver::{
    AddressResponseItem, ConfigResponse, ContractKey, ExecuteMsg, InstantiateMsg, QueryMsg,
};
use mars_owner::OwnerInit::SetInitialOwner;

use crate::{
    error::ContractError,
    state::{ADDRESSES, OWNER},
};

pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, format!("crates.io:{CONTRACT_NAME}"), CONTRACT_VERSION)?;

    OWNER.initialize(
        deps.storage,
        deps.api,
        SetInitialOwner {
            owner: msg.owner,
        },
    )?;

    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetAddress {
            key,
            address,
        } => set_address(deps, info, key, address),
        ExecuteMsg::UpdateOwner(update) => Ok(OWNER.update(deps, info, update)?),
    }
}

fn set_address(
    deps: DepsMut,
    info: MessageInfo,
    key: ContractKey,
    address: String,
) -> Result<Response, ContractError> {
    OWNER.assert_owner(deps.storage, &info.sender)?;

    let validated = deps.api.addr_validate(&address)?;
    ADDRESSES.save(deps.storage, key.to_string(), &validated)?;

    Ok(Response::new()
        .add_attribute("action", "set_address")
        .add_attribute("key", key.to_string())
        .add_attribute("address", address))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Address(key) => to_json_binary(&query_address(deps, key)?),
        QueryMsg::Addresses(keys) => to_json_binary(&query_addresses(deps, keys)?),
        QueryMsg::AllAddresses {
            start_after,
            limit,
        } => to_json_binary(&query_all_addresses(deps, start_after, limit)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let owner = OWNER.query(deps.storage)?;
    Ok(ConfigResponse {
        owner: owner.owner,
        proposed_new_owner: owner.proposed,
    })
}

fn query_address(deps: Deps, key: ContractKey) -> StdResult<AddressResponseItem> {
    Ok(AddressResponseItem {
        key,
        address: ADDRESSES.load(deps.storage, key.to_string())?.into(),
    })
}

fn query_addresses(deps: Deps, keys: Vec<ContractKey>) -> StdResult<Vec<AddressResponseItem>> {
    keys.into_iter().map(|key| query_address(deps, key)).collect()
}

fn query_all_addresses(
    deps: Deps,
    start_after: Option<ContractKey>,
    limit: Option<u32>,
) -> StdResult<Vec<AddressResponseItem>> {
    let start = start_after.map(|key| Bound::exclusive(key.to_string()));
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;

    ADDRESSES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (k, v) = item?;
            Ok(AddressResponseItem {
                key: ContractKey::from_str(&k)?,
                address: v.into(),
            })
        })
        .collect()
}
