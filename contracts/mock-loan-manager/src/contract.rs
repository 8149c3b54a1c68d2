#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Order, Response, StdResult,
    Uint128,
};
use cw_storage_plus::{Bound, Map};
use keel_types::{
    manager::{
        ConfigResponse, ExecuteMsg, ExposureResponse, InstantiateMsg, QueryMsg, SystemDebtResponse,
    },
    LoanDirection,
};
use mars_owner::OwnerInit::SetInitialOwner;

use crate::{
    error::ContractError,
    state::{COLLATERALS, LONG, OWNER, SHORT, SYSTEM_DEBT},
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

    SYSTEM_DEBT.save(deps.storage, &msg.system_debt)?;

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
        ExecuteMsg::UpdateOwner(update) => Ok(OWNER.update(deps, info, update)?),
        ExecuteMsg::AddCollaterals {
            contracts,
        } => add_collaterals(deps, info, contracts),
        ExecuteMsg::RemoveCollaterals {
            contracts,
        } => remove_collaterals(deps, info, contracts),
        ExecuteMsg::IncrementExposure {
            currency,
            direction,
            amount,
        } => increment_exposure(deps, info, currency, direction, amount),
        ExecuteMsg::DecrementExposure {
            currency,
            direction,
            amount,
        } => decrement_exposure(deps, info, currency, direction, amount),
    }
}

fn add_collaterals(
    deps: DepsMut,
    info: MessageInfo,
    contracts: Vec<String>,
) -> Result<Response, ContractError> {
    OWNER.assert_owner(deps.storage, &info.sender)?;

    for contract in contracts {
        let addr = deps.api.addr_validate(&contract)?;
        COLLATERALS.save(deps.storage, &addr, &Empty {})?;
    }

    Ok(Response::new().add_attribute("action", "add_collaterals"))
}

fn remove_collaterals(
    deps: DepsMut,
    info: MessageInfo,
    contracts: Vec<String>,
) -> Result<Response, ContractError> {
    OWNER.assert_owner(deps.storage, &info.sender)?;

    for contract in contracts {
        let addr = deps.api.addr_validate(&contract)?;
        COLLATERALS.remove(deps.storage, &addr);
    }

    Ok(Response::new().add_attribute("action", "remove_collaterals"))
}

fn increment_exposure(
    deps: DepsMut,
    info: MessageInfo,
    currency: String,
    direction: LoanDirection,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_registered(deps.as_ref(), &info)?;

    let map = exposure_map(direction);
    let current = map.may_load(deps.storage, &currency)?.unwrap_or_default();
    map.save(deps.storage, &currency, &current.checked_add(amount)?)?;

    Ok(Response::new()
        .add_attribute("action", "increment_exposure")
        .add_attribute("currency", currency)
        .add_attribute("direction", direction.to_string())
        .add_attribute("amount", amount.to_string()))
}

fn decrement_exposure(
    deps: DepsMut,
    info: MessageInfo,
    currency: String,
    direction: LoanDirection,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_registered(deps.as_ref(), &info)?;

    let map = exposure_map(direction);
    let current = map.may_load(deps.storage, &currency)?.unwrap_or_default();
    let reduced = current.checked_sub(amount).map_err(|_| ContractError::ExposureUnderflow {
        currency: currency.clone(),
        direction,
    })?;
    map.save(deps.storage, &currency, &reduced)?;

    Ok(Response::new()
        .add_attribute("action", "decrement_exposure")
        .add_attribute("currency", currency)
        .add_attribute("direction", direction.to_string())
        .add_attribute("amount", amount.to_string()))
}

fn assert_registered(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    if !COLLATERALS.has(deps.storage, &info.sender) {
        return Err(ContractError::NotRegisteredCollateral {
            sender: info.sender.to_string(),
        });
    }
    Ok(())
}

fn exposure_map(direction: LoanDirection) -> &'static Map<'static, &'static str, Uint128> {
    match direction {
        LoanDirection::Long => &LONG,
        LoanDirection::Short => &SHORT,
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Owner {} => to_json_binary(&OWNER.query(deps.storage)?),
        QueryMsg::Long {
            currency,
        } => to_json_binary(&query_exposure(deps, currency, LoanDirection::Long)?),
        QueryMsg::Short {
            currency,
        } => to_json_binary(&query_exposure(deps, currency, LoanDirection::Short)?),
        QueryMsg::SystemDebt {} => to_json_binary(&SystemDebtResponse {
            debt: SYSTEM_DEBT.load(deps.storage)?,
        }),
        QueryMsg::Collaterals {
            start_after,
            limit,
        } => to_json_binary(&query_collaterals(deps, start_after, limit)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let owner = OWNER.query(deps.storage)?;
    Ok(ConfigResponse {
        owner: owner.owner,
        proposed_new_owner: owner.proposed,
        system_debt: SYSTEM_DEBT.load(deps.storage)?,
    })
}

fn query_exposure(
    deps: Deps,
    currency: String,
    direction: LoanDirection,
) -> StdResult<ExposureResponse> {
    let amount = exposure_map(direction).may_load(deps.storage, &currency)?.unwrap_or_default();
    Ok(ExposureResponse {
        currency,
        direction,
        amount,
    })
}

fn query_collaterals(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<String>> {
    let start_addr = start_after.map(|s| deps.api.addr_validate(&s)).transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;

    COLLATERALS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|key| key.map(Into::into))
        .collect()
}
