#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response};
use keel_types::collateral::{Config, ExecuteMsg, InstantiateMsg, QueryMsg};
use mars_owner::OwnerInit::SetInitialOwner;

use crate::{
    error::ContractError,
    execute,
    helpers::{decimal_param_gt_one, decimal_param_lt_one},
    query,
    state::{CONFIG, OPEN_LOANS, OWNER, TOTAL_LOANS},
};

pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, format!("crates.io:{CONTRACT_NAME}"), CONTRACT_VERSION)?;

    decimal_param_gt_one(msg.minimum_collateral_ratio, "minimum_collateral_ratio")?;
    decimal_param_lt_one(msg.issue_fee_rate, "issue_fee_rate")?;
    decimal_param_lt_one(msg.borrow_rate, "borrow_rate")?;
    if msg.borrow_currencies.is_empty() || msg.borrow_currencies.contains(&msg.collateral_denom) {
        return Err(ContractError::InvalidParam {
            param_name: "borrow_currencies".to_string(),
            invalid_value: msg.borrow_currencies.join(","),
            predicate: "non-empty, without the collateral denom".to_string(),
        });
    }

    OWNER.initialize(
        deps.storage,
        deps.api,
        SetInitialOwner {
            owner: msg.owner,
        },
    )?;

    let config = Config {
        resolver: deps.api.addr_validate(&msg.resolver)?,
        collateral_denom: msg.collateral_denom,
        direction: msg.direction,
        minimum_collateral_ratio: msg.minimum_collateral_ratio,
        issue_fee_rate: msg.issue_fee_rate,
        interaction_delay: msg.interaction_delay,
        borrow_rate: msg.borrow_rate,
        deferred_claims: msg.deferred_claims,
        can_open_loans: true,
        borrow_currencies: msg.borrow_currencies,
    };
    CONFIG.save(deps.storage, &config)?;

    TOTAL_LOANS.save(deps.storage, &0)?;
    OPEN_LOANS.save(deps.storage, &0)?;

    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateOwner(update) => Ok(OWNER.update(deps, info, update)?),
        ExecuteMsg::UpdateConfig {
            updates,
        } => {
            cw_utils::nonpayable(&info)?;
            execute::update_config(deps, info, updates)
        }
        ExecuteMsg::Open {
            amount,
            currency,
        } => execute::open(deps, env, info, amount, currency),
        ExecuteMsg::Deposit {
            account,
            id,
        } => execute::deposit(deps, env, info, account, id),
        ExecuteMsg::Withdraw {
            id,
            amount,
        } => {
            cw_utils::nonpayable(&info)?;
            execute::withdraw(deps, env, info, id, amount)
        }
        ExecuteMsg::Repay {
            account,
            id,
        } => execute::repay(deps, env, info, account, id),
        ExecuteMsg::Close {
            id,
        } => execute::close(deps, env, info, id),
        ExecuteMsg::Claim {
            amount,
        } => {
            cw_utils::nonpayable(&info)?;
            execute::claim(deps, info, amount)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&query::query_config(deps)?),
        QueryMsg::Owner {} => to_json_binary(&OWNER.query(deps.storage)?),
        QueryMsg::Loan {
            account,
            id,
        } => to_json_binary(&query::query_loan(deps, env, account, id)?),
        QueryMsg::Loans {
            account,
            start_after,
            limit,
        } => to_json_binary(&query::query_loans(deps, env, account, start_after, limit)?),
        QueryMsg::CollateralRatio {
            account,
            id,
        } => to_json_binary(&query::query_collateral_ratio(deps, env, account, id)?),
        QueryMsg::InteractionDelay {} => {
            to_json_binary(&CONFIG.load(deps.storage)?.interaction_delay)
        }
        QueryMsg::IssueFeeRate {} => to_json_binary(&CONFIG.load(deps.storage)?.issue_fee_rate),
        QueryMsg::State {} => to_json_binary(&query::query_state(deps)?),
        QueryMsg::PendingWithdrawal {
            account,
        } => to_json_binary(&query::query_pending_withdrawal(deps, account)?),
    };
    Ok(res?)
}
