use cosmwasm_std::{
    coins, Addr, BankMsg, Coin, CosmosMsg, Decimal, Deps, Env, StdResult, Storage, Uint128,
};
use keel_types::{
    collateral::{Config, Loan, LoanState},
    oracle,
    resolver::{self, ContractKey},
};

use crate::{error::ContractError, state::PENDING_WITHDRAWALS};

/// Collaborators located through the address resolver on every call, so a
/// redeployment only needs a resolver update.
pub struct Collaborators {
    pub oracle: Addr,
    pub manager: Addr,
    pub fee_pool: Addr,
}

pub fn resolve_collaborators(deps: Deps, config: &Config) -> StdResult<Collaborators> {
    let addresses = resolver::helpers::query_contract_addrs(
        deps,
        &config.resolver,
        vec![ContractKey::Oracle, ContractKey::LoanManager, ContractKey::FeePool],
    )?;
    Ok(Collaborators {
        oracle: addresses[&ContractKey::Oracle].clone(),
        manager: addresses[&ContractKey::LoanManager].clone(),
        fee_pool: addresses[&ContractKey::FeePool].clone(),
    })
}

pub fn build_send_asset_msg(recipient_addr: &Addr, denom: &str, amount: Uint128) -> CosmosMsg {
    CosmosMsg::Bank(BankMsg::Send {
        to_address: recipient_addr.into(),
        amount: coins(amount.u128(), denom),
    })
}

/// Collateral value over debt value, both priced through the oracle.
pub fn collateral_ratio(
    deps: Deps,
    config: &Config,
    oracle_addr: &Addr,
    currency: &str,
    collateral_amount: Uint128,
    debt: Uint128,
) -> Result<Decimal, ContractError> {
    let collateral_price =
        oracle::helpers::query_price(deps, oracle_addr, &config.collateral_denom)?;
    let currency_price = oracle::helpers::query_price(deps, oracle_addr, currency)?;

    let collateral_value = collateral_amount.checked_mul_floor(collateral_price)?;
    let debt_value = debt.checked_mul_floor(currency_price)?;

    Ok(Decimal::checked_from_ratio(collateral_value, debt_value)?)
}

pub fn assert_above_minimum_collateral_ratio(
    config: &Config,
    actual: Decimal,
) -> Result<(), ContractError> {
    if actual < config.minimum_collateral_ratio {
        return Err(ContractError::BelowMinimumCollateralRatio {
            minimum: config.minimum_collateral_ratio,
            actual,
        });
    }
    Ok(())
}

pub fn assert_collateral_denom(config: &Config, sent: &Coin) -> Result<(), ContractError> {
    if sent.denom != config.collateral_denom {
        return Err(ContractError::InvalidCollateralDenom {
            expected: config.collateral_denom.clone(),
            got: sent.denom.clone(),
        });
    }
    Ok(())
}

pub fn assert_loan_open(loan: &Loan) -> Result<(), ContractError> {
    if matches!(loan.state, LoanState::Closed) {
        return Err(ContractError::LoanClosed {
            id: loan.id,
        });
    }
    Ok(())
}

/// Consecutive actions on the same loan must be spaced by the configured
/// interaction delay.
pub fn assert_interaction_delay(
    env: &Env,
    config: &Config,
    loan: &Loan,
) -> Result<(), ContractError> {
    let ready_at = loan.last_interaction + config.interaction_delay;
    if env.block.time.seconds() < ready_at {
        return Err(ContractError::InteractionDelayNotExpired {
            ready_at,
        });
    }
    Ok(())
}

/// Pay collateral out directly, or park it as a pending withdrawal when
/// this instance defers claims.
pub fn release_collateral(
    storage: &mut dyn Storage,
    config: &Config,
    recipient: &Addr,
    amount: Uint128,
) -> Result<Vec<CosmosMsg>, ContractError> {
    if config.deferred_claims {
        let pending =
            PENDING_WITHDRAWALS.may_load(storage, recipient)?.unwrap_or_default();
        PENDING_WITHDRAWALS.save(storage, recipient, &pending.checked_add(amount)?)?;
        Ok(vec![])
    } else {
        Ok(vec![build_send_asset_msg(recipient, &config.collateral_denom, amount)])
    }
}

pub fn decimal_param_lt_one(param_value: Decimal, param_name: &str) -> Result<(), ContractError> {
    if !param_value.lt(&Decimal::one()) {
        return Err(ContractError::InvalidParam {
            param_name: param_name.to_string(),
            invalid_value: param_value.to_string(),
            predicate: "< 1".to_string(),
        });
    }
    Ok(())
}

pub fn decimal_param_gt_one(param_value: Decimal, param_name: &str) -> Result<(), ContractError> {
    if !param_value.gt(&Decimal::one()) {
        return Err(ContractError::InvalidParam {
            param_name: param_name.to_string(),
            invalid_value: param_value.to_string(),
            predicate: "> 1".to_string(),
        });
    }
    Ok(())
}
