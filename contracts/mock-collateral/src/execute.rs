use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
    WasmMsg,
};
use keel_types::{
    collateral::{ConfigUpdates, Loan, LoanState},
    manager,
};

use crate::{
    error::ContractError,
    events::{
        build_collateral_claimed_event, build_collateral_deposited_event,
        build_collateral_withdrawn_event, build_loan_closed_event, build_loan_created_event,
        build_loan_repaid_event,
    },
    helpers::{
        assert_above_minimum_collateral_ratio, assert_collateral_denom, assert_interaction_delay,
        assert_loan_open, build_send_asset_msg, collateral_ratio, decimal_param_gt_one,
        decimal_param_lt_one, release_collateral, resolve_collaborators,
    },
    interest::accrue,
    state::{CONFIG, LOANS, OPEN_LOANS, OWNER, PENDING_WITHDRAWALS, TOTAL_LOANS},
};

pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    updates: ConfigUpdates,
) -> Result<Response, ContractError> {
    OWNER.assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;

    if let Some(mcr) = updates.minimum_collateral_ratio {
        decimal_param_gt_one(mcr, "minimum_collateral_ratio")?;
        config.minimum_collateral_ratio = mcr;
    }
    if let Some(rate) = updates.issue_fee_rate {
        decimal_param_lt_one(rate, "issue_fee_rate")?;
        config.issue_fee_rate = rate;
    }
    if let Some(delay) = updates.interaction_delay {
        config.interaction_delay = delay;
    }
    if let Some(rate) = updates.borrow_rate {
        decimal_param_lt_one(rate, "borrow_rate")?;
        config.borrow_rate = rate;
    }
    if let Some(can_open) = updates.can_open_loans {
        config.can_open_loans = can_open;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}

pub fn open(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    currency: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if !config.can_open_loans {
        return Err(ContractError::LoanOpeningDisabled {});
    }
    if !config.borrow_currencies.contains(&currency) {
        return Err(ContractError::UnsupportedCurrency {
            currency,
        });
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidBorrowAmount {});
    }

    let collateral = cw_utils::one_coin(&info)?;
    assert_collateral_denom(&config, &collateral)?;

    let collaborators = resolve_collaborators(deps.as_ref(), &config)?;
    let now = env.block.time.seconds();

    let id = TOTAL_LOANS.load(deps.storage)? + 1;
    let loan = Loan {
        id,
        account: info.sender.clone(),
        currency: currency.clone(),
        amount,
        collateral_amount: collateral.amount,
        accrued_interest: Uint128::zero(),
        created_at: now,
        last_interaction: now,
        interest_accrued_at: now,
        state: LoanState::Open,
    };

    let ratio = collateral_ratio(
        deps.as_ref(),
        &config,
        &collaborators.oracle,
        &currency,
        loan.collateral_amount,
        loan.amount,
    )?;
    assert_above_minimum_collateral_ratio(&config, ratio)?;

    // the contract pays out of its own liquidity; the fee also leaves it
    let liquidity = deps.querier.query_balance(&env.contract.address, &currency)?.amount;
    if liquidity < amount {
        return Err(ContractError::OperationExceedsAvailableLiquidity {});
    }

    let issuance_fee = amount.checked_mul_floor(config.issue_fee_rate)?;
    let net_amount = amount.checked_sub(issuance_fee)?;

    LOANS.save(deps.storage, (&loan.account, id), &loan)?;
    TOTAL_LOANS.save(deps.storage, &id)?;
    OPEN_LOANS.update(deps.storage, |open| -> StdResult<_> { Ok(open + 1) })?;

    let mut msgs =
        vec![build_send_asset_msg(&info.sender, &currency, net_amount)];
    if !issuance_fee.is_zero() {
        msgs.push(build_send_asset_msg(&collaborators.fee_pool, &currency, issuance_fee));
    }
    msgs.push(exposure_msg(
        &collaborators.manager,
        &manager::ExecuteMsg::IncrementExposure {
            currency,
            direction: config.direction,
            amount,
        },
    )?);

    Ok(Response::new()
        .add_messages(msgs)
        .add_event(build_loan_created_event(&loan, issuance_fee))
        .add_attribute("action", "open"))
}

pub fn deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    account: String,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account_addr = deps.api.addr_validate(&account)?;
    let mut loan = load_loan(&deps, &account_addr, id)?;

    assert_loan_open(&loan)?;
    assert_interaction_delay(&env, &config, &loan)?;

    let deposited = cw_utils::one_coin(&info)?;
    assert_collateral_denom(&config, &deposited)?;

    let now = env.block.time.seconds();
    accrue(&mut loan, config.borrow_rate, now)?;
    loan.collateral_amount = loan.collateral_amount.checked_add(deposited.amount)?;
    loan.last_interaction = now;
    LOANS.save(deps.storage, (&account_addr, id), &loan)?;

    Ok(Response::new()
        .add_event(build_collateral_deposited_event(&loan, deposited.amount))
        .add_attribute("action", "deposit"))
}

pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut loan = load_loan(&deps, &info.sender, id)?;

    assert_loan_open(&loan)?;
    assert_interaction_delay(&env, &config, &loan)?;

    if amount.is_zero() || amount > loan.collateral_amount {
        return Err(ContractError::InvalidWithdrawAmount {});
    }

    let now = env.block.time.seconds();
    accrue(&mut loan, config.borrow_rate, now)?;

    let remaining = loan.collateral_amount.checked_sub(amount)?;
    let debt = loan.amount.checked_add(loan.accrued_interest)?;

    // with the debt fully repaid, any amount of collateral may leave
    if !debt.is_zero() {
        let collaborators = resolve_collaborators(deps.as_ref(), &config)?;
        let ratio = collateral_ratio(
            deps.as_ref(),
            &config,
            &collaborators.oracle,
            &loan.currency,
            remaining,
            debt,
        )?;
        assert_above_minimum_collateral_ratio(&config, ratio)?;
    }

    loan.collateral_amount = remaining;
    loan.last_interaction = now;
    LOANS.save(deps.storage, (&info.sender, id), &loan)?;

    let msgs = release_collateral(deps.storage, &config, &info.sender, amount)?;

    Ok(Response::new()
        .add_messages(msgs)
        .add_event(build_collateral_withdrawn_event(&loan, amount))
        .add_attribute("action", "withdraw"))
}

pub fn repay(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    account: String,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account_addr = deps.api.addr_validate(&account)?;
    let mut loan = load_loan(&deps, &account_addr, id)?;

    assert_loan_open(&loan)?;
    assert_interaction_delay(&env, &config, &loan)?;

    let payment = cw_utils::one_coin(&info)?;
    if payment.denom != loan.currency {
        return Err(ContractError::InvalidRepaymentDenom {
            currency: loan.currency,
        });
    }

    let now = env.block.time.seconds();
    accrue(&mut loan, config.borrow_rate, now)?;

    let total_owed = loan.amount.checked_add(loan.accrued_interest)?;
    if payment.amount > total_owed {
        return Err(ContractError::CannotRepayMoreThanDebt {});
    }

    // accrued interest settles before principal
    let interest_paid = payment.amount.min(loan.accrued_interest);
    let principal_paid = payment.amount.checked_sub(interest_paid)?;

    loan.accrued_interest = loan.accrued_interest.checked_sub(interest_paid)?;
    loan.amount = loan.amount.checked_sub(principal_paid)?;
    loan.last_interaction = now;
    LOANS.save(deps.storage, (&account_addr, id), &loan)?;

    let mut msgs: Vec<CosmosMsg> = vec![];
    if !principal_paid.is_zero() {
        let collaborators = resolve_collaborators(deps.as_ref(), &config)?;
        msgs.push(exposure_msg(
            &collaborators.manager,
            &manager::ExecuteMsg::DecrementExposure {
                currency: loan.currency.clone(),
                direction: config.direction,
                amount: principal_paid,
            },
        )?);
    }

    Ok(Response::new()
        .add_messages(msgs)
        .add_event(build_loan_repaid_event(&loan, payment.amount))
        .add_attribute("action", "repay"))
}

pub fn close(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut loan = load_loan(&deps, &info.sender, id)?;

    assert_loan_open(&loan)?;
    assert_interaction_delay(&env, &config, &loan)?;

    let now = env.block.time.seconds();
    accrue(&mut loan, config.borrow_rate, now)?;

    let owed = loan.amount.checked_add(loan.accrued_interest)?;
    if owed.is_zero() {
        cw_utils::nonpayable(&info)?;
    } else {
        let payment = cw_utils::one_coin(&info)?;
        if payment.denom != loan.currency {
            return Err(ContractError::InvalidRepaymentDenom {
                currency: loan.currency,
            });
        }
        if payment.amount != owed {
            return Err(ContractError::PaymentAmountMismatch {
                expected: owed,
                got: payment.amount,
            });
        }
    }

    let principal_repaid = loan.amount;
    let collateral_returned = loan.collateral_amount;

    loan.amount = Uint128::zero();
    loan.accrued_interest = Uint128::zero();
    loan.collateral_amount = Uint128::zero();
    loan.last_interaction = now;
    loan.state = LoanState::Closed;
    LOANS.save(deps.storage, (&info.sender, id), &loan)?;
    OPEN_LOANS.update(deps.storage, |open| -> StdResult<_> { Ok(open.saturating_sub(1)) })?;

    let mut msgs = release_collateral(deps.storage, &config, &info.sender, collateral_returned)?;
    if !principal_repaid.is_zero() {
        let collaborators = resolve_collaborators(deps.as_ref(), &config)?;
        msgs.push(exposure_msg(
            &collaborators.manager,
            &manager::ExecuteMsg::DecrementExposure {
                currency: loan.currency.clone(),
                direction: config.direction,
                amount: principal_repaid,
            },
        )?);
    }

    Ok(Response::new()
        .add_messages(msgs)
        .add_event(build_loan_closed_event(&loan, owed, collateral_returned))
        .add_attribute("action", "close"))
}

pub fn claim(
    deps: DepsMut,
    info: MessageInfo,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let pending = PENDING_WITHDRAWALS.may_load(deps.storage, &info.sender)?.unwrap_or_default();
    if pending.is_zero() {
        return Err(ContractError::NothingToClaim {});
    }

    let claimed = amount.unwrap_or(pending);
    if claimed.is_zero() {
        return Err(ContractError::NothingToClaim {});
    }
    if claimed > pending {
        return Err(ContractError::ClaimExceedsPendingWithdrawals {});
    }

    let remaining = pending.checked_sub(claimed)?;
    if remaining.is_zero() {
        PENDING_WITHDRAWALS.remove(deps.storage, &info.sender);
    } else {
        PENDING_WITHDRAWALS.save(deps.storage, &info.sender, &remaining)?;
    }

    Ok(Response::new()
        .add_message(build_send_asset_msg(&info.sender, &config.collateral_denom, claimed))
        .add_event(build_collateral_claimed_event(&info.sender, claimed, remaining))
        .add_attribute("action", "claim"))
}

fn load_loan(deps: &DepsMut, account: &Addr, id: u64) -> Result<Loan, ContractError> {
    LOANS.may_load(deps.storage, (account, id))?.ok_or_else(|| ContractError::LoanNotFound {
        account: account.to_string(),
        id,
    })
}

fn exposure_msg(manager_addr: &Addr, msg: &manager::ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: manager_addr.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}
