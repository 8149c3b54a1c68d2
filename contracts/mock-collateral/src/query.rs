use cosmwasm_std::{coin, Decimal, Deps, Env, Order, Uint128};
use cw_storage_plus::Bound;
use keel_types::{
    collateral::{Config, ConfigResponse, Loan, LoanResponse, StateResponse},
    resolver::{self, ContractKey},
};

use crate::{
    error::ContractError,
    helpers::collateral_ratio,
    interest::accrued_since_checkpoint,
    state::{CONFIG, LOANS, OPEN_LOANS, OWNER, PENDING_WITHDRAWALS, TOTAL_LOANS},
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> Result<ConfigResponse, ContractError> {
    let owner = OWNER.query(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: owner.owner,
        proposed_new_owner: owner.proposed,
        resolver: config.resolver.into(),
        collateral_denom: config.collateral_denom,
        direction: config.direction,
        minimum_collateral_ratio: config.minimum_collateral_ratio,
        issue_fee_rate: config.issue_fee_rate,
        interaction_delay: config.interaction_delay,
        borrow_rate: config.borrow_rate,
        deferred_claims: config.deferred_claims,
        can_open_loans: config.can_open_loans,
        borrow_currencies: config.borrow_currencies,
    })
}

pub fn query_loan(
    deps: Deps,
    env: Env,
    account: String,
    id: u64,
) -> Result<LoanResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account_addr = deps.api.addr_validate(&account)?;
    let loan = LOANS.may_load(deps.storage, (&account_addr, id))?.ok_or(
        ContractError::LoanNotFound {
            account,
            id,
        },
    )?;
    loan_to_response(&config, loan, env.block.time.seconds())
}

pub fn query_loans(
    deps: Deps,
    env: Env,
    account: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> Result<Vec<LoanResponse>, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account_addr = deps.api.addr_validate(&account)?;
    let now = env.block.time.seconds();

    let start = start_after.map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;

    LOANS
        .prefix(&account_addr)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_, loan) = item?;
            loan_to_response(&config, loan, now)
        })
        .collect()
}

pub fn query_collateral_ratio(
    deps: Deps,
    env: Env,
    account: String,
    id: u64,
) -> Result<Decimal, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let account_addr = deps.api.addr_validate(&account)?;
    let loan = LOANS.may_load(deps.storage, (&account_addr, id))?.ok_or(
        ContractError::LoanNotFound {
            account,
            id,
        },
    )?;

    let pending = accrued_since_checkpoint(&loan, config.borrow_rate, env.block.time.seconds())?;
    let debt = loan.amount.checked_add(loan.accrued_interest)?.checked_add(pending)?;

    // closed or fully repaid loans have no ratio to report
    if debt.is_zero() {
        return Err(ContractError::NoOutstandingDebt {
            id,
        });
    }

    let oracle_addr =
        resolver::helpers::query_contract_addr(deps, &config.resolver, ContractKey::Oracle)?;
    collateral_ratio(deps, &config, &oracle_addr, &loan.currency, loan.collateral_amount, debt)
}

pub fn query_state(deps: Deps) -> Result<StateResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(StateResponse {
        total_loans: TOTAL_LOANS.load(deps.storage)?,
        open_loans: OPEN_LOANS.load(deps.storage)?,
        can_open_loans: config.can_open_loans,
    })
}

pub fn query_pending_withdrawal(deps: Deps, account: String) -> Result<Uint128, ContractError> {
    let account_addr = deps.api.addr_validate(&account)?;
    Ok(PENDING_WITHDRAWALS.may_load(deps.storage, &account_addr)?.unwrap_or_default())
}

fn loan_to_response(
    config: &Config,
    loan: Loan,
    now: u64,
) -> Result<LoanResponse, ContractError> {
    let pending = accrued_since_checkpoint(&loan, config.borrow_rate, now)?;
    let accrued_interest = loan.accrued_interest.checked_add(pending)?;
    let total_owed = loan.amount.checked_add(accrued_interest)?;
    Ok(LoanResponse {
        id: loan.id,
        account: loan.account,
        currency: loan.currency,
        amount: loan.amount,
        collateral: coin(loan.collateral_amount.u128(), &config.collateral_denom),
        accrued_interest,
        total_owed,
        created_at: loan.created_at,
        last_interaction: loan.last_interaction,
        state: loan.state,
    })
}
