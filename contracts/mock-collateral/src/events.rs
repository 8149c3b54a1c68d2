use cosmwasm_std::{Addr, Event, Uint128};
use keel_types::collateral::Loan;

pub fn build_loan_created_event(loan: &Loan, issuance_fee: Uint128) -> Event {
    Event::new("loan_created")
        .add_attribute("account", loan.account.to_string())
        .add_attribute("id", loan.id.to_string())
        .add_attribute("amount", loan.amount.to_string())
        .add_attribute("currency", loan.currency.clone())
        .add_attribute("issuance_fee", issuance_fee.to_string())
        .add_attribute("collateral", loan.collateral_amount.to_string())
}

pub fn build_collateral_deposited_event(loan: &Loan, deposited: Uint128) -> Event {
    Event::new("loan_collateral_deposited")
        .add_attribute("account", loan.account.to_string())
        .add_attribute("id", loan.id.to_string())
        .add_attribute("deposited", deposited.to_string())
        .add_attribute("collateral", loan.collateral_amount.to_string())
}

pub fn build_collateral_withdrawn_event(loan: &Loan, withdrawn: Uint128) -> Event {
    Event::new("loan_collateral_withdrawn")
        .add_attribute("account", loan.account.to_string())
        .add_attribute("id", loan.id.to_string())
        .add_attribute("withdrawn", withdrawn.to_string())
        .add_attribute("collateral", loan.collateral_amount.to_string())
}

pub fn build_loan_repaid_event(loan: &Loan, repaid: Uint128) -> Event {
    Event::new("loan_repaid")
        .add_attribute("account", loan.account.to_string())
        .add_attribute("id", loan.id.to_string())
        .add_attribute("repaid", repaid.to_string())
        .add_attribute("amount", loan.amount.to_string())
        .add_attribute("accrued_interest", loan.accrued_interest.to_string())
}

pub fn build_loan_closed_event(loan: &Loan, repaid: Uint128, collateral_returned: Uint128) -> Event {
    Event::new("loan_closed")
        .add_attribute("account", loan.account.to_string())
        .add_attribute("id", loan.id.to_string())
        .add_attribute("repaid", repaid.to_string())
        .add_attribute("collateral_returned", collateral_returned.to_string())
}

pub fn build_collateral_claimed_event(account: &Addr, claimed: Uint128, remaining: Uint128) -> Event {
    Event::new("collateral_claimed")
        .add_attribute("account", account.to_string())
        .add_attribute("claimed", claimed.to_string())
        .add_attribute("remaining", remaining.to_string())
}
