use cosmwasm_std::{Decimal, Uint128};
use keel_types::collateral::{Loan, LoanState};

use crate::error::ContractError;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Simple interest accrued on the outstanding principal since the loan's
/// last accrual checkpoint. Does not compound.
pub fn accrued_since_checkpoint(
    loan: &Loan,
    borrow_rate: Decimal,
    now: u64,
) -> Result<Uint128, ContractError> {
    if matches!(loan.state, LoanState::Closed) || now <= loan.interest_accrued_at {
        return Ok(Uint128::zero());
    }
    let elapsed = now - loan.interest_accrued_at;
    let rate_for_period =
        borrow_rate.checked_mul(Decimal::from_ratio(elapsed, SECONDS_PER_YEAR))?;
    Ok(loan.amount.checked_mul_floor(rate_for_period)?)
}

/// Roll the loan's accrual checkpoint forward to `now`.
pub fn accrue(loan: &mut Loan, borrow_rate: Decimal, now: u64) -> Result<(), ContractError> {
    let interest = accrued_since_checkpoint(loan, borrow_rate, now)?;
    loan.accrued_interest = loan.accrued_interest.checked_add(interest)?;
    loan.interest_accrued_at = now;
    Ok(())
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::Addr;
    use keel_types::collateral::LoanState;

    use super::*;

    fn loan() -> Loan {
        Loan {
            id: 1,
            account: Addr::unchecked("borrower"),
            currency: "uusd".to_string(),
            amount: Uint128::new(50_000_000),
            collateral_amount: Uint128::new(100_000_000),
            accrued_interest: Uint128::zero(),
            created_at: 1_000,
            last_interaction: 1_000,
            interest_accrued_at: 1_000,
            state: LoanState::Open,
        }
    }

    #[test]
    fn no_interest_without_elapsed_time() {
        let loan = loan();
        let rate = Decimal::percent(10);
        assert_eq!(accrued_since_checkpoint(&loan, rate, 1_000).unwrap(), Uint128::zero());
        assert_eq!(accrued_since_checkpoint(&loan, rate, 999).unwrap(), Uint128::zero());
    }

    #[test]
    fn interest_is_linear_in_time() {
        let loan = loan();
        let rate = Decimal::percent(10);
        // a full year of simple interest on 50_000_000 at 10%
        let one_year =
            accrued_since_checkpoint(&loan, rate, 1_000 + SECONDS_PER_YEAR).unwrap();
        assert_eq!(one_year, Uint128::new(5_000_000));
        let half_year =
            accrued_since_checkpoint(&loan, rate, 1_000 + SECONDS_PER_YEAR / 2).unwrap();
        assert_eq!(half_year, Uint128::new(2_500_000));
    }

    #[test]
    fn closed_loans_accrue_nothing() {
        let mut loan = loan();
        loan.state = LoanState::Closed;
        let rate = Decimal::percent(10);
        let accrued =
            accrued_since_checkpoint(&loan, rate, 1_000 + SECONDS_PER_YEAR).unwrap();
        assert_eq!(accrued, Uint128::zero());
    }

    #[test]
    fn accrue_moves_the_checkpoint() {
        let mut loan = loan();
        let rate = Decimal::percent(10);
        accrue(&mut loan, rate, 1_000 + SECONDS_PER_YEAR).unwrap();
        assert_eq!(loan.accrued_interest, Uint128::new(5_000_000));
        assert_eq!(loan.interest_accrued_at, 1_000 + SECONDS_PER_YEAR);

        // accruing again at the same timestamp adds nothing
        accrue(&mut loan, rate, 1_000 + SECONDS_PER_YEAR).unwrap();
        assert_eq!(loan.accrued_interest, Uint128::new(5_000_000));
    }
}
