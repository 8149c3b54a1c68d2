use cosmwasm_std::{
    CheckedFromRatioError, CheckedMultiplyFractionError, Decimal, OverflowError, StdError, Uint128,
};
use cw_utils::PaymentError;
use mars_owner::OwnerError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Owner(#[from] OwnerError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    CheckedFromRatio(#[from] CheckedFromRatioError),

    #[error("{0}")]
    CheckedMultiplyFraction(#[from] CheckedMultiplyFractionError),

    #[error("Invalid param: {param_name} is {invalid_value}, but it should be {predicate}")]
    InvalidParam {
        param_name: String,
        invalid_value: String,
        predicate: String,
    },

    #[error("Loan opening is currently disabled")]
    LoanOpeningDisabled {},

    #[error("Currency {currency:?} cannot be borrowed against this collateral")]
    UnsupportedCurrency {
        currency: String,
    },

    #[error("Expected collateral denom {expected:?}, got {got:?}")]
    InvalidCollateralDenom {
        expected: String,
        got: String,
    },

    #[error("Borrow amount must be greater than 0")]
    InvalidBorrowAmount {},

    #[error("Loan would fall below the minimum collateral ratio ({actual} < {minimum})")]
    BelowMinimumCollateralRatio {
        minimum: Decimal,
        actual: Decimal,
    },

    #[error("Contract does not have enough liquidity to pay out the borrowed amount")]
    OperationExceedsAvailableLiquidity {},

    #[error("No loan with id {id} found for account {account:?}")]
    LoanNotFound {
        account: String,
        id: u64,
    },

    #[error("Loan {id} is closed")]
    LoanClosed {
        id: u64,
    },

    #[error("Loan {id} has no outstanding debt to measure collateral against")]
    NoOutstandingDebt {
        id: u64,
    },

    #[error("Interaction delay has not expired; loan can be touched again at {ready_at}")]
    InteractionDelayNotExpired {
        ready_at: u64,
    },

    #[error("Withdraw amount must be greater than 0 and less or equal to the loan's collateral")]
    InvalidWithdrawAmount {},

    #[error("Repayment must be made in the loan's currency {currency:?}")]
    InvalidRepaymentDenom {
        currency: String,
    },

    #[error("Amount to repay is greater than total debt")]
    CannotRepayMoreThanDebt {},

    #[error("Closing this loan requires paying exactly {expected}, got {got}")]
    PaymentAmountMismatch {
        expected: Uint128,
        got: Uint128,
    },

    #[error("No pending collateral withdrawals to claim")]
    NothingToClaim {},

    #[error("Claim amount exceeds pending withdrawals")]
    ClaimExceedsPendingWithdrawals {},
}
