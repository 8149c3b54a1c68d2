use cosmwasm_std::{OverflowError, StdError};
use keel_types::LoanDirection;
use mars_owner::OwnerError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Owner(#[from] OwnerError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Sender is not a registered collateral contract: {sender}")]
    NotRegisteredCollateral {
        sender: String,
    },

    #[error("Cannot decrement {direction} exposure for {currency} below zero")]
    ExposureUnderflow {
        currency: String,
        direction: LoanDirection,
    },
}
