use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use mars_owner::OwnerUpdate;

use crate::LoanDirection;

#[cw_serde]
pub struct InstantiateMsg {
    /// Contract's owner
    pub owner: String,
    /// Debt carried by the wider system at deployment. Loan issuance is
    /// collateral-backed and never moves this figure.
    pub system_debt: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Manages owner state
    UpdateOwner(OwnerUpdate),

    /// Register collateral contracts allowed to report exposure
    /// (only owner can call)
    AddCollaterals {
        contracts: Vec<String>,
    },

    /// Deregister collateral contracts (only owner can call)
    RemoveCollaterals {
        contracts: Vec<String>,
    },

    /// Report newly issued exposure (only registered collaterals can call)
    IncrementExposure {
        currency: String,
        direction: LoanDirection,
        amount: Uint128,
    },

    /// Report repaid exposure (only registered collaterals can call)
    DecrementExposure {
        currency: String,
        direction: LoanDirection,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(mars_owner::OwnerResponse)]
    Owner {},
    /// Aggregate long exposure for a currency
    #[returns(ExposureResponse)]
    Long {
        currency: String,
    },
    /// Aggregate short exposure for a currency
    #[returns(ExposureResponse)]
    Short {
        currency: String,
    },
    /// System-wide debt
    #[returns(SystemDebtResponse)]
    SystemDebt {},
    /// Registered collateral contracts
    #[returns(Vec<String>)]
    Collaterals {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Option<String>,
    pub proposed_new_owner: Option<String>,
    pub system_debt: Uint128,
}

#[cw_serde]
pub struct ExposureResponse {
    pub currency: String,
    pub direction: LoanDirection,
    pub amount: Uint128,
}

#[cw_serde]
pub struct SystemDebtResponse {
    pub debt: Uint128,
}
