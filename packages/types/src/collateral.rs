use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Decimal, Uint128};
use mars_owner::OwnerUpdate;

use crate::LoanDirection;

#[cw_serde]
pub struct InstantiateMsg {
    /// Contract's owner
    pub owner: String,
    /// Address resolver used to locate the oracle, loan manager and fee pool
    pub resolver: String,
    /// Denom accepted as collateral by this instance
    pub collateral_denom: String,
    /// Whether loans opened here count as long or short exposure
    pub direction: LoanDirection,
    /// Minimum collateral value / debt value a loan must keep
    pub minimum_collateral_ratio: Decimal,
    /// Fee charged at loan creation, proportional to the borrowed amount
    pub issue_fee_rate: Decimal,
    /// Seconds that must pass between consecutive actions on a loan
    pub interaction_delay: u64,
    /// Annual simple-interest rate charged on outstanding principal
    pub borrow_rate: Decimal,
    /// If set, collateral payouts are parked as pending withdrawals and
    /// must be collected with `Claim`
    pub deferred_claims: bool,
    /// Currencies that can be borrowed against this collateral
    pub borrow_currencies: Vec<String>,
}

/// Owner-updatable subset of the config
#[cw_serde]
#[derive(Default)]
pub struct ConfigUpdates {
    pub minimum_collateral_ratio: Option<Decimal>,
    pub issue_fee_rate: Option<Decimal>,
    pub interaction_delay: Option<u64>,
    pub borrow_rate: Option<Decimal>,
    pub can_open_loans: Option<bool>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Manages owner state
    UpdateOwner(OwnerUpdate),

    /// Update contract config (only owner can call)
    UpdateConfig {
        updates: ConfigUpdates,
    },

    /// Open a new loan. Collateral must be sent in the transaction this
    /// call is made; the net borrowed amount (after the issuance fee) is
    /// paid out from the contract's liquidity.
    Open {
        /// Amount of `currency` to borrow
        amount: Uint128,
        /// Currency to borrow
        currency: String,
    },

    /// Add collateral to an existing loan. Anyone can top up any account's
    /// loan; the collateral must be sent along.
    Deposit {
        /// Owner of the loan
        account: String,
        /// Loan id
        id: u64,
    },

    /// Withdraw collateral from one of the sender's loans, as long as the
    /// loan stays above the minimum collateral ratio
    Withdraw {
        id: u64,
        amount: Uint128,
    },

    /// Repay part or all of a loan's outstanding debt. The repayment must
    /// be sent in the loan's currency; accrued interest settles first.
    Repay {
        account: String,
        id: u64,
    },

    /// Close one of the sender's loans by paying exactly the outstanding
    /// debt; the loan's collateral is returned
    Close {
        id: u64,
    },

    /// Collect pending collateral withdrawals (deferred-claims instances
    /// only). Claims everything when `amount` is `None`.
    Claim {
        amount: Option<Uint128>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Contract configuration
    #[returns(ConfigResponse)]
    Config {},
    /// Contract ownership
    #[returns(mars_owner::OwnerResponse)]
    Owner {},
    /// A single loan, with interest accrued up to the current block
    #[returns(LoanResponse)]
    Loan {
        account: String,
        id: u64,
    },
    /// All loans of an account
    #[returns(Vec<LoanResponse>)]
    Loans {
        account: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Current collateral value / debt value of a loan
    #[returns(Decimal)]
    CollateralRatio {
        account: String,
        id: u64,
    },
    /// Seconds between allowed interactions on the same loan
    #[returns(u64)]
    InteractionDelay {},
    /// Fee rate applied to the borrowed amount at loan creation
    #[returns(Decimal)]
    IssueFeeRate {},
    /// Loan counters and the open/closed-for-business flag
    #[returns(StateResponse)]
    State {},
    /// Collateral parked for the account, awaiting `Claim`
    #[returns(Uint128)]
    PendingWithdrawal {
        account: String,
    },
}

#[cw_serde]
pub struct Config {
    pub resolver: Addr,
    pub collateral_denom: String,
    pub direction: LoanDirection,
    pub minimum_collateral_ratio: Decimal,
    pub issue_fee_rate: Decimal,
    pub interaction_delay: u64,
    pub borrow_rate: Decimal,
    pub deferred_claims: bool,
    pub can_open_loans: bool,
    pub borrow_currencies: Vec<String>,
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Option<String>,
    pub proposed_new_owner: Option<String>,
    pub resolver: String,
    pub collateral_denom: String,
    pub direction: LoanDirection,
    pub minimum_collateral_ratio: Decimal,
    pub issue_fee_rate: Decimal,
    pub interaction_delay: u64,
    pub borrow_rate: Decimal,
    pub deferred_claims: bool,
    pub can_open_loans: bool,
    pub borrow_currencies: Vec<String>,
}

#[cw_serde]
#[derive(Copy)]
pub enum LoanState {
    Open,
    Closed,
}

/// A loan as stored by the contract. Interest is accrued lazily: the
/// amount recorded here is exact as of `interest_accrued_at`.
#[cw_serde]
pub struct Loan {
    pub id: u64,
    pub account: Addr,
    /// Borrowed currency
    pub currency: String,
    /// Outstanding principal
    pub amount: Uint128,
    /// Locked collateral, in the contract's collateral denom
    pub collateral_amount: Uint128,
    /// Interest accrued but not yet repaid
    pub accrued_interest: Uint128,
    pub created_at: u64,
    /// Timestamp of the last state-changing interaction
    pub last_interaction: u64,
    /// Timestamp up to which interest has been accrued
    pub interest_accrued_at: u64,
    pub state: LoanState,
}

#[cw_serde]
pub struct LoanResponse {
    pub id: u64,
    pub account: Addr,
    pub currency: String,
    /// Outstanding principal
    pub amount: Uint128,
    /// Locked collateral
    pub collateral: Coin,
    /// Interest accrued up to the query's block time
    pub accrued_interest: Uint128,
    /// Principal plus accrued interest
    pub total_owed: Uint128,
    pub created_at: u64,
    pub last_interaction: u64,
    pub state: LoanState,
}

#[cw_serde]
pub struct StateResponse {
    /// Loans ever opened by this contract; the next loan gets id
    /// `total_loans + 1`
    pub total_loans: u64,
    pub open_loans: u64,
    pub can_open_loans: bool,
}
