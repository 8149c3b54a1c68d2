#![allow(dead_code)]

use anyhow::Result as AnyResult;
use cosmwasm_std::{Addr, Decimal, Uint128};
use cw_multi_test::AppResponse;
use keel_testing::integration::mock_env::{Collateral, TestEnv, TestEnvBuilder};
use keel_types::LoanDirection;

pub const NATIVE_DENOM: &str = "uosmo";
pub const TOKEN_DENOM: &str = "uatom";
pub const STABLE_DENOM: &str = "uusd";

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

pub fn owner() -> Addr {
    Addr::unchecked("owner")
}

pub fn default_env() -> TestEnv {
    TestEnvBuilder::new(owner()).build()
}

/// The three deployed collateral flavours the suites are parameterized over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavour {
    Native,
    Token,
    Short,
}

pub fn collateral(env: &TestEnv, flavour: Flavour) -> Collateral {
    match flavour {
        Flavour::Native => env.collateral_native.clone(),
        Flavour::Token => env.collateral_token.clone(),
        Flavour::Short => env.collateral_short.clone(),
    }
}

/// Collateral and borrow amounts giving a 2.0 collateral ratio under the
/// default oracle prices (uosmo = 2, uatom = 10, uusd = 1).
pub struct LoanFixture {
    pub collateral_amount: u128,
    pub borrow_amount: u128,
}

pub fn loan_fixture(flavour: Flavour) -> LoanFixture {
    match flavour {
        Flavour::Native => LoanFixture {
            collateral_amount: 100_000_000,
            borrow_amount: 100_000_000,
        },
        Flavour::Token => LoanFixture {
            collateral_amount: 20_000_000,
            borrow_amount: 100_000_000,
        },
        Flavour::Short => LoanFixture {
            collateral_amount: 200_000_000,
            borrow_amount: 10_000_000,
        },
    }
}

/// Aggregate exposure on the loan manager for the side this contract reports.
pub fn exposure(env: &TestEnv, contract: &Collateral, currency: &str) -> Uint128 {
    match contract.direction {
        LoanDirection::Long => env.loan_manager.query_long(env, currency),
        LoanDirection::Short => env.loan_manager.query_short(env, currency),
    }
}

/// Simple interest on `principal` over `seconds`, mirroring the contract's
/// per-checkpoint rounding.
pub fn expected_interest(principal: Uint128, rate: Decimal, seconds: u64) -> Uint128 {
    principal.mul_floor(rate * Decimal::from_ratio(seconds, SECONDS_PER_YEAR))
}

pub fn assert_err<E>(res: AnyResult<AppResponse>, expected: E)
where
    E: std::error::Error + PartialEq + Send + Sync + 'static,
{
    match res {
        Ok(_) => panic!("result was not an error"),
        Err(err) => assert_eq!(err.downcast::<E>().unwrap(), expected),
    }
}
