use cosmwasm_std::{coin, Addr, Decimal, Uint128};
use cw_utils::PaymentError;
use keel_mock_collateral::error::ContractError;
use keel_testing::integration::mock_env::{Collateral, TestEnv};

mod helpers;

use helpers::{
    assert_err, default_env, expected_interest, NATIVE_DENOM, STABLE_DENOM, TOKEN_DENOM,
};

/// Opens a 2.0-ratio token loan for `account` and returns its id.
fn open_token_loan(env: &mut TestEnv, contract: &Collateral, account: &Addr) -> u64 {
    env.fund_account(account, &[coin(20_000_000, TOKEN_DENOM)]);
    contract
        .open(
            env,
            account,
            &[coin(20_000_000, TOKEN_DENOM)],
            Uint128::new(100_000_000),
            STABLE_DENOM,
        )
        .unwrap();
    contract.query_state(env).total_loans
}

#[test]
fn actions_are_gated_by_the_interaction_delay() {
    let mut env = default_env();
    let contract = env.collateral_token.clone();
    let alice = Addr::unchecked("alice");
    env.fund_account(&alice, &[coin(1_000_000, TOKEN_DENOM)]);

    let opened_at = env.app.block_info().time.seconds();
    let id = open_token_loan(&mut env, &contract, &alice);
    let delay = contract.query_interaction_delay(&env);
    let ready_at = opened_at + delay;

    // same block
    let res = contract.deposit(&mut env, &alice, &alice, id, &[coin(1_000_000, TOKEN_DENOM)]);
    assert_err(res, ContractError::InteractionDelayNotExpired { ready_at });

    // one second short
    env.increment_by_time(delay - 1);
    let res = contract.withdraw(&mut env, &alice, id, Uint128::new(1));
    assert_err(res, ContractError::InteractionDelayNotExpired { ready_at });

    // exactly at the deadline the loan can be touched again
    env.increment_by_time(1);
    contract.deposit(&mut env, &alice, &alice, id, &[coin(1_000_000, TOKEN_DENOM)]).unwrap();

    // and the deadline moved with the deposit
    let res = contract.withdraw(&mut env, &alice, id, Uint128::new(1));
    assert_err(
        res,
        ContractError::InteractionDelayNotExpired {
            ready_at: ready_at + delay,
        },
    );
}

#[test]
fn anyone_can_top_up_but_only_the_borrower_can_withdraw() {
    let mut env = default_env();
    let contract = env.collateral_token.clone();
    let alice = Addr::unchecked("alice");
    let bob = Addr::unchecked("bob");
    let id = open_token_loan(&mut env, &contract, &alice);
    let delay = contract.query_interaction_delay(&env);

    env.increment_by_time(delay);
    env.fund_account(&bob, &[coin(5_000_000, TOKEN_DENOM)]);
    contract.deposit(&mut env, &bob, &alice, id, &[coin(5_000_000, TOKEN_DENOM)]).unwrap();
    let loan = contract.query_loan(&env, &alice, id).unwrap();
    assert_eq!(loan.collateral.amount, Uint128::new(25_000_000));

    // loans are keyed by account, so bob has no loan with this id
    env.increment_by_time(delay);
    let res = contract.withdraw(&mut env, &bob, id, Uint128::new(1_000_000));
    assert_err(
        res,
        ContractError::LoanNotFound {
            account: bob.to_string(),
            id,
        },
    );
}

#[test]
fn deposit_validates_loan_and_denom() {
    let mut env = default_env();
    let contract = env.collateral_token.clone();
    let alice = Addr::unchecked("alice");
    let id = open_token_loan(&mut env, &contract, &alice);
    let delay = contract.query_interaction_delay(&env);

    env.fund_account(&alice, &[coin(1, TOKEN_DENOM)]);
    let res = contract.deposit(&mut env, &alice, &alice, 99, &[coin(1, TOKEN_DENOM)]);
    assert_err(
        res,
        ContractError::LoanNotFound {
            account: alice.to_string(),
            id: 99,
        },
    );

    env.increment_by_time(delay);
    env.fund_account(&alice, &[coin(1_000_000, NATIVE_DENOM)]);
    let res = contract.deposit(&mut env, &alice, &alice, id, &[coin(1_000_000, NATIVE_DENOM)]);
    assert_err(
        res,
        ContractError::InvalidCollateralDenom {
            expected: TOKEN_DENOM.to_string(),
            got: NATIVE_DENOM.to_string(),
        },
    );

    let res = contract.deposit(&mut env, &alice, &alice, id, &[]);
    assert_err(res, ContractError::Payment(PaymentError::NoFunds {}));
}

#[test]
fn withdraw_respects_bounds_and_the_minimum_ratio() {
    let mut env = default_env();
    let contract = env.collateral_token.clone();
    let alice = Addr::unchecked("alice");
    let id = open_token_loan(&mut env, &contract, &alice);
    let delay = contract.query_interaction_delay(&env);
    let rate = contract.query_config(&env).borrow_rate;

    env.increment_by_time(delay);

    let res = contract.withdraw(&mut env, &alice, id, Uint128::zero());
    assert_err(res, ContractError::InvalidWithdrawAmount {});

    let res = contract.withdraw(&mut env, &alice, id, Uint128::new(20_000_001));
    assert_err(res, ContractError::InvalidWithdrawAmount {});

    // taking out 6M uatom would leave 14M (value 140M) against the debt
    let debt = Uint128::new(100_000_000) + expected_interest(Uint128::new(100_000_000), rate, delay);
    let res = contract.withdraw(&mut env, &alice, id, Uint128::new(6_000_000));
    assert_err(
        res,
        ContractError::BelowMinimumCollateralRatio {
            minimum: Decimal::percent(150),
            actual: Decimal::from_ratio(140_000_000u128, debt),
        },
    );

    // a withdrawal that keeps the loan above the minimum goes through
    contract.withdraw(&mut env, &alice, id, Uint128::new(1_000_000)).unwrap();
    assert_eq!(
        env.query_balance(&alice, TOKEN_DENOM).unwrap().amount,
        Uint128::new(1_000_000)
    );
}

#[test]
fn repay_validates_denom_and_amount() {
    let mut env = default_env();
    let contract = env.collateral_token.clone();
    let alice = Addr::unchecked("alice");
    let id = open_token_loan(&mut env, &contract, &alice);
    let delay = contract.query_interaction_delay(&env);

    env.increment_by_time(delay);

    env.fund_account(&alice, &[coin(1_000_000, NATIVE_DENOM)]);
    let res = contract.repay(&mut env, &alice, &alice, id, &[coin(1_000_000, NATIVE_DENOM)]);
    assert_err(
        res,
        ContractError::InvalidRepaymentDenom {
            currency: STABLE_DENOM.to_string(),
        },
    );

    let owed = contract.query_loan(&env, &alice, id).unwrap().total_owed;
    env.fund_account(&alice, &[coin(owed.u128() + 1, STABLE_DENOM)]);
    let res = contract.repay(&mut env, &alice, &alice, id, &[coin(owed.u128() + 1, STABLE_DENOM)]);
    assert_err(res, ContractError::CannotRepayMoreThanDebt {});

    let res = contract.repay(&mut env, &alice, &alice, id, &[]);
    assert_err(res, ContractError::Payment(PaymentError::NoFunds {}));
}

#[test]
fn close_requires_exact_payment() {
    let mut env = default_env();
    let contract = env.collateral_token.clone();
    let alice = Addr::unchecked("alice");
    let id = open_token_loan(&mut env, &contract, &alice);
    let delay = contract.query_interaction_delay(&env);

    env.increment_by_time(delay);
    let owed = contract.query_loan(&env, &alice, id).unwrap().total_owed;
    env.fund_account(&alice, &[coin(owed.u128(), STABLE_DENOM)]);

    let res = contract.close(&mut env, &alice, id, &[coin(owed.u128() - 1, STABLE_DENOM)]);
    assert_err(
        res,
        ContractError::PaymentAmountMismatch {
            expected: owed,
            got: owed - Uint128::one(),
        },
    );

    env.fund_account(&alice, &[coin(1_000_000, NATIVE_DENOM)]);
    let res = contract.close(&mut env, &alice, id, &[coin(1_000_000, NATIVE_DENOM)]);
    assert_err(
        res,
        ContractError::InvalidRepaymentDenom {
            currency: STABLE_DENOM.to_string(),
        },
    );

    contract.close(&mut env, &alice, id, &[coin(owed.u128(), STABLE_DENOM)]).unwrap();

    // a closed loan rejects further actions, including a second close
    env.increment_by_time(delay);
    let res = contract.close(&mut env, &alice, id, &[]);
    assert_err(res, ContractError::LoanClosed { id });
    env.fund_account(&alice, &[coin(1, TOKEN_DENOM)]);
    let res = contract.deposit(&mut env, &alice, &alice, id, &[coin(1, TOKEN_DENOM)]);
    assert_err(res, ContractError::LoanClosed { id });
}

#[test]
fn claims_are_bounded_by_pending_withdrawals() {
    let mut env = default_env();
    let contract = env.collateral_native.clone();
    let alice = Addr::unchecked("alice");
    env.fund_account(&alice, &[coin(100_000_000, NATIVE_DENOM)]);
    contract
        .open(
            &mut env,
            &alice,
            &[coin(100_000_000, NATIVE_DENOM)],
            Uint128::new(50_000_000),
            STABLE_DENOM,
        )
        .unwrap();
    let delay = contract.query_interaction_delay(&env);

    env.increment_by_time(delay);
    contract.withdraw(&mut env, &alice, 1, Uint128::new(10_000_000)).unwrap();
    assert_eq!(contract.query_pending_withdrawal(&env, &alice), Uint128::new(10_000_000));

    let res = contract.claim(&mut env, &alice, Some(Uint128::new(10_000_001)));
    assert_err(res, ContractError::ClaimExceedsPendingWithdrawals {});
    let res = contract.claim(&mut env, &alice, Some(Uint128::zero()));
    assert_err(res, ContractError::NothingToClaim {});

    // partial claim leaves the remainder pending
    contract.claim(&mut env, &alice, Some(Uint128::new(4_000_000))).unwrap();
    assert_eq!(contract.query_pending_withdrawal(&env, &alice), Uint128::new(6_000_000));
    assert_eq!(
        env.query_balance(&alice, NATIVE_DENOM).unwrap().amount,
        Uint128::new(4_000_000)
    );

    contract.claim(&mut env, &alice, None).unwrap();
    assert_eq!(contract.query_pending_withdrawal(&env, &alice), Uint128::zero());
    assert_eq!(
        env.query_balance(&alice, NATIVE_DENOM).unwrap().amount,
        Uint128::new(10_000_000)
    );
}

#[test]
fn fully_repaid_open_loans_report_no_ratio() {
    let mut env = default_env();
    let contract = env.collateral_token.clone();
    let alice = Addr::unchecked("alice");
    let id = open_token_loan(&mut env, &contract, &alice);
    let delay = contract.query_interaction_delay(&env);

    env.increment_by_time(delay);
    let owed = contract.query_loan(&env, &alice, id).unwrap().total_owed;
    env.fund_account(&alice, &[coin(owed.u128(), STABLE_DENOM)]);
    contract.repay(&mut env, &alice, &alice, id, &[coin(owed.u128(), STABLE_DENOM)]).unwrap();

    // the loan stays open with zero debt, so there is no ratio to compute
    let loan = contract.query_loan(&env, &alice, id).unwrap();
    assert_eq!(loan.total_owed, Uint128::zero());
    let err = contract.query_collateral_ratio(&env, &alice, id).unwrap_err();
    assert!(err.to_string().contains("no outstanding debt"));

    // and every collateral token may leave without a ratio check
    env.increment_by_time(delay);
    contract.withdraw(&mut env, &alice, id, Uint128::new(20_000_000)).unwrap();
    assert_eq!(
        env.query_balance(&alice, TOKEN_DENOM).unwrap().amount,
        Uint128::new(20_000_000)
    );
}

#[test]
fn queries_on_missing_or_closed_loans() {
    let mut env = default_env();
    let contract = env.collateral_token.clone();
    let alice = Addr::unchecked("alice");

    assert!(contract.query_loan(&env, &alice, 1).is_err());
    assert!(contract.query_collateral_ratio(&env, &alice, 1).is_err());

    let id = open_token_loan(&mut env, &contract, &alice);
    let delay = contract.query_interaction_delay(&env);
    env.increment_by_time(delay);
    let owed = contract.query_loan(&env, &alice, id).unwrap().total_owed;
    env.fund_account(&alice, &[coin(owed.u128(), STABLE_DENOM)]);
    contract.close(&mut env, &alice, id, &[coin(owed.u128(), STABLE_DENOM)]).unwrap();

    // the closed loan is still readable, but it has no ratio left
    assert!(contract.query_loan(&env, &alice, id).is_ok());
    assert!(contract.query_collateral_ratio(&env, &alice, id).is_err());
}
