use cosmwasm_std::{
    testing::{mock_env, mock_info},
    Addr,
};
use keel_address_resolver::{contract::execute, error::ContractError, state::ADDRESSES};
use keel_types::resolver::{AddressResponseItem, ContractKey, ExecuteMsg, QueryMsg};
use mars_owner::OwnerError::NotOwner;

use crate::helpers::{th_query, th_setup};

mod helpers;

#[test]
fn setting_an_address() {
    let mut deps = th_setup();

    let msg = ExecuteMsg::SetAddress {
        key: ContractKey::LoanManager,
        address: "loan_manager".to_string(),
    };

    // non-owner cannot set addresses
    let err = execute(deps.as_mut(), mock_env(), mock_info("jake", &[]), msg.clone()).unwrap_err();
    assert_eq!(err, ContractError::Owner(NotOwner {}));

    execute(deps.as_mut(), mock_env(), mock_info("owner", &[]), msg).unwrap();

    let address = ADDRESSES
        .load(deps.as_ref().storage, ContractKey::LoanManager.to_string())
        .unwrap();
    assert_eq!(address, Addr::unchecked("loan_manager"));

    // setting the same key again overwrites
    execute(
        deps.as_mut(),
        mock_env(),
        mock_info("owner", &[]),
        ExecuteMsg::SetAddress {
            key: ContractKey::LoanManager,
            address: "loan_manager_v2".to_string(),
        },
    )
    .unwrap();
    let address = ADDRESSES
        .load(deps.as_ref().storage, ContractKey::LoanManager.to_string())
        .unwrap();
    assert_eq!(address, Addr::unchecked("loan_manager_v2"));
}

#[test]
fn querying_addresses() {
    let mut deps = th_setup();

    for (key, addr) in [
        (ContractKey::Oracle, "oracle"),
        (ContractKey::LoanManager, "loan_manager"),
        (ContractKey::FeePool, "fee_pool"),
    ] {
        ADDRESSES.save(deps.as_mut().storage, key.to_string(), &Addr::unchecked(addr)).unwrap();
    }

    let res: AddressResponseItem = th_query(deps.as_ref(), QueryMsg::Address(ContractKey::Oracle));
    assert_eq!(
        res,
        AddressResponseItem {
            key: ContractKey::Oracle,
            address: "oracle".to_string(),
        }
    );

    let res: Vec<AddressResponseItem> = th_query(
        deps.as_ref(),
        QueryMsg::Addresses(vec![ContractKey::Oracle, ContractKey::FeePool]),
    );
    assert_eq!(
        res,
        vec![
            AddressResponseItem {
                key: ContractKey::Oracle,
                address: "oracle".to_string(),
            },
            AddressResponseItem {
                key: ContractKey::FeePool,
                address: "fee_pool".to_string(),
            }
        ]
    );
}

#[test]
fn querying_all_addresses_paginates_by_key() {
    let mut deps = th_setup();

    for (key, addr) in [
        (ContractKey::Oracle, "oracle"),
        (ContractKey::LoanManager, "loan_manager"),
        (ContractKey::FeePool, "fee_pool"),
    ] {
        ADDRESSES.save(deps.as_mut().storage, key.to_string(), &Addr::unchecked(addr)).unwrap();
    }

    // keys are stored as strings, so the order is lexicographic
    let res: Vec<AddressResponseItem> = th_query(
        deps.as_ref(),
        QueryMsg::AllAddresses {
            start_after: None,
            limit: Some(2),
        },
    );
    assert_eq!(
        res.iter().map(|item| item.key).collect::<Vec<_>>(),
        vec![ContractKey::FeePool, ContractKey::LoanManager]
    );

    let res: Vec<AddressResponseItem> = th_query(
        deps.as_ref(),
        QueryMsg::AllAddresses {
            start_after: Some(ContractKey::LoanManager),
            limit: None,
        },
    );
    assert_eq!(
        res.iter().map(|item| item.key).collect::<Vec<_>>(),
        vec![ContractKey::Oracle]
    );
}

#[test]
fn querying_a_missing_address_fails() {
    let deps = th_setup();

    let res = keel_address_resolver::contract::query(
        deps.as_ref(),
        mock_env(),
        QueryMsg::Address(ContractKey::Oracle),
    );
    assert!(res.is_err());
}
