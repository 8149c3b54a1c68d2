use cosmwasm_std::Empty;
use cw_multi_test::{App, Contract, ContractWrapper};

pub fn mock_app() -> App {
    App::default()
}

pub fn mock_address_resolver_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        keel_address_resolver::contract::execute,
        keel_address_resolver::contract::instantiate,
        keel_address_resolver::contract::query,
    );
    Box::new(contract)
}

pub fn mock_collateral_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        keel_mock_collateral::contract::execute,
        keel_mock_collateral::contract::instantiate,
        keel_mock_collateral::contract::query,
    );
    Box::new(contract)
}

pub fn mock_loan_manager_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        keel_mock_loan_manager::contract::execute,
        keel_mock_loan_manager::contract::instantiate,
        keel_mock_loan_manager::contract::query,
    );
    Box::new(contract)
}

pub fn mock_oracle_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        keel_mock_oracle::contract::execute,
        keel_mock_oracle::contract::instantiate,
        keel_mock_oracle::contract::query,
    );
    Box::new(contract)
}
