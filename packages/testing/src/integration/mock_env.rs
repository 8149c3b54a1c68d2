use std::{collections::HashMap, mem::take, str::FromStr};

use anyhow::Result as AnyResult;
use cosmwasm_std::{coin, coins, Addr, BankMsg, Coin, CosmosMsg, Decimal, StdResult, Uint128};
use cw_multi_test::{App, AppResponse, BankSudo, BasicApp, Executor, SudoMsg};
use keel_types::{
    collateral::{self, ConfigUpdates, LoanResponse, StateResponse},
    manager::{self, ExposureResponse, SystemDebtResponse},
    oracle::{self, CoinPrice, PriceResponse},
    resolver::{self, AddressResponseItem, ContractKey},
    LoanDirection,
};
use mars_owner::{OwnerResponse, OwnerUpdate};

use crate::{
    integration::mock_contracts::{
        mock_address_resolver_contract, mock_collateral_contract, mock_loan_manager_contract,
        mock_oracle_contract,
    },
    network::Network,
};

pub struct TestEnv {
    pub app: App,
    pub owner: Addr,
    pub fee_pool: Addr,
    pub network: Network,
    pub resolver: Resolver,
    pub oracle: Oracle,
    pub loan_manager: LoanManager,
    pub collateral_native: Collateral,
    pub collateral_token: Collateral,
    pub collateral_short: Collateral,
}

#[derive(Clone)]
pub struct Resolver {
    pub contract_addr: Addr,
}

#[derive(Clone)]
pub struct Oracle {
    pub contract_addr: Addr,
}

#[derive(Clone)]
pub struct LoanManager {
    pub contract_addr: Addr,
}

#[derive(Clone)]
pub struct Collateral {
    pub contract_addr: Addr,
    pub collateral_denom: String,
    pub direction: LoanDirection,
    pub borrow_currencies: Vec<String>,
}

impl TestEnv {
    pub fn increment_by_blocks(&mut self, num_of_blocks: u64) {
        self.app.update_block(|block| {
            block.height += num_of_blocks;
            // assume block time = 6 sec
            block.time = block.time.plus_seconds(num_of_blocks * 6);
        })
    }

    pub fn increment_by_time(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.height += seconds / 6;
            // assume block time = 6 sec
            block.time = block.time.plus_seconds(seconds);
        })
    }

    pub fn fund_accounts(&mut self, addrs: &[&Addr], amount: u128, denoms: &[&str]) {
        for addr in addrs {
            let coins: Vec<_> = denoms.iter().map(|&d| coin(amount, d)).collect();
            self.fund_account(addr, &coins);
        }
    }

    pub fn fund_account(&mut self, addr: &Addr, coins: &[Coin]) {
        self.app
            .sudo(SudoMsg::Bank(BankSudo::Mint {
                to_address: addr.to_string(),
                amount: coins.to_vec(),
            }))
            .unwrap();
    }

    /// Send `amount` to `recipient` from the network's funded account for
    /// that denom. On the local chain the whale is topped up first.
    pub fn transfer_from_whale(&mut self, recipient: &Addr, amount: Coin) -> AnyResult<AppResponse> {
        let whale = Addr::unchecked(self.network.funded_account(&amount.denom)?);
        if self.network == Network::Local {
            self.fund_account(&whale, &[amount.clone()]);
        }
        self.app.execute(
            whale,
            CosmosMsg::Bank(BankMsg::Send {
                to_address: recipient.to_string(),
                amount: vec![amount],
            }),
        )
    }

    pub fn query_balance(&self, addr: &Addr, denom: &str) -> StdResult<Coin> {
        self.app.wrap().query_balance(addr, denom)
    }

    pub fn query_all_balances(&self, addr: &Addr) -> HashMap<String, Uint128> {
        let res: Vec<Coin> = self.app.wrap().query_all_balances(addr).unwrap();
        res.into_iter().map(|r| (r.denom, r.amount)).collect()
    }
}

impl Resolver {
    pub fn set_address(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        key: ContractKey,
        address: &Addr,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &resolver::ExecuteMsg::SetAddress {
                key,
                address: address.to_string(),
            },
            &[],
        )
    }

    pub fn update_owner(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        update: OwnerUpdate,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &resolver::ExecuteMsg::UpdateOwner(update),
            &[],
        )
    }

    pub fn query_address(&self, env: &TestEnv, key: ContractKey) -> Addr {
        let res: AddressResponseItem = env
            .app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &resolver::QueryMsg::Address(key))
            .unwrap();
        Addr::unchecked(res.address)
    }

    pub fn query_all_addresses(&self, env: &TestEnv) -> Vec<AddressResponseItem> {
        env.app
            .wrap()
            .query_wasm_smart(
                self.contract_addr.clone(),
                &resolver::QueryMsg::AllAddresses {
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap()
    }

    pub fn query_config(&self, env: &TestEnv) -> resolver::ConfigResponse {
        env.app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &resolver::QueryMsg::Config {})
            .unwrap()
    }
}

impl Oracle {
    pub fn change_price(&self, env: &mut TestEnv, denom: &str, price: Decimal) {
        env.app
            .execute_contract(
                env.owner.clone(),
                self.contract_addr.clone(),
                &oracle::ExecuteMsg::ChangePrice(CoinPrice {
                    denom: denom.to_string(),
                    price,
                }),
                &[],
            )
            .unwrap();
    }

    pub fn query_price(&self, env: &TestEnv, denom: &str) -> Decimal {
        let res: PriceResponse = env
            .app
            .wrap()
            .query_wasm_smart(
                self.contract_addr.clone(),
                &oracle::QueryMsg::Price {
                    denom: denom.to_string(),
                },
            )
            .unwrap();
        res.price
    }
}

impl LoanManager {
    pub fn add_collaterals(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        contracts: Vec<String>,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &manager::ExecuteMsg::AddCollaterals {
                contracts,
            },
            &[],
        )
    }

    pub fn remove_collaterals(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        contracts: Vec<String>,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &manager::ExecuteMsg::RemoveCollaterals {
                contracts,
            },
            &[],
        )
    }

    pub fn increment_exposure(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        currency: &str,
        direction: LoanDirection,
        amount: Uint128,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &manager::ExecuteMsg::IncrementExposure {
                currency: currency.to_string(),
                direction,
                amount,
            },
            &[],
        )
    }

    pub fn decrement_exposure(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        currency: &str,
        direction: LoanDirection,
        amount: Uint128,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &manager::ExecuteMsg::DecrementExposure {
                currency: currency.to_string(),
                direction,
                amount,
            },
            &[],
        )
    }

    pub fn update_owner(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        update: OwnerUpdate,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &manager::ExecuteMsg::UpdateOwner(update),
            &[],
        )
    }

    pub fn query_long(&self, env: &TestEnv, currency: &str) -> Uint128 {
        let res: ExposureResponse = env
            .app
            .wrap()
            .query_wasm_smart(
                self.contract_addr.clone(),
                &manager::QueryMsg::Long {
                    currency: currency.to_string(),
                },
            )
            .unwrap();
        res.amount
    }

    pub fn query_short(&self, env: &TestEnv, currency: &str) -> Uint128 {
        let res: ExposureResponse = env
            .app
            .wrap()
            .query_wasm_smart(
                self.contract_addr.clone(),
                &manager::QueryMsg::Short {
                    currency: currency.to_string(),
                },
            )
            .unwrap();
        res.amount
    }

    pub fn query_system_debt(&self, env: &TestEnv) -> Uint128 {
        let res: SystemDebtResponse = env
            .app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &manager::QueryMsg::SystemDebt {})
            .unwrap();
        res.debt
    }

    pub fn query_collaterals(&self, env: &TestEnv) -> Vec<String> {
        env.app
            .wrap()
            .query_wasm_smart(
                self.contract_addr.clone(),
                &manager::QueryMsg::Collaterals {
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap()
    }

    pub fn query_config(&self, env: &TestEnv) -> manager::ConfigResponse {
        env.app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &manager::QueryMsg::Config {})
            .unwrap()
    }

    pub fn query_owner(&self, env: &TestEnv) -> OwnerResponse {
        env.app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &manager::QueryMsg::Owner {})
            .unwrap()
    }
}

impl Collateral {
    pub fn open(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        funds: &[Coin],
        amount: Uint128,
        currency: &str,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &collateral::ExecuteMsg::Open {
                amount,
                currency: currency.to_string(),
            },
            funds,
        )
    }

    pub fn deposit(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        account: &Addr,
        id: u64,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &collateral::ExecuteMsg::Deposit {
                account: account.to_string(),
                id,
            },
            funds,
        )
    }

    pub fn withdraw(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        id: u64,
        amount: Uint128,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &collateral::ExecuteMsg::Withdraw {
                id,
                amount,
            },
            &[],
        )
    }

    pub fn repay(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        account: &Addr,
        id: u64,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &collateral::ExecuteMsg::Repay {
                account: account.to_string(),
                id,
            },
            funds,
        )
    }

    pub fn close(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        id: u64,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &collateral::ExecuteMsg::Close {
                id,
            },
            funds,
        )
    }

    pub fn claim(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        amount: Option<Uint128>,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &collateral::ExecuteMsg::Claim {
                amount,
            },
            &[],
        )
    }

    pub fn update_config(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        updates: ConfigUpdates,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &collateral::ExecuteMsg::UpdateConfig {
                updates,
            },
            &[],
        )
    }

    pub fn update_owner(
        &self,
        env: &mut TestEnv,
        sender: &Addr,
        update: OwnerUpdate,
    ) -> AnyResult<AppResponse> {
        env.app.execute_contract(
            sender.clone(),
            self.contract_addr.clone(),
            &collateral::ExecuteMsg::UpdateOwner(update),
            &[],
        )
    }

    pub fn query_loan(&self, env: &TestEnv, account: &Addr, id: u64) -> StdResult<LoanResponse> {
        env.app.wrap().query_wasm_smart(
            self.contract_addr.clone(),
            &collateral::QueryMsg::Loan {
                account: account.to_string(),
                id,
            },
        )
    }

    pub fn query_loans(
        &self,
        env: &TestEnv,
        account: &Addr,
        start_after: Option<u64>,
        limit: Option<u32>,
    ) -> Vec<LoanResponse> {
        env.app
            .wrap()
            .query_wasm_smart(
                self.contract_addr.clone(),
                &collateral::QueryMsg::Loans {
                    account: account.to_string(),
                    start_after,
                    limit,
                },
            )
            .unwrap()
    }

    pub fn query_collateral_ratio(
        &self,
        env: &TestEnv,
        account: &Addr,
        id: u64,
    ) -> StdResult<Decimal> {
        env.app.wrap().query_wasm_smart(
            self.contract_addr.clone(),
            &collateral::QueryMsg::CollateralRatio {
                account: account.to_string(),
                id,
            },
        )
    }

    pub fn query_interaction_delay(&self, env: &TestEnv) -> u64 {
        env.app
            .wrap()
            .query_wasm_smart(
                self.contract_addr.clone(),
                &collateral::QueryMsg::InteractionDelay {},
            )
            .unwrap()
    }

    pub fn query_issue_fee_rate(&self, env: &TestEnv) -> Decimal {
        env.app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &collateral::QueryMsg::IssueFeeRate {})
            .unwrap()
    }

    pub fn query_state(&self, env: &TestEnv) -> StateResponse {
        env.app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &collateral::QueryMsg::State {})
            .unwrap()
    }

    pub fn query_pending_withdrawal(&self, env: &TestEnv, account: &Addr) -> Uint128 {
        env.app
            .wrap()
            .query_wasm_smart(
                self.contract_addr.clone(),
                &collateral::QueryMsg::PendingWithdrawal {
                    account: account.to_string(),
                },
            )
            .unwrap()
    }

    pub fn query_config(&self, env: &TestEnv) -> collateral::ConfigResponse {
        env.app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &collateral::QueryMsg::Config {})
            .unwrap()
    }

    pub fn query_owner(&self, env: &TestEnv) -> OwnerResponse {
        env.app
            .wrap()
            .query_wasm_smart(self.contract_addr.clone(), &collateral::QueryMsg::Owner {})
            .unwrap()
    }
}

pub struct TestEnvBuilder {
    app: BasicApp,
    owner: Addr,
    network: Network,
    fee_pool: Addr,

    native_denom: String,
    token_denom: String,
    stable_denom: String,
    prices: Vec<(String, Decimal)>,

    minimum_collateral_ratio: Decimal,
    issue_fee_rate: Decimal,
    interaction_delay: u64,
    borrow_rate: Decimal,
    system_debt: Uint128,
    seed_liquidity: u128,
}

impl TestEnvBuilder {
    pub fn new(owner: Addr) -> Self {
        Self {
            app: App::default(),
            owner,
            network: Network::from_env(),
            fee_pool: Addr::unchecked("fee_pool"),
            native_denom: "uosmo".to_string(),
            token_denom: "uatom".to_string(),
            stable_denom: "uusd".to_string(),
            prices: vec![
                ("uosmo".to_string(), Decimal::from_str("2").unwrap()),
                ("uatom".to_string(), Decimal::from_str("10").unwrap()),
                ("uusd".to_string(), Decimal::one()),
            ],
            minimum_collateral_ratio: Decimal::from_str("1.5").unwrap(),
            issue_fee_rate: Decimal::percent(1),
            interaction_delay: 300,
            borrow_rate: Decimal::percent(10),
            system_debt: Uint128::new(1_000_000_000),
            seed_liquidity: 1_000_000_000_000,
        }
    }

    pub fn minimum_collateral_ratio(&mut self, ratio: Decimal) -> &mut Self {
        self.minimum_collateral_ratio = ratio;
        self
    }

    pub fn issue_fee_rate(&mut self, rate: Decimal) -> &mut Self {
        self.issue_fee_rate = rate;
        self
    }

    pub fn interaction_delay(&mut self, seconds: u64) -> &mut Self {
        self.interaction_delay = seconds;
        self
    }

    pub fn borrow_rate(&mut self, rate: Decimal) -> &mut Self {
        self.borrow_rate = rate;
        self
    }

    pub fn system_debt(&mut self, debt: Uint128) -> &mut Self {
        self.system_debt = debt;
        self
    }

    pub fn seed_liquidity(&mut self, amount: u128) -> &mut Self {
        self.seed_liquidity = amount;
        self
    }

    pub fn price(&mut self, denom: &str, price: Decimal) -> &mut Self {
        self.prices.retain(|(d, _)| d != denom);
        self.prices.push((denom.to_string(), price));
        self
    }

    pub fn build(&mut self) -> TestEnv {
        let resolver_addr = self.deploy_address_resolver();
        let oracle_addr = self.deploy_oracle();
        let loan_manager_addr = self.deploy_loan_manager();

        let native_denom = self.native_denom.clone();
        let token_denom = self.token_denom.clone();
        let stable_denom = self.stable_denom.clone();

        let native_addr = self.deploy_collateral(
            &resolver_addr,
            &native_denom,
            LoanDirection::Long,
            vec![stable_denom.clone()],
            true,
            "collateral-native",
        );
        let token_addr = self.deploy_collateral(
            &resolver_addr,
            &token_denom,
            LoanDirection::Long,
            vec![stable_denom.clone()],
            false,
            "collateral-token",
        );
        let short_addr = self.deploy_collateral(
            &resolver_addr,
            &stable_denom,
            LoanDirection::Short,
            vec![token_denom.clone()],
            false,
            "collateral-short",
        );

        let fee_pool = self.fee_pool.clone();
        self.register_address(&resolver_addr, ContractKey::LoanManager, &loan_manager_addr);
        self.register_address(&resolver_addr, ContractKey::Oracle, &oracle_addr);
        self.register_address(&resolver_addr, ContractKey::FeePool, &fee_pool);
        self.register_address(&resolver_addr, ContractKey::CollateralNative, &native_addr);
        self.register_address(&resolver_addr, ContractKey::CollateralToken, &token_addr);
        self.register_address(&resolver_addr, ContractKey::CollateralShort, &short_addr);

        self.app
            .execute_contract(
                self.owner.clone(),
                loan_manager_addr,
                &manager::ExecuteMsg::AddCollaterals {
                    contracts: vec![
                        native_addr.to_string(),
                        token_addr.to_string(),
                        short_addr.to_string(),
                    ],
                },
                &[],
            )
            .unwrap();

        // borrowed funds are paid out of each contract's own liquidity
        self.mint_liquidity(&native_addr, &stable_denom);
        self.mint_liquidity(&token_addr, &stable_denom);
        self.mint_liquidity(&short_addr, &token_denom);

        // handles are bound through the resolver rather than the addresses
        // returned at deployment, so a stale registration surfaces here
        let resolver = Resolver {
            contract_addr: resolver_addr,
        };
        let oracle = Oracle {
            contract_addr: self.resolve(&resolver, ContractKey::Oracle),
        };
        let loan_manager = LoanManager {
            contract_addr: self.resolve(&resolver, ContractKey::LoanManager),
        };
        let collateral_native = self.bind_collateral(&resolver, ContractKey::CollateralNative);
        let collateral_token = self.bind_collateral(&resolver, ContractKey::CollateralToken);
        let collateral_short = self.bind_collateral(&resolver, ContractKey::CollateralShort);

        TestEnv {
            app: take(&mut self.app),
            owner: self.owner.clone(),
            fee_pool: self.fee_pool.clone(),
            network: self.network,
            resolver,
            oracle,
            loan_manager,
            collateral_native,
            collateral_token,
            collateral_short,
        }
    }

    fn deploy_address_resolver(&mut self) -> Addr {
        let code_id = self.app.store_code(mock_address_resolver_contract());

        self.app
            .instantiate_contract(
                code_id,
                self.owner.clone(),
                &resolver::InstantiateMsg {
                    owner: self.owner.to_string(),
                },
                &[],
                "address-resolver",
                None,
            )
            .unwrap()
    }

    fn deploy_oracle(&mut self) -> Addr {
        let code_id = self.app.store_code(mock_oracle_contract());

        self.app
            .instantiate_contract(
                code_id,
                self.owner.clone(),
                &oracle::InstantiateMsg {
                    prices: self
                        .prices
                        .iter()
                        .map(|(denom, price)| CoinPrice {
                            denom: denom.clone(),
                            price: *price,
                        })
                        .collect(),
                },
                &[],
                "oracle",
                None,
            )
            .unwrap()
    }

    fn deploy_loan_manager(&mut self) -> Addr {
        let code_id = self.app.store_code(mock_loan_manager_contract());

        self.app
            .instantiate_contract(
                code_id,
                self.owner.clone(),
                &manager::InstantiateMsg {
                    owner: self.owner.to_string(),
                    system_debt: self.system_debt,
                },
                &[],
                "loan-manager",
                None,
            )
            .unwrap()
    }

    fn deploy_collateral(
        &mut self,
        resolver_addr: &Addr,
        collateral_denom: &str,
        direction: LoanDirection,
        borrow_currencies: Vec<String>,
        deferred_claims: bool,
        label: &str,
    ) -> Addr {
        let code_id = self.app.store_code(mock_collateral_contract());

        self.app
            .instantiate_contract(
                code_id,
                self.owner.clone(),
                &collateral::InstantiateMsg {
                    owner: self.owner.to_string(),
                    resolver: resolver_addr.to_string(),
                    collateral_denom: collateral_denom.to_string(),
                    direction,
                    minimum_collateral_ratio: self.minimum_collateral_ratio,
                    issue_fee_rate: self.issue_fee_rate,
                    interaction_delay: self.interaction_delay,
                    borrow_rate: self.borrow_rate,
                    deferred_claims,
                    borrow_currencies,
                },
                &[],
                label,
                None,
            )
            .unwrap()
    }

    fn register_address(&mut self, resolver_addr: &Addr, key: ContractKey, addr: &Addr) {
        self.app
            .execute_contract(
                self.owner.clone(),
                resolver_addr.clone(),
                &resolver::ExecuteMsg::SetAddress {
                    key,
                    address: addr.to_string(),
                },
                &[],
            )
            .unwrap();
    }

    fn mint_liquidity(&mut self, contract_addr: &Addr, denom: &str) {
        self.app
            .sudo(SudoMsg::Bank(BankSudo::Mint {
                to_address: contract_addr.to_string(),
                amount: coins(self.seed_liquidity, denom),
            }))
            .unwrap();
    }

    fn resolve(&self, resolver: &Resolver, key: ContractKey) -> Addr {
        let res: AddressResponseItem = self
            .app
            .wrap()
            .query_wasm_smart(resolver.contract_addr.clone(), &resolver::QueryMsg::Address(key))
            .unwrap();
        Addr::unchecked(res.address)
    }

    fn bind_collateral(&self, resolver: &Resolver, key: ContractKey) -> Collateral {
        let contract_addr = self.resolve(resolver, key);
        let config: collateral::ConfigResponse = self
            .app
            .wrap()
            .query_wasm_smart(contract_addr.clone(), &collateral::QueryMsg::Config {})
            .unwrap();
        Collateral {
            contract_addr,
            collateral_denom: config.collateral_denom,
            direction: config.direction,
            borrow_currencies: config.borrow_currencies,
        }
    }
}
