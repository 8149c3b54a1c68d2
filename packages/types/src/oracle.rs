use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Decimal;

#[cw_serde]
pub struct CoinPrice {
    pub denom: String,
    pub price: Decimal,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub prices: Vec<CoinPrice>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // Meant to simulate price changes for tests. Not available in prod.
    ChangePrice(CoinPrice),
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PriceResponse)]
    Price {
        denom: String,
    },
}

#[cw_serde]
pub struct PriceResponse {
    pub denom: String,
    pub price: Decimal,
}

pub mod helpers {
    use cosmwasm_std::{Addr, Decimal, Deps, StdResult};

    use super::{PriceResponse, QueryMsg};

    pub fn query_price(deps: Deps, oracle_addr: &Addr, denom: &str) -> StdResult<Decimal> {
        deps.querier
            .query_wasm_smart::<PriceResponse>(
                oracle_addr,
                &QueryMsg::Price {
                    denom: denom.to_string(),
                },
            )
            .map(|res| res.price)
    }
}
