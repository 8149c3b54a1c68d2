use cosmwasm_std::Uint128;
use cw_multi_test::AppResponse;

/// Attributes of the `loan_created` event emitted when a loan is opened.
#[derive(Debug)]
pub struct LoanCreated {
    pub account: String,
    pub id: u64,
    pub amount: Uint128,
    pub currency: String,
    pub issuance_fee: Uint128,
    pub collateral: Uint128,
}

/// Extract the `loan_created` event from an execute response. Panics when
/// the response does not carry one, so call it right after a successful open.
pub fn loan_created(res: &AppResponse) -> LoanCreated {
    let event = res
        .events
        .iter()
        .find(|e| e.ty == "wasm-loan_created")
        .expect("response has no loan_created event");
    let attr = |key: &str| {
        event
            .attributes
            .iter()
            .find(|a| a.key == key)
            .unwrap_or_else(|| panic!("loan_created event has no attribute {key}"))
            .value
            .clone()
    };
    LoanCreated {
        account: attr("account"),
        id: attr("id").parse().unwrap(),
        amount: attr("amount").parse().unwrap(),
        currency: attr("currency"),
        issuance_fee: attr("issuance_fee").parse().unwrap(),
        collateral: attr("collateral").parse().unwrap(),
    }
}
