use std::fmt;

use cosmwasm_schema::cw_serde;

pub mod collateral;
pub mod manager;
pub mod oracle;
pub mod resolver;

/// Direction of the exposure a collateral contract opens against the
/// system. Long loans issue the borrowed currency against collateral of a
/// different denom; short loans lock the stable denom and issue the
/// shorted currency.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum LoanDirection {
    Long,
    Short,
}

impl fmt::Display for LoanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanDirection::Long => "long",
            LoanDirection::Short => "short",
        };
        write!(f, "{s}")
    }
}
