use std::{fmt, str::FromStr};

use anyhow::{bail, Result as AnyResult};

/// Environment variable selecting the network the suite runs against.
pub const NETWORK_ENV: &str = "KEEL_NETWORK";

/// Deployment target for a test run. `Local` is the in-process chain where
/// every contract is deployed fresh and balances are minted on demand;
/// `Testnet` describes a live deployment with a fixed address book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Local,
    Testnet,
}

impl Network {
    /// Resolve the network from `KEEL_NETWORK`, defaulting to `Local` when
    /// the variable is unset or unrecognized.
    pub fn from_env() -> Network {
        std::env::var(NETWORK_ENV).ok().and_then(|raw| raw.parse().ok()).unwrap_or(Network::Local)
    }

    /// Address of the deployed address resolver, for networks that carry a
    /// live deployment. `Local` deploys a fresh resolver per test instead.
    pub fn resolver_addr(&self) -> Option<&'static str> {
        match self {
            Network::Local => None,
            Network::Testnet => {
                Some("osmo1g3kmqpp8608szfp0pdag3r6z85npph7wmccat8lgl3mp407kv73qlld8vh")
            }
        }
    }

    /// A known account holding enough of `denom` to source test fixtures
    /// from. On the local chain any name works since balances are minted.
    pub fn funded_account(&self, denom: &str) -> AnyResult<String> {
        match self {
            Network::Local => Ok(format!("{denom}_whale")),
            Network::Testnet => {
                let whale = TESTNET_WHALES.iter().find(|(d, _)| *d == denom);
                match whale {
                    Some((_, addr)) => Ok(addr.to_string()),
                    None => bail!("no known funded account for {denom} on the {self} network"),
                }
            }
        }
    }
}

const TESTNET_WHALES: &[(&str, &str)] = &[
    ("uosmo", "osmo1wl59k23zngj34l7d42y9yltask7rjlnxgccawc7ltrknp6n52fps94qsjd"),
    ("uatom", "osmo14lncnsph6asrm27mlzkalb3cqvluyc04fcnrym6wkscnlyn2g80sq0msch"),
];

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Network::Local => "local",
            Network::Testnet => "testnet",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Network::Local),
            "testnet" => Ok(Network::Testnet),
            _ => bail!("unknown network: {s}"),
        }
    }
}
