//! Declared deployment targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::secret::Secret;

/// Name of the host tool's in-process network. It is always available and
/// never appears in [`crate::BuildConfig::networks`].
pub const BUILTIN_NETWORK: &str = "hardhat";

/// Endpoint used for the testnet when `RPC_URL` is unset in compile-only mode.
pub const PLACEHOLDER_RPC_URL: &str = "******";

/// Networks with an entry in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Public Sepolia test network
    Testnet,
    /// Local development node
    Localhost,
}

impl Network {
    /// Get network as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Localhost => "localhost",
        }
    }

    /// EIP-155 chain id
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Testnet => 11_155_111,
            Network::Localhost => 31_337,
        }
    }

    /// Fixed endpoint, if the network has one. The testnet endpoint always
    /// comes from `RPC_URL`.
    pub fn default_rpc_url(&self) -> Option<&'static str> {
        match self {
            Network::Testnet => None,
            Network::Localhost => Some("http://localhost:8545"),
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "testnet" => Ok(Network::Testnet),
            "localhost" => Ok(Network::Localhost),
            other => Err(ConfigError::InvalidNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scheme and host of an endpoint, without path, query or credentials.
///
/// Hosted RPC providers put the API key in the path, so this is the only
/// part of an endpoint that goes into errors, logs and summaries.
pub fn endpoint_origin(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    match scheme {
        Some(scheme) => format!("{}://{}", scheme, host),
        None => host.to_string(),
    }
}

/// Connection settings for one network entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    /// Which declared network this entry describes
    #[serde(skip)]
    pub network: Network,
    /// JSON-RPC endpoint
    pub url: String,
    /// Signing credentials, in the order the host tool should use them
    pub accounts: Vec<Secret>,
    pub chain_id: u64,
}

impl NetworkConfig {
    /// Entry for `network`, with the chain id it is declared with
    pub fn new(network: Network, url: impl Into<String>, accounts: Vec<Secret>) -> Self {
        Self {
            network,
            url: url.into(),
            accounts,
            chain_id: network.chain_id(),
        }
    }

    /// Whether the endpoint is real. False for the compile-only placeholder.
    pub fn has_endpoint(&self) -> bool {
        self.url != PLACEHOLDER_RPC_URL
    }

    /// Whether transactions can be sent: a real endpoint plus a credential.
    ///
    /// Local nodes supply their own unlocked accounts, so an empty credential
    /// list only matters where the entry was expected to carry one.
    pub fn is_deployable(&self) -> bool {
        self.has_endpoint()
            && (!self.accounts.is_empty() || self.network == Network::Localhost)
    }
}
