//! Chain id check against a live endpoint.
//!
//! The host tool refuses to talk to an endpoint whose chain id differs from
//! the one declared for the network. This module performs the same check
//! ahead of time with a single `eth_chainId` call.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::LoadMode;
use crate::network::{endpoint_origin, Network, NetworkConfig};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("network {0} has no endpoint configured")]
    Unconfigured(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("RPC response has neither result nor error")]
    EmptyResponse,

    #[error("malformed chain id: {0}")]
    MalformedChainId(String),

    #[error(
        "network {network} is declared with chain id {expected} but the endpoint reports {actual}"
    )]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Mode to load the configuration in before checking `network`.
///
/// The local node needs none of the testnet's inputs, so checking it never
/// requires them. `None` keeps the caller's mode.
pub fn load_mode_for(network: Network) -> Option<LoadMode> {
    match network {
        Network::Localhost => Some(LoadMode::CompileOnly),
        Network::Testnet => None,
    }
}

/// Parse a JSON-RPC hex quantity such as `"0xaa36a7"`
pub fn parse_chain_id(quantity: &str) -> Result<u64, ProbeError> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| ProbeError::MalformedChainId(quantity.to_string()))?;
    u64::from_str_radix(digits, 16).map_err(|_| ProbeError::MalformedChainId(quantity.to_string()))
}

/// Ask `url` for its chain id
pub async fn fetch_chain_id(client: &Client, url: &str) -> Result<u64, ProbeError> {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_chainId",
        "params": [],
    });

    // reqwest errors carry the full URL, which may embed a provider key.
    let response: RpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ProbeError::Http(e.without_url()))?
        .json()
        .await
        .map_err(|e| ProbeError::Http(e.without_url()))?;

    if let Some(error) = response.error {
        return Err(ProbeError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    let quantity = response.result.ok_or(ProbeError::EmptyResponse)?;
    debug!(endpoint = %endpoint_origin(url), %quantity, "endpoint answered eth_chainId");
    parse_chain_id(&quantity)
}

/// Check that the endpoint behind `network` reports the declared chain id
pub async fn verify_chain_id(
    name: &str,
    network: &NetworkConfig,
    timeout: Duration,
) -> Result<u64, ProbeError> {
    if !network.has_endpoint() {
        return Err(ProbeError::Unconfigured(name.to_string()));
    }

    let client = Client::builder().timeout(timeout).build()?;
    let actual = fetch_chain_id(&client, &network.url).await?;
    if actual != network.chain_id {
        return Err(ProbeError::ChainIdMismatch {
            network: name.to_string(),
            expected: network.chain_id,
            actual,
        });
    }

    info!(network = name, chain_id = actual, "endpoint chain id matches");
    Ok(actual)
}
