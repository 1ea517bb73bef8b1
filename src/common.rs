use std::{fmt, str::FromStr, time::Duration};

use alloy::primitives::B256;
use thiserror::Error;

/// Private key used for contract deployment when `L1_ADMIN_PRIVATE_KEY` is not set.
pub const DEFAULT_L1_ADMIN_PRIVATE_KEY: &str =
    "148ab921959d9064168f84e801729806612d7ec1685f6dd5ea1fb3940b69a001";

/// RPC endpoint used for contract deployment when `L1_ESPACE_RPC_URL` is not set.
pub const DEFAULT_L1_RPC_URL: &str = "ws://8.217.148.141/rpc/ws";

/// Chain ID assumed when the endpoint doesn't answer `eth_chainId` and no
/// override was given.
pub const DEFAULT_L1_CHAIN_ID: u64 = 3151908;

/// Default location of the primary node config file.
pub const DEFAULT_CONFIG_PATH: &str = "/opt/blockchain/config.toml";

/// Default location of the secondary (customized) node config file.
pub const DEFAULT_CUSTOM_CONFIG_PATH: &str = "/opt/blockchain/customized_config.toml";

/// How long to wait for a deployment transaction receipt before giving up.
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(600);

/// An error that can occur while deploying the L1 contracts.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DeployError {
    #[error("failed to connect to RPC endpoint {url}: {reason}")]
    Connect { url: String, reason: String },
    #[error("deployment transaction {tx_hash} reverted")]
    TxFailed { tx_hash: B256 },
    #[error("receipt for transaction {tx_hash} is missing a contract address")]
    MissingContractAddress { tx_hash: B256 },
}

/// The identity of the node being provisioned. Only four node slots exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u8);

impl NodeId {
    /// Returns the slot number (1 through 4).
    pub fn slot(&self) -> u8 {
        self.0
    }
}

impl FromStr for NodeId {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(NodeId(1)),
            "2" => Ok(NodeId(2)),
            "3" => Ok(NodeId(3)),
            "4" => Ok(NodeId(4)),
            other => Err(eyre::eyre!("NODE_ID must be 1-4, got: {other}")),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strips an optional `0x`/`0X` prefix from a hex string.
///
/// Keys and addresses are written to the config files without a prefix,
/// whatever form they arrived in.
pub fn strip_hex_prefix(raw: &str) -> &str {
    raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")).unwrap_or(raw)
}

/// Parses a truthy environment value. Accepts `1`, `true`, `yes` and `on`
/// (case-insensitive); everything else is false.
pub fn parse_truthy(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
