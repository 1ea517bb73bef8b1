use std::path::PathBuf;

use clap::Parser;
use eyre::{bail, WrapErr};

use crate::common::{
    parse_truthy, strip_hex_prefix, NodeId, DEFAULT_CONFIG_PATH, DEFAULT_CUSTOM_CONFIG_PATH,
};

/// Raw provisioning options. Every option can be given as a CLI flag or
/// through its environment variable.
///
/// Strictly validated inputs (node identity, peer IPs, numerics, toggles)
/// are accepted as raw strings here and checked in [`Settings::from_opts`],
/// so that a bad value is reported as a validation failure (exit code 1)
/// rather than a CLI usage error.
#[derive(Debug, Clone, Parser)]
pub struct ProvisionOpts {
    /// Identity of the node being provisioned, one of 1-4.
    #[clap(long, env = "NODE_ID")]
    pub node_id: Option<String>,
    /// IP address of node 1.
    #[clap(long, env = "NODE1_IP")]
    pub node1_ip: Option<String>,
    /// IP address of node 2.
    #[clap(long, env = "NODE2_IP")]
    pub node2_ip: Option<String>,
    /// IP address of node 3.
    #[clap(long, env = "NODE3_IP")]
    pub node3_ip: Option<String>,
    /// IP address of node 4.
    #[clap(long, env = "NODE4_IP")]
    pub node4_ip: Option<String>,
    /// Chain name, reported in the completion summary.
    #[clap(long, env = "CHAIN_NAME", default_value = "testchain")]
    pub chain_name: String,
    /// Unified p2p port shared by all nodes.
    #[clap(long, env = "P2P_PORT", default_value = "30005")]
    pub p2p_port: String,
    /// L1 eSpace RPC endpoint (http(s) or ws(s)). Also the deployment target.
    #[clap(long, env = "L1_ESPACE_RPC_URL")]
    pub l1_espace_rpc_url: Option<String>,
    /// L1 CoreSpace RPC endpoint.
    #[clap(long, env = "L1_CORESPACE_RPC_URL")]
    pub l1_corespace_rpc_url: Option<String>,
    /// L1 chain id (decimal).
    #[clap(long, env = "L1_CHAIN_ID")]
    pub l1_chain_id: Option<String>,
    /// Admin private key used for deployment, `0x` prefix optional.
    #[clap(long, env = "L1_ADMIN_PRIVATE_KEY")]
    pub l1_admin_private_key: Option<String>,
    /// Admin address override. Derived from the key when absent.
    #[clap(long, env = "L1_ADMIN_ADDRESS")]
    pub l1_admin_address: Option<String>,
    /// Gas price override for deployment transactions (decimal wei).
    #[clap(long, env = "L1_GAS_PRICE")]
    pub l1_gas_price: Option<String>,
    /// Start epoch override (decimal block number).
    #[clap(long, env = "L1_START_EPOCH")]
    pub l1_start_epoch: Option<String>,
    /// Manual address override for the state sender contract.
    #[clap(long, env = "L1_STATE_SENDER_ADDR")]
    pub l1_state_sender_addr: Option<String>,
    /// Manual address override for the unified bridge contract.
    #[clap(long, env = "L1_UNIFIED_BRIDGE_ADDR")]
    pub l1_unified_bridge_addr: Option<String>,
    /// Manual address override for the simple calculator contract.
    #[clap(long, env = "L1_SIMPLE_CALCULATOR_ADDR")]
    pub l1_simple_calculator_addr: Option<String>,
    /// Deploy the L1 contracts as part of the run ("1"/"true"/"yes"/"on").
    #[clap(long, env = "AUTO_DEPLOY_L1_CONTRACTS")]
    pub auto_deploy_l1_contracts: Option<String>,
    /// Alias for `--auto-deploy-l1-contracts`; either one enables deployment.
    #[clap(long, env = "DEPLOY_L1_CONTRACTS")]
    pub deploy_l1_contracts: Option<String>,
    /// Primary node config file.
    #[clap(long, env = "CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,
    /// Secondary (customized) node config file.
    #[clap(long, env = "CUSTOM_CONFIG_PATH", default_value = DEFAULT_CUSTOM_CONFIG_PATH)]
    pub custom_config_path: PathBuf,
    /// Optional path to write the deployment result to as JSON.
    #[clap(long)]
    pub deployments_out: Option<PathBuf>,
}

impl ProvisionOpts {
    /// A fully-unset option set with built-in defaults, for tests to build on.
    pub fn test() -> Self {
        Self {
            node_id: None,
            node1_ip: None,
            node2_ip: None,
            node3_ip: None,
            node4_ip: None,
            chain_name: "testchain".to_owned(),
            p2p_port: "30005".to_owned(),
            l1_espace_rpc_url: None,
            l1_corespace_rpc_url: None,
            l1_chain_id: None,
            l1_admin_private_key: None,
            l1_admin_address: None,
            l1_gas_price: None,
            l1_start_epoch: None,
            l1_state_sender_addr: None,
            l1_unified_bridge_addr: None,
            l1_simple_calculator_addr: None,
            auto_deploy_l1_contracts: None,
            deploy_l1_contracts: None,
            config_path: DEFAULT_CONFIG_PATH.into(),
            custom_config_path: DEFAULT_CUSTOM_CONFIG_PATH.into(),
            deployments_out: None,
        }
    }
}

/// The IP addresses of the four consortium nodes.
#[derive(Debug, Clone)]
pub struct PeerIps {
    /// IP of node 1.
    pub node1: String,
    /// IP of node 2.
    pub node2: String,
    /// IP of node 3.
    pub node3: String,
    /// IP of node 4.
    pub node4: String,
}

/// Validated provisioning settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Identity of the node being provisioned.
    pub node_id: NodeId,
    /// Peer IPs for all four node slots.
    pub peer_ips: PeerIps,
    /// Chain name, reported in the completion summary.
    pub chain_name: String,
    /// Unified p2p port, kept verbatim for endpoint formatting.
    pub p2p_port: String,
    /// L1 eSpace RPC endpoint, if configured.
    pub l1_espace_rpc_url: Option<String>,
    /// L1 CoreSpace RPC endpoint, if configured.
    pub l1_corespace_rpc_url: Option<String>,
    /// L1 chain id override.
    pub l1_chain_id: Option<u64>,
    /// Admin private key, normalized to no `0x` prefix.
    pub l1_admin_private_key: Option<String>,
    /// Admin address override, no `0x` prefix.
    pub l1_admin_address: Option<String>,
    /// Gas price override in wei.
    pub l1_gas_price: Option<u128>,
    /// Start epoch override.
    pub l1_start_epoch: Option<u64>,
    /// Manual state sender address, no `0x` prefix.
    pub l1_state_sender_addr: Option<String>,
    /// Manual unified bridge address, no `0x` prefix.
    pub l1_unified_bridge_addr: Option<String>,
    /// Manual simple calculator address, no `0x` prefix.
    pub l1_simple_calculator_addr: Option<String>,
    /// Whether to deploy the L1 contracts during the run.
    pub auto_deploy: bool,
    /// Primary node config file.
    pub config_path: PathBuf,
    /// Secondary (customized) node config file.
    pub custom_config_path: PathBuf,
    /// Optional path to write the deployment result to as JSON.
    pub deployments_out: Option<PathBuf>,
}

impl Settings {
    /// Validates raw options into settings.
    ///
    /// The node identity must be 1-4 and all four peer IPs must be present.
    /// Numeric inputs must parse as decimals. Empty environment values are
    /// treated as unset. Key and address material is normalized to plain
    /// hex without a `0x` prefix.
    pub fn from_opts(opts: ProvisionOpts) -> eyre::Result<Self> {
        let node_id = match non_empty(opts.node_id) {
            Some(raw) => raw.parse::<NodeId>()?,
            None => bail!("NODE_ID must be 1-4, got nothing"),
        };

        let peer_ips = PeerIps {
            node1: require_ip(non_empty(opts.node1_ip), "NODE1_IP")?,
            node2: require_ip(non_empty(opts.node2_ip), "NODE2_IP")?,
            node3: require_ip(non_empty(opts.node3_ip), "NODE3_IP")?,
            node4: require_ip(non_empty(opts.node4_ip), "NODE4_IP")?,
        };

        let l1_chain_id = non_empty(opts.l1_chain_id)
            .map(|raw| raw.parse::<u64>().wrap_err_with(|| format!("invalid L1_CHAIN_ID: {raw}")))
            .transpose()?;
        let l1_gas_price = non_empty(opts.l1_gas_price)
            .map(|raw| raw.parse::<u128>().wrap_err_with(|| format!("invalid L1_GAS_PRICE: {raw}")))
            .transpose()?;
        let l1_start_epoch = non_empty(opts.l1_start_epoch)
            .map(|raw| {
                raw.parse::<u64>().wrap_err_with(|| format!("invalid L1_START_EPOCH: {raw}"))
            })
            .transpose()?;

        let auto_deploy = [&opts.auto_deploy_l1_contracts, &opts.deploy_l1_contracts]
            .iter()
            .any(|toggle| toggle.as_deref().is_some_and(parse_truthy));

        Ok(Self {
            node_id,
            peer_ips,
            chain_name: opts.chain_name,
            p2p_port: opts.p2p_port,
            l1_espace_rpc_url: non_empty(opts.l1_espace_rpc_url),
            l1_corespace_rpc_url: non_empty(opts.l1_corespace_rpc_url),
            l1_chain_id,
            l1_admin_private_key: non_empty(opts.l1_admin_private_key)
                .map(|key| strip_hex_prefix(&key).to_owned()),
            l1_admin_address: non_empty(opts.l1_admin_address)
                .map(|addr| strip_hex_prefix(&addr).to_owned()),
            l1_gas_price,
            l1_start_epoch,
            l1_state_sender_addr: non_empty(opts.l1_state_sender_addr)
                .map(|addr| strip_hex_prefix(&addr).to_owned()),
            l1_unified_bridge_addr: non_empty(opts.l1_unified_bridge_addr)
                .map(|addr| strip_hex_prefix(&addr).to_owned()),
            l1_simple_calculator_addr: non_empty(opts.l1_simple_calculator_addr)
                .map(|addr| strip_hex_prefix(&addr).to_owned()),
            auto_deploy,
            config_path: opts.config_path,
            custom_config_path: opts.custom_config_path,
            deployments_out: opts.deployments_out,
        })
    }

    /// True if any manual L1 override (contract address, admin key/address,
    /// start epoch) is set.
    pub fn has_manual_overrides(&self) -> bool {
        self.l1_state_sender_addr.is_some()
            || self.l1_unified_bridge_addr.is_some()
            || self.l1_simple_calculator_addr.is_some()
            || self.l1_admin_private_key.is_some()
            || self.l1_admin_address.is_some()
            || self.l1_start_epoch.is_some()
    }
}

/// Treats empty environment values as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.is_empty())
}

fn require_ip(value: Option<String>, name: &str) -> eyre::Result<String> {
    value.ok_or_else(|| eyre::eyre!("all node IPs are required, missing: {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_opts() -> ProvisionOpts {
        let mut opts = ProvisionOpts::test();
        opts.node_id = Some("1".to_owned());
        opts.node1_ip = Some("10.0.0.1".to_owned());
        opts.node2_ip = Some("10.0.0.2".to_owned());
        opts.node3_ip = Some("10.0.0.3".to_owned());
        opts.node4_ip = Some("10.0.0.4".to_owned());
        opts
    }

    #[test]
    fn test_valid_opts_pass() {
        let settings = Settings::from_opts(valid_opts()).unwrap();
        assert_eq!(settings.node_id.slot(), 1);
        assert_eq!(settings.p2p_port, "30005");
        assert!(!settings.auto_deploy);
        assert!(!settings.has_manual_overrides());
    }

    #[test]
    fn test_rejects_bad_node_id() {
        let mut opts = valid_opts();
        opts.node_id = Some("5".to_owned());
        assert!(Settings::from_opts(opts).is_err());

        let mut opts = valid_opts();
        opts.node_id = None;
        assert!(Settings::from_opts(opts).is_err());
    }

    #[test]
    fn test_rejects_missing_peer_ip() {
        let mut opts = valid_opts();
        opts.node3_ip = None;
        assert!(Settings::from_opts(opts).is_err());
    }

    #[test]
    fn test_rejects_malformed_numerics() {
        let mut opts = valid_opts();
        opts.l1_chain_id = Some("0x30af".to_owned());
        assert!(Settings::from_opts(opts).is_err());

        let mut opts = valid_opts();
        opts.l1_gas_price = Some("cheap".to_owned());
        assert!(Settings::from_opts(opts).is_err());

        let mut opts = valid_opts();
        opts.l1_start_epoch = Some("-1".to_owned());
        assert!(Settings::from_opts(opts).is_err());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let mut opts = valid_opts();
        opts.l1_espace_rpc_url = Some(String::new());
        opts.l1_chain_id = Some(String::new());
        opts.l1_admin_private_key = Some(String::new());

        let settings = Settings::from_opts(opts).unwrap();
        assert!(settings.l1_espace_rpc_url.is_none());
        assert!(settings.l1_chain_id.is_none());
        assert!(settings.l1_admin_private_key.is_none());
    }

    #[test]
    fn test_normalizes_hex_inputs() {
        let mut opts = valid_opts();
        opts.l1_admin_private_key = Some(format!("0x{}", "11".repeat(32)));
        opts.l1_admin_address = Some("0XAbC0000000000000000000000000000000000001".to_owned());
        opts.l1_state_sender_addr = Some("0xdef0000000000000000000000000000000000002".to_owned());

        let settings = Settings::from_opts(opts).unwrap();
        assert_eq!(settings.l1_admin_private_key.unwrap(), "11".repeat(32));
        assert_eq!(
            settings.l1_admin_address.unwrap(),
            "AbC0000000000000000000000000000000000001"
        );
        assert_eq!(
            settings.l1_state_sender_addr.unwrap(),
            "def0000000000000000000000000000000000002"
        );
        assert!(Settings::from_opts(valid_opts()).unwrap().l1_admin_private_key.is_none());
    }

    #[test]
    fn test_deploy_toggles() {
        for (auto, alias, expected) in [
            (Some("true"), None, true),
            (None, Some("1"), true),
            (Some("0"), Some("off"), false),
            (None, None, false),
        ] {
            let mut opts = valid_opts();
            opts.auto_deploy_l1_contracts = auto.map(str::to_owned);
            opts.deploy_l1_contracts = alias.map(str::to_owned);
            let settings = Settings::from_opts(opts).unwrap();
            assert_eq!(settings.auto_deploy, expected, "{auto:?}/{alias:?}");
        }
    }

    #[test]
    fn test_start_epoch_counts_as_override() {
        let mut opts = valid_opts();
        opts.l1_start_epoch = Some("100".to_owned());
        assert!(Settings::from_opts(opts).unwrap().has_manual_overrides());
    }
}
