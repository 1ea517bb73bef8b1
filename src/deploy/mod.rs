use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::{common::strip_hex_prefix, patch::KvUpdates};

pub mod bytecode;

mod l1;
pub use l1::L1Deployer;

mod overrides;
pub use overrides::StaticOverrides;

/// A source of L1 contract configuration entries for the customized config:
/// either a live on-chain deployment or manually provided overrides.
#[async_trait]
pub trait ContractSource {
    /// Produces the key/value entries to write into the customized config.
    async fn contract_config(&self) -> eyre::Result<KvUpdates>;
}

/// The three L1 system contracts, in deployment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum L1Contract {
    StateSender,
    UnifiedBridge,
    SimpleCalculator,
}

impl L1Contract {
    /// All contracts, in the order they are deployed.
    pub const ALL: [L1Contract; 3] =
        [L1Contract::StateSender, L1Contract::UnifiedBridge, L1Contract::SimpleCalculator];

    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            L1Contract::StateSender => "state_sender",
            L1Contract::UnifiedBridge => "unified_bridge",
            L1Contract::SimpleCalculator => "simple_calculator",
        }
    }

    /// Key under which the deployed address is written to the config.
    pub fn config_key(&self) -> &'static str {
        match self {
            L1Contract::StateSender => "l1_state_sender_addr",
            L1Contract::UnifiedBridge => "l1_unified_bridge_addr",
            L1Contract::SimpleCalculator => "l1_simple_calculator_addr",
        }
    }

    /// The pinned creation bytecode for this contract.
    pub fn creation_code(&self) -> Bytes {
        match self {
            L1Contract::StateSender => bytecode::decode(bytecode::STATE_SENDER),
            L1Contract::UnifiedBridge => bytecode::decode(bytecode::UNIFIED_BRIDGE),
            L1Contract::SimpleCalculator => bytecode::decode(bytecode::SIMPLE_CALCULATOR),
        }
    }
}

/// Renders an address the way it is written to the config files:
/// checksummed hex without the `0x` prefix.
pub(crate) fn address_hex(address: Address) -> String {
    strip_hex_prefix(&address.to_checksum(None)).to_owned()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_contract_order_and_keys() {
        let keys: Vec<_> = L1Contract::ALL.iter().map(|c| c.config_key()).collect();
        assert_eq!(
            keys,
            ["l1_state_sender_addr", "l1_unified_bridge_addr", "l1_simple_calculator_addr"]
        );
    }

    #[test]
    fn test_address_hex_is_checksummed_without_prefix() {
        let address = Address::from_str("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();
        assert_eq!(address_hex(address), "f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    }
}
