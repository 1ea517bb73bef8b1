use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::debug;

use crate::{patch::KvUpdates, settings::Settings};

use super::{address_hex, ContractSource};

/// L1 contract configuration supplied through manual overrides instead of
/// a live deployment.
///
/// Sibling backend to [`super::L1Deployer`]: produces the same kind of
/// entry set, but purely from the environment. Only the overrides that
/// were actually given are written.
#[derive(Debug, Clone)]
pub struct StaticOverrides {
    state_sender_addr: Option<String>,
    unified_bridge_addr: Option<String>,
    simple_calculator_addr: Option<String>,
    admin_private_key: Option<String>,
    admin_address: Option<String>,
    start_epoch: Option<u64>,
}

impl StaticOverrides {
    /// Collects the manual overrides from settings. Returns `None` when no
    /// override is set at all.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        if !settings.has_manual_overrides() {
            return None;
        }

        Some(Self {
            state_sender_addr: settings.l1_state_sender_addr.clone(),
            unified_bridge_addr: settings.l1_unified_bridge_addr.clone(),
            simple_calculator_addr: settings.l1_simple_calculator_addr.clone(),
            admin_private_key: settings.l1_admin_private_key.clone(),
            admin_address: settings.l1_admin_address.clone(),
            start_epoch: settings.l1_start_epoch,
        })
    }
}

#[async_trait]
impl ContractSource for StaticOverrides {
    async fn contract_config(&self) -> eyre::Result<KvUpdates> {
        let mut updates = KvUpdates::new();

        if let Some(addr) = &self.state_sender_addr {
            updates.set("l1_state_sender_addr", addr.clone());
        }
        if let Some(addr) = &self.unified_bridge_addr {
            updates.set("l1_unified_bridge_addr", addr.clone());
        }
        if let Some(addr) = &self.simple_calculator_addr {
            updates.set("l1_simple_calculator_addr", addr.clone());
        }

        if let Some(key) = &self.admin_private_key {
            updates.set("l1_admin_private_key", key.clone());

            // A key without a matching address gets its address derived, so
            // the written pair is always consistent.
            let address = match &self.admin_address {
                Some(addr) => addr.clone(),
                None => {
                    let signer: PrivateKeySigner = key
                        .parse()
                        .map_err(|err| eyre::eyre!("invalid admin private key: {err}"))?;
                    let derived = address_hex(signer.address());
                    debug!(address = %derived, "derived admin address from private key");
                    derived
                }
            };
            updates.set("l1_admin_address", address);
        } else if let Some(addr) = &self.admin_address {
            updates.set("l1_admin_address", addr.clone());
        }

        if let Some(epoch) = self.start_epoch {
            updates.set("l1_start_epoch", epoch);
        }

        Ok(updates)
    }
}
