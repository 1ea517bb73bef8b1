use std::fs;

use eyre::{bail, WrapErr};
use tracing::{info, warn};
use url::Url;

use crate::{
    common::{DEFAULT_L1_ADMIN_PRIVATE_KEY, DEFAULT_L1_RPC_URL},
    deploy::{ContractSource, L1Deployer, StaticOverrides},
    patch::{apply_updates, KvUpdates, PeerRewrite},
    settings::Settings,
};

/// Executes a full provisioning run over the node's config files.
///
/// The run is single-pass and fail-fast: the primary config gets its peer
/// endpoints rewritten, the customized config additionally receives the L1
/// entries (from a live deployment or from manual overrides), and any
/// failure terminates the run immediately.
#[derive(Debug)]
pub struct Provisioner {
    settings: Settings,
}

impl Provisioner {
    /// Creates a provisioner for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs the whole provisioning pass.
    pub async fn run(&self) -> eyre::Result<()> {
        let settings = &self.settings;
        let rewrite = PeerRewrite::new(&settings.peer_ips, &settings.p2p_port);

        info!(
            node_id = %settings.node_id,
            auto_deploy = settings.auto_deploy,
            "processing node config"
        );

        self.process_primary_config(&rewrite)?;

        let deployed = if settings.custom_config_path.exists() {
            self.process_custom_config(&rewrite).await?
        } else {
            if settings.auto_deploy {
                bail!(
                    "customized config {} not found, nowhere to write deployment results",
                    settings.custom_config_path.display()
                );
            }
            None
        };

        if let (Some(entries), Some(path)) = (&deployed, &settings.deployments_out) {
            fs::write(path, serde_json::to_string_pretty(entries)?)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote deployment result");
        }

        self.log_summary(&rewrite, deployed.is_some());

        Ok(())
    }

    /// Rewrites the peer endpoints in the primary config file.
    fn process_primary_config(&self, rewrite: &PeerRewrite) -> eyre::Result<()> {
        let path = &self.settings.config_path;
        if !path.exists() {
            bail!("config file does not exist: {}", path.display());
        }

        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        fs::write(path, rewrite.apply(&content))
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;

        for (legacy, new) in rewrite.mappings() {
            info!("replaced peer endpoint {legacy} -> {new}");
        }

        Ok(())
    }

    /// Rewrites the peer endpoints in the customized config file and writes
    /// the L1 entries into it. Returns the deployment entries when a live
    /// deployment ran.
    async fn process_custom_config(
        &self,
        rewrite: &PeerRewrite,
    ) -> eyre::Result<Option<KvUpdates>> {
        let settings = &self.settings;
        let path = &settings.custom_config_path;

        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let mut content = rewrite.apply(&content);

        let mut updates = KvUpdates::new();
        if let Some(url) = &settings.l1_espace_rpc_url {
            updates.set("l1_espace_rpc_url", url.clone());
        }
        if let Some(url) = &settings.l1_corespace_rpc_url {
            updates.set("l1_corespace_rpc_url", url.clone());
        }

        let mut deployed = None;
        if settings.auto_deploy {
            let rpc_url = settings.l1_espace_rpc_url.as_deref().unwrap_or(DEFAULT_L1_RPC_URL);
            let rpc_url = Url::parse(rpc_url)
                .wrap_err_with(|| format!("invalid L1 RPC URL: {rpc_url}"))?;
            let admin_key =
                settings.l1_admin_private_key.as_deref().unwrap_or(DEFAULT_L1_ADMIN_PRIVATE_KEY);

            let deployer = L1Deployer::connect(
                &rpc_url,
                admin_key,
                settings.l1_chain_id,
                settings.l1_gas_price,
            )
            .await?;

            let entries = deployer.contract_config().await?;
            updates.merge(entries.clone());
            deployed = Some(entries);
        } else if let Some(overrides) = StaticOverrides::from_settings(settings) {
            info!("deployment disabled, using manual L1 overrides");
            updates.merge(overrides.contract_config().await?);
        }

        if let Some(chain_id) = settings.l1_chain_id {
            updates.set("l1_chain_id", chain_id);
        }

        if updates.is_empty() {
            warn!("no L1 config entries to write (deployment disabled, no overrides)");
        } else {
            content = apply_updates(&content, &updates);
            for (key, value) in updates.iter() {
                info!("wrote {key} -> {value}");
            }
        }

        fs::write(path, content)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "processed customized config");

        Ok(deployed)
    }

    fn log_summary(&self, rewrite: &PeerRewrite, deployed: bool) {
        let settings = &self.settings;

        info!(node_id = %settings.node_id, "node config processing complete");
        info!("chain name: {}", settings.chain_name);
        info!("p2p port: {} (unified)", settings.p2p_port);
        if let Some(url) = &settings.l1_espace_rpc_url {
            info!("L1 eSpace RPC: {url}");
        }
        if let Some(url) = &settings.l1_corespace_rpc_url {
            info!("L1 CoreSpace RPC: {url}");
        }

        if deployed {
            info!("L1 contracts deployed and written to config");
        } else if settings.custom_config_path.exists() && settings.has_manual_overrides() {
            let mut used = Vec::new();
            if settings.l1_state_sender_addr.is_some() {
                used.push("L1_STATE_SENDER_ADDR");
            }
            if settings.l1_unified_bridge_addr.is_some() {
                used.push("L1_UNIFIED_BRIDGE_ADDR");
            }
            if settings.l1_simple_calculator_addr.is_some() {
                used.push("L1_SIMPLE_CALCULATOR_ADDR");
            }
            if settings.l1_admin_private_key.is_some() {
                used.push("L1_ADMIN_PRIVATE_KEY");
            }
            if settings.l1_admin_address.is_some() {
                used.push("L1_ADMIN_ADDRESS");
            }
            if settings.l1_start_epoch.is_some() {
                used.push("L1_START_EPOCH");
            }
            info!("manual overrides applied: {}", used.join(", "));
        }

        for (legacy, new) in rewrite.mappings() {
            info!("peer mapping: {legacy} -> {new}");
        }
    }
}
