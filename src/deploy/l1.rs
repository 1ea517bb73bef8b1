use std::fmt;

use alloy::{
    eips::eip2718::Encodable2718,
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::BoxTransport,
};
use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use crate::{
    common::{strip_hex_prefix, DeployError, DEFAULT_L1_CHAIN_ID, RECEIPT_TIMEOUT},
    patch::KvUpdates,
};

use super::{address_hex, ContractSource, L1Contract};

/// Deploys the three L1 system contracts through an execution-layer RPC
/// endpoint, sequentially and with locally managed nonces, and reports the
/// resulting configuration entries.
pub struct L1Deployer {
    provider: RootProvider<BoxTransport>,
    wallet: EthereumWallet,
    admin_address: Address,
    /// Admin key as it will be written to the config (no `0x` prefix).
    admin_key_hex: String,
    chain_id: Option<u64>,
    gas_price: Option<u128>,
}

impl L1Deployer {
    /// Connects to the given RPC endpoint (http(s) or ws(s), detected from
    /// the URL scheme) and prepares the admin account for deployment.
    pub async fn connect(
        rpc_url: &Url,
        admin_key: &str,
        chain_id: Option<u64>,
        gas_price: Option<u128>,
    ) -> eyre::Result<Self> {
        let admin: PrivateKeySigner =
            admin_key.parse().map_err(|err| eyre::eyre!("invalid admin private key: {err}"))?;
        let admin_address = admin.address();
        let admin_key_hex = strip_hex_prefix(admin_key).to_owned();
        let wallet = EthereumWallet::from(admin);

        let provider =
            ProviderBuilder::new().on_builtin(rpc_url.as_str()).await.map_err(|err| {
                DeployError::Connect { url: rpc_url.to_string(), reason: err.to_string() }
            })?;

        Ok(Self { provider, wallet, admin_address, admin_key_hex, chain_id, gas_price })
    }

    /// The account contracts are deployed from.
    pub fn admin_address(&self) -> Address {
        self.admin_address
    }

    /// Deploys a single contract: estimates gas, signs with the admin
    /// account, submits, and waits for the receipt.
    async fn deploy_one(
        &self,
        creation_code: Bytes,
        nonce: u64,
        chain_id: u64,
    ) -> eyre::Result<(B256, Address)> {
        let gas_price = match self.gas_price {
            Some(price) => price,
            None => self.provider.get_gas_price().await?,
        };

        let tx = TransactionRequest::default()
            .with_from(self.admin_address)
            .with_deploy_code(creation_code)
            .with_value(U256::ZERO)
            .with_nonce(nonce)
            .with_chain_id(chain_id)
            .with_gas_price(gas_price);

        let gas_limit = self.provider.estimate_gas(&tx).await?;
        let tx = tx.with_gas_limit(gas_limit);

        let envelope = tx.build(&self.wallet).await?;
        let pending = self.provider.send_raw_transaction(&envelope.encoded_2718()).await?;
        let tx_hash = *pending.tx_hash();

        let receipt = pending.with_timeout(Some(RECEIPT_TIMEOUT)).get_receipt().await?;

        if !receipt.status() {
            return Err(DeployError::TxFailed { tx_hash }.into());
        }

        let address =
            receipt.contract_address.ok_or(DeployError::MissingContractAddress { tx_hash })?;

        Ok((tx_hash, address))
    }
}

#[async_trait]
impl ContractSource for L1Deployer {
    async fn contract_config(&self) -> eyre::Result<KvUpdates> {
        // The chain id override wins; otherwise ask the endpoint, and keep
        // going with the built-in default if it won't say.
        let chain_id = match self.chain_id {
            Some(id) => id,
            None => match self.provider.get_chain_id().await {
                Ok(id) => id,
                Err(err) => {
                    warn!(%err, fallback = DEFAULT_L1_CHAIN_ID, "chain id query failed");
                    DEFAULT_L1_CHAIN_ID
                }
            },
        };

        // Current head becomes the node's l1_start_epoch; omitted if the
        // endpoint won't answer.
        let start_epoch = match self.provider.get_block_number().await {
            Ok(number) => Some(number),
            Err(err) => {
                warn!(%err, "block number query failed, start epoch will not be written");
                None
            }
        };

        info!(chain_id, admin = %self.admin_address, "deploying L1 contracts");

        let mut nonce = self.provider.get_transaction_count(self.admin_address).await?;

        let mut updates = KvUpdates::new();
        for contract in L1Contract::ALL {
            info!(contract = contract.name(), nonce, "deploying");
            let (tx_hash, address) =
                self.deploy_one(contract.creation_code(), nonce, chain_id).await?;
            info!(contract = contract.name(), %tx_hash, %address, "deployed");

            updates.set(contract.config_key(), address_hex(address));
            nonce += 1;
        }

        updates.set("l1_admin_private_key", self.admin_key_hex.clone());
        updates.set("l1_admin_address", address_hex(self.admin_address));
        updates.set("l1_chain_id", chain_id);
        if let Some(epoch) = start_epoch {
            updates.set("l1_start_epoch", epoch);
        }

        info!("L1 contract deployment complete");

        Ok(updates)
    }
}

impl fmt::Debug for L1Deployer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("L1Deployer")
            .field("admin_address", &self.admin_address)
            .field("chain_id", &self.chain_id)
            .field("gas_price", &self.gas_price)
            .finish_non_exhaustive()
    }
}
