#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod common;
pub use common::{
    parse_truthy, strip_hex_prefix, DeployError, NodeId, DEFAULT_CONFIG_PATH,
    DEFAULT_CUSTOM_CONFIG_PATH, DEFAULT_L1_ADMIN_PRIVATE_KEY, DEFAULT_L1_CHAIN_ID,
    DEFAULT_L1_RPC_URL, RECEIPT_TIMEOUT,
};

mod settings;
pub use settings::{PeerIps, ProvisionOpts, Settings};

mod patch;
pub use patch::{apply_updates, KvUpdates, KvValue, PeerRewrite};

mod deploy;
pub use deploy::{bytecode, ContractSource, L1Contract, L1Deployer, StaticOverrides};

mod provision;
pub use provision::Provisioner;
