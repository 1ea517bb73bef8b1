use std::{fs, path::Path};

use nodeprep::{ProvisionOpts, Settings};

/// Primary node config, as shipped: peer endpoints still hardcoded.
pub const PRIMARY_FIXTURE: &str = r#"chain_name = "testchain"
p2p_listen_port = 30005

consortium_nodes = [
    "139.224.187.155:30006",
    "47.116.165.80:30007",
    "47.116.165.80:30008",
    "139.224.187.155:30005",
]
"#;

/// Customized config, as shipped.
pub const CUSTOM_FIXTURE: &str = r#"# Local overrides applied on top of config.toml.
dev_pack = true
bootstrap_peers = "139.224.187.155:30005,47.116.165.80:30008"
"#;

/// Writes both config fixtures into `dir`.
pub fn write_fixtures(dir: &Path) -> eyre::Result<()> {
    fs::write(dir.join("config.toml"), PRIMARY_FIXTURE)?;
    fs::write(dir.join("customized_config.toml"), CUSTOM_FIXTURE)?;

    Ok(())
}

/// Options for node 1 with peers 10.0.0.1-4, pointing at config files in `dir`.
pub fn base_opts(dir: &Path) -> ProvisionOpts {
    let mut opts = ProvisionOpts::test();
    opts.node_id = Some("1".to_owned());
    opts.node1_ip = Some("10.0.0.1".to_owned());
    opts.node2_ip = Some("10.0.0.2".to_owned());
    opts.node3_ip = Some("10.0.0.3".to_owned());
    opts.node4_ip = Some("10.0.0.4".to_owned());
    opts.config_path = dir.join("config.toml");
    opts.custom_config_path = dir.join("customized_config.toml");

    opts
}

/// Validated settings from [`base_opts`].
pub fn base_settings(dir: &Path) -> eyre::Result<Settings> {
    Settings::from_opts(base_opts(dir))
}
