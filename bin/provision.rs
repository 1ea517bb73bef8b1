use clap::Parser;

use nodeprep::{ProvisionOpts, Provisioner, Settings};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let opts = ProvisionOpts::parse();
    let settings = Settings::from_opts(opts)?;

    Provisioner::new(settings).run().await
}
