use std::{fs::File, io::Write, path::PathBuf};

use alloy::signers::local::PrivateKeySigner;
use clap::Parser;

#[derive(Debug, Parser)]
struct CliOpts {
    /// Number of accounts to generate.
    #[clap(long, default_value = "10")]
    pub count: usize,
    #[clap(long, default_value = "accounts.txt")]
    pub output: PathBuf,
}

fn main() -> eyre::Result<()> {
    let opts = CliOpts::parse();

    let mut f = File::create(&opts.output)?;

    for i in 0..opts.count {
        let signer = PrivateKeySigner::random();
        let privkey = hex::encode(signer.credential().to_bytes());
        let address = signer.address().to_checksum(None);

        let line = format!("{i},{privkey},{address}\n");

        f.write_all(line.as_bytes())?;
    }

    f.sync_all()?;

    println!("wrote {} accounts to {}", opts.count, opts.output.display());

    Ok(())
}
