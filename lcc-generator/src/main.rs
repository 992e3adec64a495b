//! License generator command line.
//!
//! Usage:
//!   lccgen project init -n my_product
//!   lccgen license issue -p projects/my_product -l licenses/customer.lic -e 2030-12-31
//!   lccgen test sign -d "data" -p private_key.rsa -o cout

use anyhow::Result;
use clap::Parser;
use lcc_generator::{run, Cli};
use std::io;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}
