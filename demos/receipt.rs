//! Receipt Example
//!
//! Prices the basket described by a fixture file and prints the receipt.
//!
//! Use `-f` to choose the fixture file (defaults to `fixtures/supermarket.yml`)
//! Set `RUST_LOG=checkout=debug` to see each offer being evaluated

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkout::{fixtures::Fixture, utils::ExampleReceiptArgs};

/// Receipt Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ExampleReceiptArgs::parse();

    let fixture = Fixture::from_path(&args.fixture)?;
    let receipt = fixture.teller().check_out(fixture.basket())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    Ok(())
}
