//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the receipt example
#[derive(Debug, Parser)]
pub struct ExampleReceiptArgs {
    /// Fixture file describing the catalog, offers and basket
    #[clap(short, long, default_value = "fixtures/supermarket.yml")]
    pub fixture: PathBuf,
}
