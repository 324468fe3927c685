//! Utils

use clap::Parser;

/// Arguments for the cart examples
#[derive(Debug, Parser)]
pub struct ExampleCartArgs {
    /// Fixture set to use for the catalog, coupons and order history
    #[clap(short, long, default_value = "spendwise")]
    pub fixture: String,

    /// Quantity to add for each item in the demo order
    #[clap(short, long)]
    pub n: Option<u32>,
}
