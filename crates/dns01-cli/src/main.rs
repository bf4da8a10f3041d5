//! dns01 - DNS-01 validation record tool
//!
//! Publishes `_acme-challenge` TXT records and watches them propagate.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dns01_cli::run().await
}
