//! AgriDatum CLI
//!
//! Configuration comes from the environment (a `.env` file is loaded
//! first); command-line flags override it.
//!
//! Usage:
//!   agridatum derive   - Print the farmer id for phone + PIN
//!   agridatum login    - Log in and summarize records
//!   agridatum submit   - Sign and submit a harvest
//!   agridatum records  - List records
//!   agridatum verify   - Verify a record or transaction
//!   agridatum export   - Export records to JSON

mod cli;
mod commands;
mod logger;

use agridatum_client::{ClientConfig, SigningChain};
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logger::init_logger(cli.log_level.as_deref(), cli.log_dir.as_deref());

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(spec) = cli.signing.as_deref() {
        config.signing = SigningChain::parse(spec)?;
    }
    tracing::debug!(
        "Using backend {} with signing {:?}",
        config.base_url,
        config.signing.strategies()
    );

    commands::run(cli.command, config).await
}
