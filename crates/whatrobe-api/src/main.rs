//! Binary entrypoint for the Whatrobe API server.
use anyhow::Context;
use whatrobe_api::{logging, run, ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging().context("initializing logging")?;
    let config = ApiConfig::from_env().context("reading WHATROBE_* configuration")?;
    run(config).await
}
