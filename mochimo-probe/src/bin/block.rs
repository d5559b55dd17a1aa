//! Fetch one block by index and print it.

use eyre::Result;
use mochimo_probe::{
    builder::RequestBuilder, config::ProbeConfig, logging, rpc::RosettaClient, sink::ResultSink,
};

const BLOCK_INDEX: i64 = 607885;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = ProbeConfig::from_env()?;
    let client = RosettaClient::from_config(&config)?;
    let request = RequestBuilder::new(config.network.clone()).block_by_index(BLOCK_INDEX);

    let response = client.post(&request).await?;
    ResultSink::stdout("Response JSON:").report(&response)?;

    Ok(())
}
