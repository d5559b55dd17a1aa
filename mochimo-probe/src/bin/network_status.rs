//! Print the node's current block, genesis block and peers.

use eyre::Result;
use mochimo_probe::{
    builder::RequestBuilder, config::ProbeConfig, logging, rpc::RosettaClient, sink::ResultSink,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = ProbeConfig::from_env()?;
    let client = RosettaClient::from_config(&config)?;
    let request = RequestBuilder::new(config.network.clone()).network_status();

    let response = client.post(&request).await?;
    ResultSink::stdout("Response JSON:")
        .with_timing(true)
        .report(&response)?;

    Ok(())
}
