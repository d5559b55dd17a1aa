//! Fetch one block by hash, print it and save it to `output.json`.

use eyre::Result;
use mochimo_probe::{
    builder::RequestBuilder, config::ProbeConfig, logging, rpc::RosettaClient, sink::ResultSink,
};

const BLOCK_HASH: &str = "0x46b7a0d3cc9e274ded3b940337d70bc045fb62440b638c61f8806ea11c198a13";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = ProbeConfig::from_env()?;
    let client = RosettaClient::from_config(&config)?;
    // Index goes out as null so the API resolves by hash
    let request = RequestBuilder::new(config.network.clone()).block(None, Some(BLOCK_HASH));

    let response = client.post(&request).await?;
    ResultSink::stdout("Block Data:")
        .with_output_path(config.output_path("output.json"))
        .report(&response)?;

    Ok(())
}
