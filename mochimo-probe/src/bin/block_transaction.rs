//! Fetch one transaction, print it and save it to `output.json`.

use eyre::Result;
use mochimo_probe::{
    builder::RequestBuilder, config::ProbeConfig, logging, models::rosetta::BlockIdentifier,
    rpc::RosettaClient, sink::ResultSink,
};

const TRANSACTION_HASH: &str = "0x8c83f6b6b53ad70959016dbe08da2238ff9c6925980a9018cde8b28f454cf053";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = ProbeConfig::from_env()?;
    let client = RosettaClient::from_config(&config)?;

    // Block left unresolved: null index, empty hash
    let block = BlockIdentifier {
        index: None,
        hash: Some(String::new()),
    };
    let request =
        RequestBuilder::new(config.network.clone()).block_transaction(block, TRANSACTION_HASH);

    let response = client.post(&request).await?;
    ResultSink::stdout("Block Data:")
        .with_output_path(config.output_path("output.json"))
        .with_timing(true)
        .report(&response)?;

    Ok(())
}
