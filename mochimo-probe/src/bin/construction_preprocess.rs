//! Ask the API to preprocess a single outgoing transfer and time the call.

use eyre::Result;
use mochimo_probe::{
    builder::RequestBuilder,
    config::ProbeConfig,
    logging,
    models::rosetta::{Currency, Operation},
    rpc::RosettaClient,
    sink::ResultSink,
};
use serde_json::Map;

const ADDRESS: &str = "0x042069420694206942069420";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = ProbeConfig::from_env()?;
    let client = RosettaClient::from_config(&config)?;

    let operations = vec![Operation::transfer(0, ADDRESS, "-100", Currency::mcm())];
    let request =
        RequestBuilder::new(config.network.clone()).construction_preprocess(operations, Map::new());

    let response = client.post(&request).await?;
    ResultSink::stdout("Response JSON:")
        .with_timing(true)
        .report(&response)?;

    Ok(())
}
