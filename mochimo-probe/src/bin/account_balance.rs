//! Query one account balance and time the call.

use eyre::Result;
use mochimo_probe::{
    builder::RequestBuilder, config::ProbeConfig, logging, rpc::RosettaClient, sink::ResultSink,
};

const ADDRESS: &str = "0x042069420694206942069420";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = ProbeConfig::from_env()?;
    let client = RosettaClient::from_config(&config)?;
    let request = RequestBuilder::new(config.network.clone()).account_balance(ADDRESS);

    let response = client.post(&request).await?;
    ResultSink::stdout("Response JSON:")
        .with_timing(true)
        .report(&response)?;

    Ok(())
}
