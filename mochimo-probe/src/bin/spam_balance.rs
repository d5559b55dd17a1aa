//! Fire many concurrent balance queries and report throughput.
//!
//! The first result, if it succeeded, is saved to `balance_output.json`.

use eyre::Result;
use mochimo_probe::{
    builder::RequestBuilder, config::ProbeConfig, load, logging, rpc::RosettaClient, sink,
};

const ADDRESS: &str = "0x22581339fdaed9c4942edc58a17ef9b6f03f9a13";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = ProbeConfig::from_env()?;
    let client = RosettaClient::from_config(&config)?;
    let request = RequestBuilder::new(config.network.clone()).account_balance(ADDRESS);

    let report = load::fire(&client, &request, config.request_count).await;

    if let Some(first) = report.first() {
        sink::persist(&config.output_path("balance_output.json"), first)?;
    }

    println!(
        "Time taken for {} concurrent balance requests: {:.2} seconds",
        report.len(),
        report.elapsed.as_secs_f64()
    );
    println!(
        "Succeeded: {}, failed: {}, {:.1} requests/s",
        report.succeeded(),
        report.failed(),
        report.requests_per_second()
    );

    Ok(())
}
