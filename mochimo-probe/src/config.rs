use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::rosetta::{NetworkIdentifier, DEFAULT_BLOCKCHAIN, DEFAULT_NETWORK};

/// Default number of requests fired by the load probe
pub const DEFAULT_REQUEST_COUNT: usize = 1500;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Probe configuration structure
///
/// Holds everything the probes share: where the API lives, which network to
/// address, and how the transport behaves. Per-probe lookup values (block
/// index, hashes, addresses) are literals in each binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ProbeConfig {
    /// Base URL of the Rosetta API (default: http://localhost:8080)
    pub api_url: String,

    /// Network identifier sent with every request
    pub network: NetworkIdentifier,

    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Number of concurrent requests for the load probe (default: 1500)
    pub request_count: usize,

    /// Directory output files are written into (default: current directory)
    pub output_dir: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            network: NetworkIdentifier::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            request_count: DEFAULT_REQUEST_COUNT,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ProbeConfig {
    /// Load configuration from environment variables
    ///
    /// Reads an optional `.env` file first, then falls back to defaults for
    /// anything not set.
    ///
    /// # Environment Variables
    ///
    /// * `ROSETTA_API_URL` - API base URL (default: "http://localhost:8080")
    /// * `ROSETTA_BLOCKCHAIN` - Blockchain name (default: "mochimo")
    /// * `ROSETTA_NETWORK` - Network name (default: "mainnet")
    /// * `PROBE_TIMEOUT_SECS` - Per-request timeout (default: 30)
    /// * `PROBE_REQUESTS` - Load probe request count (default: 1500)
    /// * `PROBE_OUTPUT_DIR` - Output directory (default: ".")
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = match lookup("PROBE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .wrap_err_with(|| format!("PROBE_TIMEOUT_SECS is not a number: {raw}"))?,
            None => defaults.timeout_secs,
        };

        let request_count = match lookup("PROBE_REQUESTS") {
            Some(raw) => raw
                .parse::<usize>()
                .wrap_err_with(|| format!("PROBE_REQUESTS is not a number: {raw}"))?,
            None => defaults.request_count,
        };

        Ok(ProbeConfig {
            api_url: lookup("ROSETTA_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            network: NetworkIdentifier {
                blockchain: lookup("ROSETTA_BLOCKCHAIN")
                    .unwrap_or_else(|| DEFAULT_BLOCKCHAIN.to_string()),
                network: lookup("ROSETTA_NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.to_string()),
            },
            timeout_secs,
            request_count,
            output_dir: lookup("PROBE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        })
    }

    /// Per-request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Path of an output file inside the configured output directory
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
