use thiserror::Error;

/// Probe-specific error types
///
/// This enum defines everything that can go wrong while building, sending or
/// reporting a probe request. A non-200 status is only an error where a caller
/// asked for a decoded body (see [`ProbeError::Status`]); the result sink
/// treats it as an ordinary outcome.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection refused, DNS failure, broken body stream
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// API answered with something other than 200
    #[error("API returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,

        /// Raw response text
        body: String,
    },

    /// Response body was not valid JSON
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// Writing an output file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Map a reqwest failure onto the transport variants
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(timeout_secs)
        } else {
            ProbeError::Transport(err.to_string())
        }
    }
}
