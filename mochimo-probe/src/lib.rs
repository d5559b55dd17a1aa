// Export modules for the probe binaries and integration tests
pub mod builder;
pub mod config;
pub mod error;
pub mod load;
pub mod logging;
pub mod models;
pub mod rpc;
pub mod sink;
