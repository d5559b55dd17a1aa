use tracing_subscriber::EnvFilter;

/// Configure logging for a probe binary
///
/// Info level for this crate, quieter levels for the HTTP stack. `RUST_LOG`
/// directives are honoured on top.
pub fn init() {
    let filter = EnvFilter::from_default_env()
        .add_directive("mochimo_probe=info".parse().expect("static directive"))
        .add_directive("hyper=warn".parse().expect("static directive"))
        .add_directive("reqwest=warn".parse().expect("static directive"));

    // Logs go to stderr so stdout carries only the response output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
