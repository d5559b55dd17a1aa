use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use tracing::{info, warn};

use crate::{error::ProbeError, models::rosetta::RosettaError, rpc::ApiResponse};

/// How a single response was judged
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Status 200 with a JSON body
    Success(Value),

    /// Any other status; body kept verbatim
    Failure { status: u16, body: String },
}

/// Render JSON with 4-space indentation
pub fn to_pretty_json(value: &Value) -> Result<String, ProbeError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| ProbeError::Decode(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ProbeError::Decode(e.to_string()))
}

/// Overwrite `path` with the pretty-printed value
pub fn persist(path: &Path, value: &Value) -> Result<(), ProbeError> {
    fs::write(path, to_pretty_json(value)?)?;
    info!(path = %path.display(), "Saved response");
    Ok(())
}

/// Terminal output for probe responses
///
/// Prints successful bodies as indented JSON, optionally saving them, and
/// prints failures as status plus raw text.
pub struct ResultSink<W: Write> {
    out: W,
    heading: String,
    output_path: Option<PathBuf>,
    show_timing: bool,
}

impl ResultSink<std::io::Stdout> {
    /// Sink printing to stdout
    pub fn stdout(heading: &str) -> Self {
        Self::new(std::io::stdout(), heading)
    }
}

impl<W: Write> ResultSink<W> {
    pub fn new(out: W, heading: &str) -> Self {
        Self {
            out,
            heading: heading.to_string(),
            output_path: None,
            show_timing: false,
        }
    }

    /// Save every successful body to `path`, replacing earlier content
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Print the request duration after the body
    pub fn with_timing(mut self, show: bool) -> Self {
        self.show_timing = show;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a response and persist it if it succeeded
    pub fn report(&mut self, response: &ApiResponse) -> Result<Outcome, ProbeError> {
        let outcome = if response.is_ok() {
            let value: Value = serde_json::from_str(&response.body)
                .map_err(|e| ProbeError::Decode(e.to_string()))?;

            writeln!(self.out, "{}", self.heading)?;
            writeln!(self.out, "{}", to_pretty_json(&value)?)?;

            if let Some(path) = &self.output_path {
                persist(path, &value)?;
            }
            Outcome::Success(value)
        } else {
            if let Some(err) = RosettaError::parse(&response.body) {
                warn!(
                    status = response.status,
                    code = err.code,
                    retriable = err.retriable,
                    "API error: {}",
                    err.message
                );
            }

            writeln!(self.out, "Error: {}", response.status)?;
            writeln!(self.out, "{}", response.body)?;
            Outcome::Failure {
                status: response.status,
                body: response.body.clone(),
            }
        };

        if self.show_timing {
            writeln!(
                self.out,
                "Time taken: {} seconds",
                response.elapsed.as_secs_f64()
            )?;
        }

        Ok(outcome)
    }
}
