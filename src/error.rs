//! Error types for the build pipeline

use std::process::ExitStatus;
use thiserror::Error;

/// Failures raised by inspectors, hooks and the external tools they drive
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Output of `{program}` is not valid {encoding}")]
    Encoding {
        program: String,
        encoding: &'static str,
    },

    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("No command configured for {0}")]
    EmptyCommand(String),

    #[error("HTML rewrite error: {0}")]
    Rewrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
