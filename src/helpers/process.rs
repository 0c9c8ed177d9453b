//! External tool invocation

use encoding_rs::Encoding;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::BuildError;

/// A configured external program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// Build from a `[program, args...]` list taken from the config.
    /// `name` only labels the error when the list is empty.
    pub fn from_parts(name: &str, parts: &[String]) -> Result<Self, BuildError> {
        let (program, args) = parts
            .split_first()
            .filter(|(program, _)| !program.trim().is_empty())
            .ok_or_else(|| BuildError::EmptyCommand(name.to_string()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// The full command line, for logs and errors
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Pipe `input` to the command and return its standard output decoded
    /// from `encoding` into UTF-8.
    ///
    /// A non-zero exit fails with the trimmed standard error. Malformed
    /// output bytes are rejected rather than replaced.
    pub fn capture(&self, input: &str, encoding: &'static Encoding) -> Result<String, BuildError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: self.display(),
                source,
            })?;

        let stdin = child.stdin.take();

        // Feed stdin from a second thread so a chatty child can't fill its
        // stdout pipe while we're still blocked writing.
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(input.as_bytes())?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });

        let output = output?;

        if !output.status.success() {
            return Err(BuildError::CommandFailed {
                program: self.display(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // A child that exits successfully without reading all of stdin is fine
        match written {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e.into()),
            _ => {}
        }

        if !output.stderr.is_empty() {
            tracing::debug!(
                "{} wrote to stderr: {}",
                self.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        decode_output(&output.stdout, encoding).ok_or_else(|| BuildError::Encoding {
            program: self.display(),
            encoding: encoding.name(),
        })
    }

    /// Run the command in `dir` with inherited stdio, failing on a non-zero exit
    pub fn run_in(&self, dir: &Path) -> Result<(), BuildError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .status()
            .map_err(|source| BuildError::Spawn {
                program: self.display(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::CommandFailed {
                program: self.display(),
                status,
                stderr: String::new(),
            })
        }
    }
}

/// Look up an encoding by its WHATWG label (`utf-8`, `windows-1252`, ...)
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, BuildError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| BuildError::UnknownEncoding(label.to_string()))
}

/// Decode `bytes` into UTF-8, honoring a leading BOM.
/// Returns `None` if any byte sequence is malformed for the encoding.
pub fn decode_output(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}
