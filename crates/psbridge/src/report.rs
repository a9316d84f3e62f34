//! Human-readable reporting of an exchange

use crate::client::Exchange;
use crate::error::Error;
use std::io::{self, Write};
use std::path::Path;

/// Writes exchange results for a person at a terminal.
#[derive(Debug, Clone)]
pub struct Reporter {
    peer: String,
}

impl Reporter {
    /// Create a reporter that names the child `peer` in its output
    pub fn new(peer: impl Into<String>) -> Self {
        Self { peer: peer.into() }
    }

    /// Name the child after its program, spelling PowerShell out in full
    pub fn for_program(program: &str) -> Self {
        let stem = Path::new(program)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(program);
        if stem.eq_ignore_ascii_case("pwsh") || stem.eq_ignore_ascii_case("powershell") {
            Self::new("PowerShell")
        } else {
            Self::new(program)
        }
    }

    /// Print the raw reply and its decoded fields.
    pub fn report_success<W: Write>(&self, out: &mut W, exchange: &Exchange) -> io::Result<()> {
        writeln!(
            out,
            "Raw JSON from {}: {}",
            self.peer,
            String::from_utf8_lossy(&exchange.raw).trim_end()
        )?;
        writeln!(out, "Parsed response:")?;
        writeln!(out, "  Message: {}", exchange.response.message)?;
        writeln!(out, "  Name:    {}", exchange.response.name)?;
        writeln!(out, "  Number:  {}", exchange.response.number)?;
        Ok(())
    }

    /// Print an error with whatever diagnostics it carries.
    ///
    /// Process failures show captured stderr; decode failures show the raw
    /// output that could not be decoded.
    pub fn report_error<W: Write>(&self, out: &mut W, error: &Error) -> io::Result<()> {
        match error {
            Error::Launch { .. } | Error::ChildExit { .. } | Error::Io(_) => {
                writeln!(out, "Error running {}: {}", self.peer, error)?;
                if let Some(stderr) = error.stderr().filter(|s| !s.is_empty()) {
                    writeln!(
                        out,
                        "Stderr: {}",
                        String::from_utf8_lossy(stderr).trim_end()
                    )?;
                }
            }
            Error::Decode { source, raw } => {
                writeln!(
                    out,
                    "Raw JSON from {}: {}",
                    self.peer,
                    String::from_utf8_lossy(raw).trim_end()
                )?;
                writeln!(out, "Error decoding response: {}", source)?;
            }
            Error::Encode(source) => writeln!(out, "Error encoding request: {}", source)?,
            Error::Config(_) => writeln!(out, "Error: {}", error)?,
        }
        Ok(())
    }
}
