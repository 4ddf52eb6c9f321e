//! Invoking the external probe tools.
//!
//! Probing is the one effectful boundary of the crate. Everything a probe
//! learns about a server arrives as the captured standard output of an
//! external diagnostic tool, and everything downstream of the capture is
//! pure parsing. The [`ProbeRunner`] trait is that boundary;
//! [`SystemRunner`] implements it by spawning the tool as a child
//! process. The [`ping`] and [`lookup`] submodules invoke the two
//! concrete probes and interpret their output.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod lookup;
pub mod ping;

use std::error;
use std::fmt;
use std::io;
use std::process::Command;

use tracing::debug;

//------------ ProbeRunner ---------------------------------------------------

/// Runs an external probe tool and captures its standard output.
///
/// The exit status of the tool is not consulted: the probes report
/// through the shape of their output, and the parsers decide what that
/// shape means. The call blocks until the tool exits; no timeout is
/// enforced here.
pub trait ProbeRunner {
    /// Runs `program` with `args` and returns its captured output.
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String>;
}

//------------ SystemRunner --------------------------------------------------

/// A [`ProbeRunner`] that spawns the real system tools.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ProbeRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
        debug!(program, ?args, "running probe");
        let output = Command::new(program).args(args).output()?;
        debug!(
            status = %output.status,
            bytes = output.stdout.len(),
            "probe finished"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

//------------ ProbeError ----------------------------------------------------

/// An error produced while probing a server.
#[derive(Debug)]
pub enum ProbeError {
    /// The latency probe cannot produce round-trip statistics for this
    /// server.
    ///
    /// This is an expected outcome, not a failure: some servers answer
    /// lookups but drop echo requests. The evaluator records the latency
    /// measurements as absent and carries on.
    Unsupported {
        /// The address of the server that did not answer the probe.
        server: String,
    },

    /// Probe output did not have any of the expected shapes.
    ///
    /// Fatal for the run. Carries the name of the parse step that could
    /// not make sense of the output.
    Malformed {
        /// The parse step that failed.
        step: &'static str,
    },

    /// Launching the probe process or reading its output failed.
    Io(io::Error),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Unsupported { server } => {
                write!(f, "ping not supported for server: {}", server)
            }
            ProbeError::Malformed { step } => {
                write!(f, "probe output format incorrect: {}", step)
            }
            ProbeError::Io(_) => write!(f, "failed to run probe command"),
        }
    }
}

impl error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ProbeError::Unsupported { .. } => None,
            ProbeError::Malformed { .. } => None,
            ProbeError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        ProbeError::Io(err)
    }
}
