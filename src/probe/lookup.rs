//! The resolution probe.
//!
//! Whether a server can resolve a hostname is checked with the system
//! `nslookup` tool, invoked as `nslookup <hostname> <server>` so the
//! query goes directly to the server under test. A successful lookup
//! prints the resolved address on the third-to-last output line, opened
//! by the `Address:` token; anything else on that line means the name
//! was not resolved.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use tracing::debug;

use super::{ProbeError, ProbeRunner};

/// The token opening a successful lookup's answer line.
const ADDRESS_MARKER: &str = "Address:";

//------------ eval ----------------------------------------------------------

/// Checks whether `server` resolves `hostname`.
///
/// Returns [`ProbeError::Malformed`] if the probe output is too short to
/// contain the answer line.
pub fn eval(
    runner: &dyn ProbeRunner,
    program: &str,
    hostname: &str,
    server: &str,
) -> Result<bool, ProbeError> {
    let output = runner.run(program, &[hostname, server])?;
    parse_output(&output)
}

/// Parses the captured output of the resolution probe.
fn parse_output(output: &str) -> Result<bool, ProbeError> {
    if output.is_empty() {
        return Err(ProbeError::Malformed {
            step: "lookup produced no output",
        });
    }

    let lines: Vec<&str> = output.split('\n').collect();
    let line = match lines.len().checked_sub(3).map(|idx| lines[idx]) {
        Some(line) => line,
        None => {
            return Err(ProbeError::Malformed {
                step: "lookup output too short",
            })
        }
    };
    debug!(line, "parsing lookup answer");
    Ok(line.starts_with(ADDRESS_MARKER))
}

//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RESOLVED: &str = "\
Server:\t\t8.8.8.8\n\
Address:\t8.8.8.8#53\n\
\n\
Non-authoritative answer:\n\
Name:\texample.com\n\
Address: 93.184.216.34\n\
\n";

    const NOT_FOUND: &str = "\
Server:\t\t8.8.8.8\n\
Address:\t8.8.8.8#53\n\
\n\
** server can't find nosuch.example: NXDOMAIN\n\
\n";

    #[test]
    fn answer_line_means_resolved() {
        assert!(parse_output(RESOLVED).unwrap());
    }

    #[test]
    fn anything_else_means_not_resolved() {
        assert!(!parse_output(NOT_FOUND).unwrap());
    }

    #[test]
    fn the_server_line_does_not_count_as_an_answer() {
        // The server's own address is printed with the same token but
        // further up; only the third-to-last line decides.
        let output = "Server:\t\t8.8.8.8\n\
             Address:\t8.8.8.8#53\n\
             \n\
             ** connection timed out; no servers could be reached\n\
             \n";
        assert!(!parse_output(output).unwrap());
    }

    #[test]
    fn empty_output_is_malformed() {
        match parse_output("") {
            Err(ProbeError::Malformed { .. }) => {}
            res => panic!("expected malformed, got {:?}", res),
        }
    }

    #[test]
    fn short_output_is_malformed() {
        match parse_output("one line\n") {
            Err(ProbeError::Malformed { .. }) => {}
            res => panic!("expected malformed, got {:?}", res),
        }
    }
}
