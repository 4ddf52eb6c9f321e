//! The latency probe.
//!
//! Round-trip time to a server is measured with the system `ping` tool,
//! invoked as `ping -c <count> <address>`. Only the end of the output
//! matters: the second-to-last line either carries the round-trip
//! statistics or, when not a single echo request was answered, repeats
//! the request count as the leading token of the packet summary. The
//! latter is the tool's way of saying the server cannot be measured,
//! which [`eval`] reports as [`ProbeError::Unsupported`].

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use tracing::debug;

use super::{ProbeError, ProbeRunner};

/// The token opening ping's round-trip statistics line.
const RTT_MARKER: &str = "round-trip";

//------------ RttStats ------------------------------------------------------

/// Round-trip statistics reported by the latency probe.
///
/// The four fields are kept exactly as the probe printed them; callers
/// convert them to numbers as needed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RttStats {
    /// Fastest observed round trip.
    pub min: String,

    /// Mean round trip.
    pub avg: String,

    /// Slowest observed round trip.
    pub max: String,

    /// Standard deviation over the observed round trips.
    pub stddev: String,
}

impl fmt::Display for RttStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "{}/{}/{}/{}", self.min, self.avg, self.max, self.stddev
        )
    }
}

//------------ eval ----------------------------------------------------------

/// Measures round-trip statistics for `server`.
///
/// Invokes the latency probe with the given request count and parses the
/// captured output. Returns [`ProbeError::Unsupported`] if the probe ran
/// but produced no statistics and [`ProbeError::Malformed`] if the output
/// had an unexpected shape.
pub fn eval(
    runner: &dyn ProbeRunner,
    program: &str,
    server: &str,
    count: u32,
) -> Result<RttStats, ProbeError> {
    let count = count.to_string();
    let output = runner.run(program, &["-c", &count, server])?;
    parse_output(&output, &count, server)
}

/// Parses the captured output of the latency probe.
///
/// `count` is the request count in the form it was passed on the command
/// line, since the no-statistics summary line starts with exactly that
/// token.
fn parse_output(
    output: &str,
    count: &str,
    server: &str,
) -> Result<RttStats, ProbeError> {
    if output.is_empty() {
        return Err(ProbeError::Malformed { step: "ping produced no output" });
    }

    let lines: Vec<&str> = output.split('\n').collect();
    let line = match lines.len().checked_sub(2).map(|idx| lines[idx]) {
        Some(line) => line,
        None => {
            return Err(ProbeError::Malformed {
                step: "ping output too short",
            })
        }
    };
    debug!(server, line, "parsing ping statistics");

    if line.starts_with(RTT_MARKER) {
        // "round-trip min/avg/max/stddev = 1.2/3.4/5.6/0.7 ms": the
        // slash-separated group is the second-to-last field.
        let group = match line.split_whitespace().rev().nth(1) {
            Some(group) => group,
            None => {
                return Err(ProbeError::Malformed {
                    step: "ping statistics line has no fields",
                })
            }
        };
        let mut fields = group.split('/');
        match (
            fields.next(), fields.next(), fields.next(), fields.next(),
            fields.next(),
        ) {
            (Some(min), Some(avg), Some(max), Some(stddev), None) => {
                Ok(RttStats {
                    min: min.into(),
                    avg: avg.into(),
                    max: max.into(),
                    stddev: stddev.into(),
                })
            }
            _ => Err(ProbeError::Malformed {
                step: "ping statistics group is not min/avg/max/stddev",
            }),
        }
    } else if line.starts_with(count) {
        // The packet summary became the last meaningful line, so not a
        // single request got an answer.
        Err(ProbeError::Unsupported { server: server.into() })
    } else {
        Err(ProbeError::Malformed {
            step: "ping statistics line not recognized",
        })
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FULL_OUTPUT: &str = "\
PING 8.8.8.8 (8.8.8.8): 56 data bytes\n\
64 bytes from 8.8.8.8: icmp_seq=0 ttl=117 time=12.3 ms\n\
64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=11.8 ms\n\
\n\
--- 8.8.8.8 ping statistics ---\n\
10 packets transmitted, 10 packets received, 0.0% packet loss\n\
round-trip min/avg/max/stddev = 10.123/12.456/15.789/1.234 ms\n";

    const LOSS_OUTPUT: &str = "\
PING 192.0.2.1 (192.0.2.1): 56 data bytes\n\
Request timeout for icmp_seq 0\n\
\n\
--- 192.0.2.1 ping statistics ---\n\
10 packets transmitted, 0 packets received, 100.0% packet loss\n";

    #[test]
    fn statistics_line_is_split_into_fields() {
        let stats = parse_output(FULL_OUTPUT, "10", "8.8.8.8").unwrap();
        assert_eq!(stats.min, "10.123");
        assert_eq!(stats.avg, "12.456");
        assert_eq!(stats.max, "15.789");
        assert_eq!(stats.stddev, "1.234");
        assert_eq!(stats.to_string(), "10.123/12.456/15.789/1.234");
    }

    #[test]
    fn count_prefix_means_unsupported() {
        match parse_output(LOSS_OUTPUT, "10", "192.0.2.1") {
            Err(ProbeError::Unsupported { server }) => {
                assert_eq!(server, "192.0.2.1")
            }
            res => panic!("expected unsupported, got {:?}", res),
        }
    }

    #[rstest]
    #[case::empty("")]
    #[case::single_line("no newline at all")]
    #[case::unknown_summary("ping: cannot resolve nosuch.invalid\n\n")]
    #[case::bad_group(
        "--- stats ---\nround-trip min/avg/max = 1.0/2.0/3.0 ms\n"
    )]
    fn unexpected_shapes_are_malformed(#[case] output: &str) {
        match parse_output(output, "10", "192.0.2.1") {
            Err(ProbeError::Malformed { .. }) => {}
            res => panic!("expected malformed, got {:?}", res),
        }
    }

    #[test]
    fn summary_for_a_different_count_is_malformed() {
        match parse_output(LOSS_OUTPUT, "7", "192.0.2.1") {
            Err(ProbeError::Malformed { .. }) => {}
            res => panic!("expected malformed, got {:?}", res),
        }
    }
}
