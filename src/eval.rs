//! Evaluating a single server.
//!
//! The [`Evaluator`] runs both probes for one server: the latency probe
//! once, against the server address itself, and the resolution probe
//! once per site. The outcome is a [`ServerResult`]; the progress lines
//! printed along the way are purely informational.

use tracing::warn;

use crate::conf::EvalConfig;
use crate::probe::{lookup, ping, ProbeError, ProbeRunner};

/// The delimiter line opening each server's console block.
pub const DELIMITER: &str = "===================================";

/// The site tested when no site list is given.
const FALLBACK_SITE: &str = "google.com";

//------------ ServerResult --------------------------------------------------

/// The measured outcome of evaluating one server.
///
/// Results are collected in the same order as the input server list and
/// are immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerResult {
    /// Mean round-trip time to the server in milliseconds.
    ///
    /// Absent if the latency probe is not supported by the server.
    pub avg: Option<f64>,

    /// Standard deviation over the round-trip times in milliseconds.
    ///
    /// Absent if the latency probe is not supported by the server.
    pub stddev: Option<f64>,

    /// Whether the server resolved every tested site.
    pub all_resolved: bool,
}

//------------ Evaluator -----------------------------------------------------

/// Evaluates servers one at a time.
pub struct Evaluator<'a> {
    /// The subprocess boundary used to invoke the probe tools.
    runner: &'a dyn ProbeRunner,

    /// Evaluation settings.
    config: EvalConfig,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over the given runner and configuration.
    pub fn new(runner: &'a dyn ProbeRunner, config: EvalConfig) -> Self {
        Evaluator { runner, config }
    }

    /// Evaluates a single server against the given sites.
    ///
    /// Prints the server's console block as a side effect. A server that
    /// does not answer the latency probe gets absent latency values and
    /// evaluation continues with the sites; malformed probe output is
    /// fatal and propagates to the caller.
    pub fn evaluate(
        &self,
        server: &str,
        sites: &[String],
    ) -> Result<ServerResult, ProbeError> {
        println!("{}", DELIMITER);
        println!(
            "Evaluating dns server with ping: {}, repeating {} times",
            server,
            self.config.count()
        );

        let (avg, stddev) = match ping::eval(
            self.runner,
            self.config.ping_program(),
            server,
            self.config.count(),
        ) {
            Ok(stats) => {
                println!("\tMin/Avg/Max/Stddev = {}", stats);
                (
                    Some(parse_field(&stats.avg)?),
                    Some(parse_field(&stats.stddev)?),
                )
            }
            Err(ProbeError::Unsupported { server }) => {
                warn!(server = server.as_str(), "latency probe unsupported");
                println!("\tPing not supported for server: {}", server);
                println!("\tUnable to test rtt");
                (None, None)
            }
            Err(err) => return Err(err),
        };

        let fallback;
        let sites = if sites.is_empty() {
            fallback = [String::from(FALLBACK_SITE)];
            &fallback[..]
        } else {
            sites
        };

        let mut all_resolved = true;
        for site in sites {
            if !lookup::eval(
                self.runner,
                self.config.lookup_program(),
                site,
                server,
            )? {
                all_resolved = false;
                println!("\t{} not found", site);
            }
        }
        println!("\tAll sites found: {}", all_resolved);

        Ok(ServerResult { avg, stddev, all_resolved })
    }
}

/// Converts a raw statistics field into a number of milliseconds.
fn parse_field(field: &str) -> Result<f64, ProbeError> {
    field.parse().map_err(|_| ProbeError::Malformed {
        step: "ping statistics field is not numeric",
    })
}

//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;

    /// A runner that replays a fixed sequence of probe transcripts.
    struct ScriptRunner {
        /// Captured invocations, program name first.
        calls: RefCell<Vec<Vec<String>>>,

        /// Outputs handed out in order, one per invocation.
        outputs: RefCell<Vec<String>>,
    }

    impl ScriptRunner {
        fn new(outputs: &[&str]) -> Self {
            ScriptRunner {
                calls: RefCell::new(Vec::new()),
                outputs: RefCell::new(
                    outputs.iter().rev().map(|s| s.to_string()).collect(),
                ),
            }
        }
    }

    impl ProbeRunner for ScriptRunner {
        fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().map(|s| s.to_string()));
            self.calls.borrow_mut().push(call);
            Ok(self.outputs.borrow_mut().pop().expect("unscripted probe"))
        }
    }

    const PING_OK: &str = "\
--- ping statistics ---\n\
10 packets transmitted, 10 packets received, 0.0% packet loss\n\
round-trip min/avg/max/stddev = 8.0/10.0/14.0/2.5 ms\n";

    const PING_LOSS: &str = "\
--- ping statistics ---\n\
10 packets transmitted, 0 packets received, 100.0% packet loss\n";

    const LOOKUP_OK: &str = "Address: 93.184.216.34\n\n";

    const LOOKUP_FAIL: &str = "** server can't find example.org\n\n";

    fn sites(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn measured_server_gets_numeric_latencies() {
        let runner = ScriptRunner::new(&[PING_OK, LOOKUP_OK]);
        let eval = Evaluator::new(&runner, Default::default());
        let result = eval.evaluate("8.8.8.8", &sites(&["example.com"]));
        assert_eq!(
            result.unwrap(),
            ServerResult {
                avg: Some(10.0),
                stddev: Some(2.5),
                all_resolved: true
            }
        );
    }

    #[test]
    fn unsupported_ping_is_not_fatal() {
        let runner = ScriptRunner::new(&[PING_LOSS, LOOKUP_OK]);
        let eval = Evaluator::new(&runner, Default::default());
        let result = eval.evaluate("192.0.2.1", &sites(&["example.com"]));
        assert_eq!(
            result.unwrap(),
            ServerResult { avg: None, stddev: None, all_resolved: true }
        );
    }

    #[test]
    fn one_missed_site_clears_the_flag() {
        let runner =
            ScriptRunner::new(&[PING_OK, LOOKUP_OK, LOOKUP_FAIL, LOOKUP_OK]);
        let eval = Evaluator::new(&runner, Default::default());
        let result = eval
            .evaluate("8.8.8.8", &sites(&["a.example", "b.example", "c.example"]))
            .unwrap();
        assert!(!result.all_resolved);
    }

    #[test]
    fn empty_site_list_tests_the_fallback_site() {
        let runner = ScriptRunner::new(&[PING_OK, LOOKUP_OK]);
        let eval = Evaluator::new(&runner, Default::default());
        eval.evaluate("8.8.8.8", &[]).unwrap();
        let calls = runner.calls.borrow();
        assert_eq!(calls[0], ["ping", "-c", "10", "8.8.8.8"]);
        assert_eq!(calls[1], ["nslookup", "google.com", "8.8.8.8"]);
    }

    #[test]
    fn malformed_ping_output_propagates() {
        let runner = ScriptRunner::new(&["whatever this is\n\n"]);
        let eval = Evaluator::new(&runner, Default::default());
        match eval.evaluate("8.8.8.8", &sites(&["example.com"])) {
            Err(ProbeError::Malformed { .. }) => {}
            res => panic!("expected malformed, got {:?}", res),
        }
    }
}
