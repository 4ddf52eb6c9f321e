//! Driving a full benchmark run.
//!
//! The driver evaluates every server strictly in input order, one at a
//! time, then prints the summary block: the fastest and most stable
//! groups when at least one server answered the latency probe, and the
//! most complete group always. Winning names within a group appear in
//! the order the servers were listed.

use tracing::debug;

use crate::eval::{Evaluator, ServerResult, DELIMITER};
use crate::probe::ProbeError;
use crate::rank;

/// Evaluates every server and prints the ranking summary.
pub fn run(
    evaluator: &Evaluator<'_>,
    servers: &[String],
    sites: &[String],
) -> Result<(), ProbeError> {
    let results = evaluate_all(evaluator, servers, sites)?;
    print_summary(servers, &results);
    Ok(())
}

/// Evaluates the servers sequentially, collecting results in input order.
pub fn evaluate_all(
    evaluator: &Evaluator<'_>,
    servers: &[String],
    sites: &[String],
) -> Result<Vec<ServerResult>, ProbeError> {
    let mut results = Vec::with_capacity(servers.len());
    for server in servers {
        debug!(server = server.as_str(), "evaluating server");
        results.push(evaluator.evaluate(server, sites)?);
    }
    Ok(results)
}

/// Prints the summary block for a finished run.
pub fn print_summary(servers: &[String], results: &[ServerResult]) {
    println!("{}", DELIMITER);
    if !rank::all_latencies_absent(results) {
        print_group(
            servers,
            &rank::find_best_indices(results, rank::fastest_avg),
            "are the fastest servers in average",
        );
        println!();
        print_group(
            servers,
            &rank::find_best_indices(results, rank::most_stable),
            "are the most stable servers",
        );
        println!();
    } else {
        println!("All servers are not supporting ping");
    }
    println!();
    print_group(
        servers,
        &rank::find_best_indices(results, rank::most_complete),
        "are the most complete servers",
    );
}

/// Prints one group of winning servers with its explanatory line.
fn print_group(servers: &[String], indices: &[usize], label: &str) {
    let names: Vec<&str> =
        indices.iter().map(|&idx| servers[idx].as_str()).collect();
    println!("{}", names.join(", "));
    println!("\t{}", label);
}

//============ Tests =========================================================
