//! Benchmark DNS servers and rank them.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dnsrank::conf::{self, EvalConfig};
use dnsrank::eval::Evaluator;
use dnsrank::probe::SystemRunner;
use dnsrank::run;

//------------ Cli -----------------------------------------------------------

/// Benchmark DNS servers with ping and nslookup and rank them by speed,
/// stability, and completeness.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Text file containing dns servers. Empty lines and lines starting
    /// with '#' are ignored.
    dns: PathBuf,

    /// Text file containing sites to be tested. Empty lines and lines
    /// starting with '#' are ignored.
    sites: PathBuf,

    /// Number of ping requests sent to each server.
    #[arg(short, long, default_value_t = 10)]
    count: u32,
}

fn main() -> ExitCode {
    init_logging();
    match benchmark(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Runs the whole benchmark described by the command line.
fn benchmark(cli: Cli) -> anyhow::Result<()> {
    let servers = conf::read_list_file(&cli.dns).with_context(|| {
        format!("cannot read server list {}", cli.dns.display())
    })?;
    let sites = conf::read_list_file(&cli.sites).with_context(|| {
        format!("cannot read site list {}", cli.sites.display())
    })?;

    let mut config = EvalConfig::default();
    config.set_count(cli.count);

    let runner = SystemRunner;
    let evaluator = Evaluator::new(&runner, config);
    run::run(&evaluator, &servers, &sites)?;
    Ok(())
}

/// Setup logging of events reported while benchmarking.
///
/// Use the RUST_LOG environment variable to override the defaults, e.g.
/// RUST_LOG=debug to watch the probe invocations.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .try_init()
        .ok();
}
