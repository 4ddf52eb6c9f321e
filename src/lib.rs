//! Benchmarking and ranking of DNS resolver servers.
//!
//! This crate measures a set of DNS servers with the system diagnostic
//! tools and ranks the servers by what it saw: round-trip latency is
//! taken from `ping` run against the server itself, and resolution
//! completeness from `nslookup` queries for a list of well-known sites
//! sent directly to the server. Servers are probed strictly one at a
//! time, sites within a server one at a time.
//!
//! # Modules
//!
//! * [conf] reads the server and site list files and holds the
//!   evaluator configuration,
//! * [probe] invokes the external probe tools and parses their output,
//! * [eval] turns the probe results for one server into a
//!   [ServerResult][eval::ServerResult],
//! * [rank] finds the set of best servers under each comparison
//!   criterion, and
//! * [run] drives a whole benchmark run and prints the ranking.

pub mod conf;
pub mod eval;
pub mod probe;
pub mod rank;
pub mod run;
