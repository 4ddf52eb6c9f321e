//! Run configuration.
//!
//! Two kinds of configuration feed a benchmark run: the lists of servers
//! and sites, read from simple line-oriented text files, and the settings
//! of the evaluator itself, collected in [`EvalConfig`].

use std::fs;
use std::io::{self, Read};
use std::path::Path;

//------------ List files ----------------------------------------------------

/// Reads a list from a file.
///
/// The file is line oriented: every line is trimmed, blank lines and
/// lines starting with `#` are skipped, all other lines are taken
/// verbatim. Both the server list and the site list use this format.
pub fn read_list_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let mut file = fs::File::open(path)?;
    read_list(&mut file)
}

/// Reads a list from a reader, one entry per line.
pub fn read_list<R: Read>(reader: &mut R) -> io::Result<Vec<String>> {
    use std::io::BufRead;

    let mut entries = Vec::new();
    for line in io::BufReader::new(reader).lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        entries.push(line.into());
    }
    Ok(entries)
}

//------------ EvalConfig ----------------------------------------------------

/// Configuration for evaluating servers.
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Number of requests the latency probe sends per server.
    count: u32,

    /// Name of the latency probe program.
    ping_program: String,

    /// Name of the resolution probe program.
    lookup_program: String,
}

impl EvalConfig {
    /// Return the number of latency probe requests per server.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Set the number of latency probe requests per server.
    pub fn set_count(&mut self, value: u32) {
        self.count = value
    }

    /// Return the name of the latency probe program.
    pub fn ping_program(&self) -> &str {
        &self.ping_program
    }

    /// Set the name of the latency probe program.
    pub fn set_ping_program(&mut self, value: impl Into<String>) {
        self.ping_program = value.into()
    }

    /// Return the name of the resolution probe program.
    pub fn lookup_program(&self) -> &str {
        &self.lookup_program
    }

    /// Set the name of the resolution probe program.
    pub fn set_lookup_program(&mut self, value: impl Into<String>) {
        self.lookup_program = value.into()
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            count: 10,
            ping_program: "ping".into(),
            lookup_program: "nslookup".into(),
        }
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_skips_blanks_and_comments() {
        let mut input = "8.8.8.8\n\n# upstream\n  1.1.1.1  \n#9.9.9.9\n"
            .as_bytes();
        let list = read_list(&mut input).unwrap();
        assert_eq!(list, ["8.8.8.8", "1.1.1.1"]);
    }

    #[test]
    fn empty_list_is_fine() {
        let mut input = "# nothing here\n\n".as_bytes();
        assert!(read_list(&mut input).unwrap().is_empty());
    }

    #[test]
    fn entries_keep_input_order() {
        let mut input = "b\na\nc\n".as_bytes();
        assert_eq!(read_list(&mut input).unwrap(), ["b", "a", "c"]);
    }
}
