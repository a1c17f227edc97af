//! Address input.
//!
//! One address per line; blank lines are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::geocoding::WorkItem;

/// Prompt shown when no input path is given on the command line.
pub const PATH_PROMPT: &str = "Please input the path to the file containing addresses:";

/// Read the addresses in a file, in order.
pub fn read_addresses(path: &Path) -> io::Result<Vec<WorkItem>> {
    let file = File::open(path)?;
    parse_addresses(BufReader::new(file))
}

/// Parse addresses from a line-oriented source.
pub fn parse_addresses<R: BufRead>(reader: R) -> io::Result<Vec<WorkItem>> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let address = line.trim_end_matches('\r');
        if address.trim().is_empty() {
            continue;
        }
        items.push(WorkItem::new(address));
    }
    Ok(items)
}

/// Ask for the input file path on `output` and read it from `input`.
pub fn prompt_for_path<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<PathBuf> {
    writeln!(output, "{PATH_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let path = line.trim();
    if path.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "no input path given"));
    }
    Ok(PathBuf::from(path))
}
