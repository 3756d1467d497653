//! Cut delimited fields from a text stream, by 1-based position or by name
//! looked up in a header line.

use std::io::{BufWriter, Write};

pub mod args;
pub mod cut;
pub mod error;

pub use args::{Cli, Config, InputSource, Selection};
pub use cut::{cut_line, resolve_keys, Cutter, Summary};
pub use error::{Error, Result};

/// Open the configured input and write the selected fields to `out`.
///
/// Output is buffered and flushed before returning, also when cutting fails,
/// so every record cut before the failing line reaches `out`.
pub fn run<W: Write>(config: &Config, out: W) -> Result<Summary> {
    log::debug!("reading from {:?}", config.input);
    let input = config.input.open()?;

    let mut out = BufWriter::new(out);
    let result = Cutter::new(config).cut(input, &mut out);
    let flushed = out.flush().map_err(Error::Write);

    let summary = result?;
    flushed?;
    log::info!(
        "{} lines read, {} records cut, {} comments passed through",
        summary.lines,
        summary.records,
        summary.comments
    );
    Ok(summary)
}
