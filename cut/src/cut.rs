use std::io::{BufRead, Write};

use crate::args::{Config, InputSource, Selection};
use crate::error::{Error, Result};

/// Map each requested key to its 1-based position in `header`.
///
/// Positions come back in the order of `keys`. When a name appears several
/// times in the header the first occurrence wins.
pub fn resolve_keys(header: &str, delimiter: &str, keys: &[String]) -> Result<Vec<usize>> {
    let names: Vec<&str> = header.trim_end().split(delimiter).collect();
    keys.iter()
        .map(|key| {
            names
                .iter()
                .position(|name| *name == key.as_str())
                .map(|i| i + 1)
                .ok_or_else(|| Error::KeyNotFound { key: key.clone() })
        })
        .collect()
}

/// Select the fields at the 1-based `indices` of `line` and join them with
/// `delimiter`. `line_no` only serves the error message.
pub fn cut_line(line: &str, delimiter: &str, indices: &[usize], line_no: usize) -> Result<String> {
    let fields: Vec<&str> = line.trim_end().split(delimiter).collect();
    let selected = indices
        .iter()
        .map(|&index| {
            index
                .checked_sub(1)
                .and_then(|i| fields.get(i).copied())
                .ok_or(Error::FieldOutOfRange {
                    line: line_no,
                    index,
                    count: fields.len(),
                })
        })
        .collect::<Result<Vec<&str>>>()?;
    Ok(selected.join(delimiter))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub comments: usize,
    pub records: usize,
}

pub struct Cutter<'a> {
    delimiter: &'a str,
    selection: &'a Selection,
    comment_prefix: Option<&'a str>,
    keep_header: bool,
    input: &'a InputSource,
}

impl<'a> Cutter<'a> {
    pub fn new(config: &'a Config) -> Self {
        Cutter {
            delimiter: &config.delimiter,
            selection: &config.selection,
            comment_prefix: config.comment_prefix.as_deref(),
            keep_header: config.keep_header,
            input: &config.input,
        }
    }

    fn is_comment(&self, line: &str) -> bool {
        self.comment_prefix
            .is_some_and(|prefix| line.starts_with(prefix))
    }

    /// Stream `input` to `out` one line at a time.
    ///
    /// Comment lines are copied verbatim, exactly once, wherever they occur.
    /// In key mode the first other line is the header: it is consumed to
    /// resolve the keys and only written back with `keep_header`.
    pub fn cut<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> Result<Summary> {
        let (mut positions, keys) = match self.selection {
            Selection::ByIndex(indices) => (Some(indices.clone()), &[] as &[String]),
            Selection::ByKey(keys) => (None, keys.as_slice()),
        };
        let mut summary = Summary::default();

        let mut buf = String::new();
        loop {
            buf.clear();
            let bytes_read = input.read_line(&mut buf).map_err(|source| Error::Read {
                input: self.input.to_string(),
                source,
            })?;
            if bytes_read == 0 {
                break;
            }
            summary.lines += 1;

            if self.is_comment(&buf) {
                out.write_all(buf.as_bytes()).map_err(Error::Write)?;
                summary.comments += 1;
                continue;
            }

            match &positions {
                Some(indices) => {
                    let record = cut_line(&buf, self.delimiter, indices, summary.lines)?;
                    writeln!(out, "{record}").map_err(Error::Write)?;
                    summary.records += 1;
                }
                None => {
                    let resolved = resolve_keys(&buf, self.delimiter, keys)?;
                    log::debug!("resolved keys {:?} to fields {:?}", keys, resolved);
                    if self.keep_header {
                        let header = cut_line(&buf, self.delimiter, &resolved, summary.lines)?;
                        writeln!(out, "{header}").map_err(Error::Write)?;
                    }
                    positions = Some(resolved);
                }
            }
        }

        if positions.is_none() {
            log::warn!("no header line found");
        }
        Ok(summary)
    }
}
