use std::fmt;
use std::fs::File;
use std::io::{self, stdin, BufReader, Read};
use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};

pub const USAGE: &str = "Usage: hcut [-d DELIMITER] (-f KEYS | FIELD ...) [-m] [FILE]";

/// Cut fields from input (file or stdin) and print them to stdout
#[derive(Parser, Debug)]
#[command(
    name = "hcut",
    version,
    about = "Cut fields from input (file or stdin) and print them to stdout",
    after_help = "Examples:\n  \
                  hcut -d , 1 3 4 input.txt\n  \
                  cat input.txt | hcut 1 3 4\n  \
                  hcut -f name,age input.txt\n  \
                  cat input.txt | hcut -m -f name,age\n\n\
                  A FILE whose name is a number is read as a field index;\n\
                  write it as a path instead: hcut -f name ./2024"
)]
pub struct Cli {
    /// Field delimiter
    #[arg(short, long, value_name = "DELIMITER", default_value = ",")]
    pub delimiter: String,

    /// Comma-separated field keys to cut, resolved against the header line
    #[arg(short = 'f', long = "keys", value_name = "KEYS")]
    pub keys: Option<String>,

    /// Pass lines starting with the comment prefix through unchanged
    #[arg(short = 'm', long)]
    pub ignore_comments: bool,

    /// Comment prefix used with --ignore-comments (empty disables it)
    #[arg(short = 'c', long, value_name = "PREFIX", default_value = "#")]
    pub comment_prefix: String,

    /// With --keys, print the header cut to the selected keys
    #[arg(short = 'H', long)]
    pub keep_header: bool,

    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Field indices to cut (1-based), optionally followed by an input file
    #[arg(value_name = "FIELD")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    ByIndex(Vec<usize>),
    ByKey(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub delimiter: String,
    pub selection: Selection,
    pub comment_prefix: Option<String>,
    pub keep_header: bool,
    pub input: InputSource,
}

impl Cli {
    /// Validate the parsed arguments into a `Config`.
    ///
    /// Positional tokens that read as integers are field indices; any other
    /// token names the input file. `stdin_is_terminal` decides whether a
    /// missing file falls back to standard input.
    pub fn into_config(self, stdin_is_terminal: bool) -> Result<Config> {
        if self.delimiter.is_empty() {
            return Err(Error::usage("the delimiter cannot be empty"));
        }

        let mut fields = Vec::new();
        let mut file: Option<String> = None;
        for arg in self.args {
            if let Ok(index) = arg.parse::<usize>() {
                fields.push(index);
            } else if file.is_some() {
                return Err(Error::usage("multiple input files given"));
            } else {
                file = Some(arg);
            }
        }

        let selection = match (self.keys, fields.is_empty()) {
            (Some(_), false) => {
                return Err(Error::usage(
                    "you cannot mix field indices and field keys",
                ))
            }
            (Some(keys), true) => {
                if keys.is_empty() {
                    return Err(Error::usage("expected a list of keys after -f"));
                }
                Selection::ByKey(keys.split(',').map(str::to_string).collect())
            }
            (None, false) => Selection::ByIndex(fields),
            (None, true) => return Err(Error::usage("no fields selected")),
        };

        let input = match file {
            Some(path) if path == "-" => InputSource::Stdin,
            Some(path) => InputSource::File(PathBuf::from(path)),
            None if stdin_is_terminal => {
                return Err(Error::usage(
                    "no input: give a FILE or pipe data on standard input",
                ))
            }
            None => InputSource::Stdin,
        };

        if self.keep_header && matches!(selection, Selection::ByIndex(_)) {
            log::warn!("--keep-header has no effect without --keys");
        }

        let comment_prefix = if self.ignore_comments && !self.comment_prefix.is_empty() {
            Some(self.comment_prefix)
        } else {
            None
        };

        Ok(Config {
            delimiter: self.delimiter,
            selection,
            comment_prefix,
            keep_header: self.keep_header,
            input,
        })
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "standard input"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub enum Input {
    Stdin,
    File(File),
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Stdin => stdin().read(buf),
            Input::File(file) => file.read(buf),
        }
    }
}

impl InputSource {
    /// Open the source. The file handle closes when the reader is dropped.
    pub fn open(&self) -> Result<BufReader<Input>> {
        let input = match self {
            InputSource::Stdin => Input::Stdin,
            InputSource::File(path) => Input::File(File::open(path).map_err(|source| {
                Error::Open {
                    path: path.clone(),
                    source,
                }
            })?),
        };
        Ok(BufReader::new(input))
    }
}
