use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("key '{key}' not found in header")]
    KeyNotFound { key: String },

    // `line` is 1-based, counted over the whole stream (comments included)
    #[error("line {line}: field {index} out of range ({count} fields)")]
    FieldOutOfRange {
        line: usize,
        index: usize,
        count: usize,
    },

    #[error("unable to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read {input}: {source}")]
    Read {
        input: String,
        #[source]
        source: io::Error,
    },

    #[error("unable to write output: {0}")]
    Write(#[source] io::Error),
}

impl Error {
    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 1,
            _ => 2,
        }
    }

    /// The reader on the other end of stdout went away (`hcut ... | head`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Error::Write(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::usage("bad").exit_code(), 1);
        assert_eq!(
            Error::KeyNotFound {
                key: "age".to_string()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            Error::FieldOutOfRange {
                line: 1,
                index: 5,
                count: 3
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn test_broken_pipe() {
        let err = Error::Write(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(err.is_broken_pipe());

        let err = Error::Write(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!err.is_broken_pipe());

        let err = Error::Read {
            input: "standard input".to_string(),
            source: io::Error::from(io::ErrorKind::BrokenPipe),
        };
        assert!(!err.is_broken_pipe());
    }

    #[test]
    fn test_messages() {
        let err = Error::FieldOutOfRange {
            line: 4,
            index: 5,
            count: 3,
        };
        assert_eq!(err.to_string(), "line 4: field 5 out of range (3 fields)");

        let err = Error::Open {
            path: PathBuf::from("missing.csv"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("unable to open missing.csv"));
    }
}
