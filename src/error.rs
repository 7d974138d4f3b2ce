use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced by loading, benchmarking and recording.
#[derive(Debug)]
pub enum Error {
    /// A file could not be opened, created or written.
    Io { path: PathBuf, source: io::Error },
    /// An input matrix file has too few rows or columns, or a field is not a number.
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    /// The CSV reader or writer rejected the file structurally (e.g. invalid UTF-8).
    Csv { path: PathBuf, source: csv::Error },
    /// Invalid benchmark parameters.
    Config(String),
    /// The pre-run self check disagreed with the naive kernel.
    Verification {
        algorithm: &'static str,
        max_abs_diff: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: u64, reason: impl Into<String>) -> Self {
        Error::Malformed {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Splits `csv::Error` into the I/O and malformed-input kinds.
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        let path = path.into();
        if !source.is_io_error() {
            return Error::Csv { path, source };
        }
        match source.into_kind() {
            csv::ErrorKind::Io(err) => Error::Io { path, source: err },
            kind => Error::malformed(path, 0, format!("{kind:?}")),
        }
    }

    /// True for the MalformedInput kind (as opposed to I/O or configuration failures).
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Malformed { .. } | Error::Csv { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Malformed { path, line, reason } => {
                write!(f, "{}:{}: malformed input: {}", path.display(), line, reason)
            }
            Error::Csv { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Error::Verification {
                algorithm,
                max_abs_diff,
            } => write!(
                f,
                "{algorithm} disagrees with the naive kernel (max abs diff {max_abs_diff:e})"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}
