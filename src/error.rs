use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, NnError>;

/// Every failure the network, trainer, evaluator and data loader can report.
#[derive(Debug)]
pub enum NnError {
    /// A network was requested with a zero input or hidden size.
    InvalidConfiguration(String),
    /// A feature vector, target list or weight row has the wrong length.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A persisted model disagrees with its own declared sizes.
    CorruptModel(String),
    /// An operation that averages over samples was handed none.
    EmptyDataset(&'static str),
    /// A data row could not be parsed. Loaders recover from this by skipping the row.
    MalformedRow { line: usize, reason: String },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl NnError {
    pub(crate) fn mismatch(what: &'static str, got: usize, expected: usize) -> Self {
        NnError::DimensionMismatch {
            what,
            got,
            expected,
        }
    }
}

impl Display for NnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            NnError::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch in {what}: got {got}, expected {expected}"
            ),
            NnError::CorruptModel(msg) => write!(f, "corrupt model: {msg}"),
            NnError::EmptyDataset(what) => write!(f, "empty dataset: {what} has no samples"),
            NnError::MalformedRow { line, reason } => {
                write!(f, "malformed row at line {line}: {reason}")
            }
            NnError::Io(e) => write!(f, "i/o error: {e}"),
            NnError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for NnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NnError::Io(e) => Some(e),
            NnError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NnError {
    fn from(value: std::io::Error) -> Self {
        NnError::Io(value)
    }
}

impl From<serde_json::Error> for NnError {
    fn from(value: serde_json::Error) -> Self {
        NnError::Json(value)
    }
}
