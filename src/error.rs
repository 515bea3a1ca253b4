use thiserror::Error;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unable to open: {path:?}, please check the path ({source})")]
    InputAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed {stream} row at line {line}: missing field {field} (row has {found} fields)")]
    RowShape {
        stream: &'static str,
        line: u64,
        field: usize,
        found: usize,
    },

    #[error("Invalid percent identity at line {line}: {value:?}")]
    InvalidPercentIdentity { line: u64, value: String },

    #[error("Malformed accession pair at line {line}: {value:?}")]
    MalformedPair { line: u64, value: String },

    #[error("Empty accession in alias list at line {line}: {value:?}")]
    EmptyAlias { line: u64, value: String },

    #[error("Accession {accession:?} at line {line} is already owned by the node from line {first_line}")]
    DuplicateAccession { line: u64, accession: String, first_line: u64 },

    #[error("Edge at line {line} references unknown accession {accession:?}")]
    DanglingAccession { line: u64, accession: String },
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn input_access<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::InputAccess { path: path.into(), source }
    }

    /// Row-level errors are the ones a `skip` row policy may downgrade.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Error::RowShape { .. }
                | Error::InvalidPercentIdentity { .. }
                | Error::MalformedPair { .. }
                | Error::EmptyAlias { .. }
                | Error::DuplicateAccession { .. }
        )
    }
}
