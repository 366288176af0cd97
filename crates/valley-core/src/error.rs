//! Error types for the valley.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Position ({row}, {column}) is outside the {size}x{size} valley")]
    OutOfBounds { row: i32, column: i32, size: i32 },

    #[error("Cell ({row}, {column}) is already occupied")]
    OccupiedCell { row: i32, column: i32 },

    #[error("Line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Line {line}: unknown species '{name}'")]
    UnknownSpecies { line: usize, name: String },

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Snapshot cannot be restored: {0}")]
    PersistenceCorrupt(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Attach an import line number to a grid error
    pub fn at_line(self, line: usize) -> Self {
        match self {
            e @ (Error::MalformedRecord { .. }
            | Error::UnknownSpecies { .. }
            | Error::AtLine { .. }) => e,
            other => Error::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, looking through line annotations
    pub fn root(&self) -> &Error {
        match self {
            Error::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    /// Import line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedRecord { line, .. }
            | Error::UnknownSpecies { line, .. }
            | Error::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
