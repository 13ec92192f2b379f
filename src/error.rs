use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading demographic tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{file}: missing column `{column}`")]
    MissingColumn { file: String, column: String },

    #[error("{file}, line {line}: invalid {column} value `{value}`")]
    InvalidField {
        file: String,
        line: usize,
        column: String,
        value: String,
    },

    #[error("invalid decade label `{0}`")]
    InvalidDecade(String),

    #[error("{0} table is empty")]
    EmptyTable(&'static str),
}

pub type Result<T> = std::result::Result<T, TableError>;
