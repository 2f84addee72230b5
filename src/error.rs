use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single input line could not be turned into a [`Contribution`](crate::record::Contribution).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing field {index} ({name}), line has {found} fields")]
    MissingField {
        index: usize,
        name: &'static str,
        found: usize,
    },
    #[error("transaction amount {raw:?} is not a number")]
    InvalidAmount { raw: String },
    #[error("transaction amount {raw:?} is not finite")]
    NonFiniteAmount { raw: String },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot open input {path:?}: {source}")]
    OpenInput { path: PathBuf, source: io::Error },
    #[error("cannot create output {path:?}: {source}")]
    CreateOutput { path: PathBuf, source: io::Error },
    #[error("failed reading input at line {line}: {source}")]
    Read { line: u64, source: io::Error },
    #[error("failed writing {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed record at line {line}: {source}")]
    Malformed { line: u64, source: RecordError },
}
