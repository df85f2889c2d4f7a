use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot read input: {0}")]
    InputUnreadable(#[source] std::io::Error),
    #[error("invalid FLF header: {0}")]
    InvalidHeader(String),
    #[error("header declares {expected} comment lines but input ends after {found}")]
    TruncatedComments { expected: usize, found: usize },
    #[error("cannot write {}: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown character: {0:?}")]
    UnknownChar(char),
}

pub type Result<T> = std::result::Result<T, FontError>;
