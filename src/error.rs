use std::path::PathBuf;
use thiserror::Error;

/// Why a genre expression could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("unknown genre: \"{0}\"")]
    UnknownGenre(String),
    #[error("missing closing parenthesis")]
    MissingClosingParenthesis,
    #[error("unexpected token: \"{0}\"")]
    UnexpectedToken(String),
    #[error("unexpected token or end of expression")]
    UnexpectedEnd,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path:?} with {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode the dataset with {0}")]
    Json(serde_json::Error),
    #[error("the dataset must be an array of books, found {0}")]
    NotAnArray(&'static str),
}
