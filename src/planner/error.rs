use crate::types::error::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unrecognized keyword at start of '{0}'")]
    UnrecognizedStatement(String),
    #[error("Syntax error: {0}")]
    SyntaxError(String),
    #[error("ID must be positive.")]
    NegativeId(String),
    #[error("Invalid ID '{0}'")]
    InvalidId(String),
    #[error("Invalid row: {0}")]
    InvalidRow(#[from] DatabaseError),
}
