//! Errors raised while constructing core types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid term id: {0}")]
    InvalidTermId(String),

    #[error("term id must be non-zero")]
    ZeroTermId,
}
