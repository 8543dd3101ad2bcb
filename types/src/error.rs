//! Errors raised while constructing ballot value types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid voter address: {0:?}")]
    InvalidAddress(String),
}

/// A proposal name did not fit its byte bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("proposal name {name:?} is {len} bytes, maximum is {max}")]
pub struct NameTooLong {
    pub name: String,
    pub len: usize,
    pub max: usize,
}
