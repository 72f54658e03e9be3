//! Store Error Types
//!
//! Errors raised by link store gateways. The service layer reports every one
//! of them to callers as "store unavailable"; the variants only carry detail.

use crate::models::LinkAddress;
use thiserror::Error;

/// Link store gateway errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying engine could not be reached
    #[error("Link store unavailable: {0}")]
    Unavailable(String),

    /// The engine has no link with this id
    #[error("Link not found in store: {id}")]
    LinkNotFound { id: LinkAddress },

    /// The engine answered with something that could not be understood
    #[error("Link store returned an unreadable result: {0}")]
    Corrupted(String),
}

impl StoreError {
    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a corrupted result error
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }
}
