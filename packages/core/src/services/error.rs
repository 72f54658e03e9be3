//! Service Layer Error Types
//!
//! Errors for the flat algebra and the recursive codec. Kinds are kept apart
//! so callers can tell bad input from missing data from a store outage.

use crate::db::StoreError;
use crate::models::ValidationError;
use thiserror::Error;

/// Links service errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinksError {
    /// Substitution has fewer than two values
    #[error("Substitution must contain at least [source, target], got {len} value(s)")]
    InvalidSubstitution { len: usize },

    /// Update or delete called without a restriction
    #[error("Restriction required for {operation}")]
    RestrictionRequired { operation: &'static str },

    /// Restriction matched nothing on update or delete
    #[error("No links found matching restriction {restriction} for {operation}")]
    NoMatch {
        operation: &'static str,
        restriction: String,
    },

    /// Nested array item violates the `[source, target]` contract
    #[error("Invalid array item: {0}")]
    InvalidArrayItem(String),

    /// Sequence builder received an empty array
    #[error("Cannot create sequence from empty array")]
    EmptySequence,

    /// Nested reference group produced no references to link to
    #[error("Nested reference group produced no references")]
    EmptyReferenceGroup,

    /// Nested value could not be built from its input
    #[error("Invalid nested value: {0}")]
    InvalidNode(#[from] ValidationError),

    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Gateway could not be reached or answered nonsense
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl LinksError {
    /// Create an invalid array item error for an item that is too short
    pub fn array_item_arity(len: usize) -> Self {
        Self::InvalidArrayItem(format!(
            "array items must have at least 2 elements [source, target], got {}",
            len
        ))
    }

    /// Create an invalid array item error with a custom message
    pub fn invalid_array_item(msg: impl Into<String>) -> Self {
        Self::InvalidArrayItem(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Stable discriminator for routing on error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSubstitution { .. } => "invalid_substitution",
            Self::RestrictionRequired { .. } => "restriction_required",
            Self::NoMatch { .. } => "no_match",
            Self::InvalidArrayItem(_) => "invalid_array_item",
            Self::EmptySequence => "empty_sequence",
            Self::EmptyReferenceGroup => "empty_reference_group",
            Self::InvalidNode(_) => "invalid_node",
            Self::InvalidConfig(_) => "invalid_config",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }

    /// True for failures caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::NoMatch { .. } | Self::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_become_unavailable() {
        let err: LinksError = StoreError::unavailable("connection refused").into();
        assert_eq!(err.kind(), "store_unavailable");
        assert!(!err.is_input_error());
        assert_eq!(
            err.to_string(),
            "Store unavailable: Link store unavailable: connection refused"
        );
    }

    #[test]
    fn test_every_store_failure_has_one_kind() {
        for store_err in [
            StoreError::corrupted("row without target"),
            StoreError::LinkNotFound { id: 3 },
        ] {
            assert_eq!(LinksError::from(store_err).kind(), "store_unavailable");
        }
    }

    #[test]
    fn test_validation_errors_convert() {
        let err: LinksError = ValidationError::UnsupportedValue("\"text\"".to_string()).into();
        assert_eq!(err.kind(), "invalid_node");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_arity_message() {
        let err = LinksError::array_item_arity(1);
        assert_eq!(err.kind(), "invalid_array_item");
        assert!(err.to_string().contains("at least 2 elements"));
        assert!(err.is_input_error());
    }
}
