//! Error types for the AzureRM Provider SDK.

use thiserror::Error;

use crate::polymorphic::UnionError;
use crate::resourceids::ParseError;

/// Errors surfaced to resource implementations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A Resource ID could not be parsed.
    #[error("Invalid resource ID: {0}")]
    InvalidResourceId(#[from] ParseError),

    /// A configuration value held an invalid Resource ID.
    #[error("Invalid {field}: {source}")]
    InvalidField {
        /// The configuration key holding the value.
        field: String,
        /// Why the value could not be parsed.
        source: ParseError,
    },

    /// A polymorphic model could not be encoded or decoded.
    #[error("Polymorphic model error: {0}")]
    Polymorphic(#[from] UnionError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProviderError {
    /// Get the error message as a string.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::Validation(msg) => msg.clone(),
            Self::InvalidResourceId(err) => err.to_string(),
            Self::InvalidField { source, .. } => source.to_string(),
            Self::Polymorphic(err) => err.to_string(),
            Self::Serialization(err) => err.to_string(),
        }
    }

    /// Whether this error means a stored Resource ID can no longer be resolved.
    ///
    /// Read handlers use this to tell a malformed or stale ID apart from an
    /// API failure and drop the resource from state instead of erroring.
    pub fn is_unresolvable_id(&self) -> bool {
        matches!(self, Self::InvalidResourceId(_) | Self::InvalidField { .. })
    }

    /// The underlying Resource ID parse error, if any.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::InvalidResourceId(err) | Self::InvalidField { source: err, .. } => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resourceids::ParseErrorKind;

    #[test]
    fn test_error_display() {
        let err = ProviderError::NotFound("capacity1".to_string());
        assert_eq!(format!("{}", err), "Resource not found: capacity1");

        let err = ProviderError::Validation("invalid input".to_string());
        assert_eq!(format!("{}", err), "Validation error: invalid input");

        let err = ProviderError::from(ParseError::EmptyInput {
            description: "Capacity",
        });
        assert_eq!(
            format!("{}", err),
            "Invalid resource ID: parsing Capacity ID: the input was empty"
        );

        let err = ProviderError::InvalidField {
            field: "capacity_id".to_string(),
            source: ParseError::EmptyInput {
                description: "Capacity",
            },
        };
        assert_eq!(
            format!("{}", err),
            "Invalid capacity_id: parsing Capacity ID: the input was empty"
        );
    }

    #[test]
    fn test_unresolvable_id() {
        let err = ProviderError::from(ParseError::EmptyInput {
            description: "Host Pool",
        });
        assert!(err.is_unresolvable_id());
        assert_eq!(
            err.parse_error().map(ParseError::kind),
            Some(ParseErrorKind::EmptyInput)
        );

        let err = ProviderError::NotFound("x".to_string());
        assert!(!err.is_unresolvable_id());
        assert!(err.parse_error().is_none());
    }

    #[test]
    fn test_message_method() {
        let err = ProviderError::NotFound("capacity1".to_string());
        assert_eq!(err.message(), "capacity1");

        let err = ProviderError::from(serde_json::from_str::<u32>("x").unwrap_err());
        assert!(err.message().contains("expected value"));

        let err = ProviderError::from(UnionError::MissingDiscriminator {
            family: "Datastore",
            discriminator: "datastoreType",
        });
        assert_eq!(
            err.message(),
            "decoding Datastore: the discriminator \"datastoreType\" was missing or not a string"
        );
    }
}
