//! Errors raised by the discriminated-union codec.

use thiserror::Error;

/// An error raised while encoding or decoding a discriminated union.
///
/// An unrecognised discriminator value is not an error; it decodes into the
/// family's raw variant.
#[derive(Debug, Error)]
pub enum UnionError {
    /// The input was not valid JSON.
    #[error("decoding {family}: {source}")]
    Malformed {
        /// The union family being decoded.
        family: &'static str,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The input was valid JSON but not an object.
    #[error("decoding {family}: expected a JSON object but got {found}")]
    NotAnObject {
        /// The union family being decoded.
        family: &'static str,
        /// The kind of JSON value found.
        found: &'static str,
    },

    /// A value was required but the discriminator was absent or not a string.
    #[error("decoding {family}: the discriminator {discriminator:?} was missing or not a string")]
    MissingDiscriminator {
        /// The union family being decoded.
        family: &'static str,
        /// The discriminator key.
        discriminator: &'static str,
    },

    /// The object named a known variant but its fields didn't fit that variant.
    #[error("decoding {family} variant {variant:?}: {source}")]
    Decode {
        /// The union family being decoded.
        family: &'static str,
        /// The variant being attempted.
        variant: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A variant's fields could not be serialized.
    #[error("encoding {family} variant {variant:?}: {source}")]
    Encode {
        /// The union family being encoded.
        family: &'static str,
        /// The variant being encoded.
        variant: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A variant serialized to something other than a JSON object.
    #[error("encoding {family} variant {variant:?}: expected the fields to serialize as a JSON object")]
    EncodeNotObject {
        /// The union family being encoded.
        family: &'static str,
        /// The variant being encoded.
        variant: String,
    },
}

impl UnionError {
    /// The union family the error relates to.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Malformed { family, .. }
            | Self::NotAnObject { family, .. }
            | Self::MissingDiscriminator { family, .. }
            | Self::Decode { family, .. }
            | Self::Encode { family, .. }
            | Self::EncodeNotObject { family, .. } => *family,
        }
    }

    /// The variant being decoded or encoded, when known.
    pub fn variant(&self) -> Option<&str> {
        match self {
            Self::Decode { variant, .. }
            | Self::Encode { variant, .. }
            | Self::EncodeNotObject { variant, .. } => Some(variant.as_str()),
            Self::Malformed { .. } | Self::NotAnObject { .. } | Self::MissingDiscriminator { .. } => {
                None
            },
        }
    }
}
