//! Errors raised while parsing Resource IDs.

use std::collections::BTreeMap;

use thiserror::Error;

/// The broad category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No input was provided.
    EmptyInput,
    /// A required segment was missing or empty.
    SegmentNotSpecified,
    /// A fixed segment did not hold the expected value.
    SegmentMismatch,
    /// The input had more segments than the ID type describes, or an odd
    /// number of key/value segments.
    UnexpectedSegmentCount,
}

/// An error raised when an input string can't be parsed as a Resource ID.
///
/// Every variant echoes the original input so the failure can be reported
/// without the caller having to carry it separately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty.
    #[error("parsing {description} ID: the input was empty")]
    EmptyInput {
        /// The ID type being parsed.
        description: &'static str,
    },

    /// A required segment had no value.
    #[error(
        "parsing {description} ID {input:?}: the segment {segment:?} was not specified \
         (expected a value like {example:?})"
    )]
    SegmentNotSpecified {
        /// The ID type being parsed.
        description: &'static str,
        /// The name of the segment which was missing.
        segment: &'static str,
        /// An example value for the missing segment.
        example: &'static str,
        /// The original input.
        input: String,
        /// The segments parsed before the failure.
        parsed: BTreeMap<&'static str, String>,
    },

    /// A static, resource provider or constant segment held the wrong value.
    #[error(
        "parsing {description} ID {input:?}: expected the segment {segment:?} to be {expected:?} \
         but got {actual:?}"
    )]
    SegmentMismatch {
        /// The ID type being parsed.
        description: &'static str,
        /// The name of the segment which didn't match.
        segment: &'static str,
        /// The value (or values) that were accepted.
        expected: String,
        /// The value found in the input.
        actual: String,
        /// The original input.
        input: String,
    },

    /// Tokens remained after every segment was consumed.
    ///
    /// The first unexpected token sits at index `expected`.
    #[error("{}", unexpected_segments(.description, .input, .expected, .actual, .token, .after))]
    UnexpectedSegmentCount {
        /// The ID type being parsed.
        description: &'static str,
        /// The number of tokens the ID type accounts for.
        expected: usize,
        /// The number of tokens found in the input.
        actual: usize,
        /// The first token left over, empty for a trailing `/`.
        token: String,
        /// The last segment the ID type describes.
        after: &'static str,
        /// The original input.
        input: String,
    },

    /// A key/value element of a generic ID was missing or empty.
    #[error(
        "parsing {description} ID {input:?}: the element {key:?} at position {index} was not \
         specified"
    )]
    ElementNotSpecified {
        /// The ID type being parsed.
        description: &'static str,
        /// The element key, or the value when the key itself was empty.
        key: String,
        /// The token index of the element key.
        index: usize,
        /// The original input.
        input: String,
    },

    /// A generic ID ended with a key that had no value.
    #[error(
        "parsing {description} ID {input:?}: the element {key:?} has no value, the number of \
         segments must be even"
    )]
    UnpairedElement {
        /// The ID type being parsed.
        description: &'static str,
        /// The trailing key.
        key: String,
        /// The original input.
        input: String,
    },

    /// Elements of a generic ID were left after every expected one was read.
    #[error("parsing {description} ID {input:?}: unexpected elements {keys:?}")]
    UnconsumedElements {
        /// The ID type being parsed.
        description: &'static str,
        /// The keys that were never read, in path order.
        keys: Vec<String>,
        /// The original input.
        input: String,
    },
}

impl ParseError {
    /// The category of this error.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::EmptyInput { .. } => ParseErrorKind::EmptyInput,
            Self::SegmentNotSpecified { .. } => ParseErrorKind::SegmentNotSpecified,
            Self::SegmentMismatch { .. } => ParseErrorKind::SegmentMismatch,
            Self::ElementNotSpecified { .. } => ParseErrorKind::SegmentNotSpecified,
            Self::UnexpectedSegmentCount { .. }
            | Self::UnpairedElement { .. }
            | Self::UnconsumedElements { .. } => ParseErrorKind::UnexpectedSegmentCount,
        }
    }

    /// The segment which failed to parse, if the error is specific to one.
    ///
    /// Generic IDs name the element key instead. Leftover tokens are reported
    /// through [`ParseError::unexpected_token`].
    pub fn segment(&self) -> Option<&str> {
        match self {
            Self::SegmentNotSpecified { segment, .. } | Self::SegmentMismatch { segment, .. } => {
                Some(segment)
            },
            Self::ElementNotSpecified { key, .. } | Self::UnpairedElement { key, .. } => {
                Some(key.as_str())
            },
            Self::UnconsumedElements { keys, .. } => keys.first().map(String::as_str),
            Self::EmptyInput { .. } | Self::UnexpectedSegmentCount { .. } => None,
        }
    }

    /// The index and value of the first token left over after parsing.
    pub fn unexpected_token(&self) -> Option<(usize, &str)> {
        match self {
            Self::UnexpectedSegmentCount {
                expected, token, ..
            } => Some((*expected, token.as_str())),
            _ => None,
        }
    }

    /// The input which failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::EmptyInput { .. } => "",
            Self::SegmentNotSpecified { input, .. }
            | Self::SegmentMismatch { input, .. }
            | Self::UnexpectedSegmentCount { input, .. }
            | Self::ElementNotSpecified { input, .. }
            | Self::UnpairedElement { input, .. }
            | Self::UnconsumedElements { input, .. } => input.as_str(),
        }
    }

    /// The ID type that was being parsed.
    pub fn description(&self) -> &'static str {
        match self {
            Self::EmptyInput { description }
            | Self::SegmentNotSpecified { description, .. }
            | Self::SegmentMismatch { description, .. }
            | Self::UnexpectedSegmentCount { description, .. }
            | Self::ElementNotSpecified { description, .. }
            | Self::UnpairedElement { description, .. }
            | Self::UnconsumedElements { description, .. } => *description,
        }
    }
}

fn unexpected_segments(
    description: &str,
    input: &str,
    expected: &usize,
    actual: &usize,
    token: &str,
    after: &str,
) -> String {
    if token.is_empty() && expected + 1 == *actual {
        format!(
            "parsing {description} ID {input:?}: unexpected trailing \"/\" after the segment \
             {after:?}"
        )
    } else {
        format!(
            "parsing {description} ID {input:?}: expected {expected} segments but got {actual}, \
             the first unexpected segment is {token:?} at position {expected}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::EmptyInput {
            description: "Capacity",
        };
        assert_eq!(format!("{}", err), "parsing Capacity ID: the input was empty");

        let err = ParseError::SegmentMismatch {
            description: "Capacity",
            segment: "staticCapacities",
            expected: "capacities".to_string(),
            actual: "pools".to_string(),
            input: "/x".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "parsing Capacity ID \"/x\": expected the segment \"staticCapacities\" to be \
             \"capacities\" but got \"pools\""
        );
    }

    #[test]
    fn test_accessors() {
        let err = ParseError::SegmentNotSpecified {
            description: "Capacity",
            segment: "capacityName",
            example: "capacityName",
            input: "/subscriptions/x".to_string(),
            parsed: BTreeMap::new(),
        };
        assert_eq!(err.kind(), ParseErrorKind::SegmentNotSpecified);
        assert_eq!(err.segment(), Some("capacityName"));
        assert_eq!(err.input(), "/subscriptions/x");
        assert_eq!(err.description(), "Capacity");

        let err = ParseError::UnexpectedSegmentCount {
            description: "Capacity",
            expected: 8,
            actual: 9,
            token: "x".to_string(),
            after: "capacityName",
            input: "/a".to_string(),
        };
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedSegmentCount);
        assert_eq!(err.segment(), None);
        assert_eq!(err.unexpected_token(), Some((8, "x")));

        let err = ParseError::UnconsumedElements {
            description: "Resource",
            keys: vec!["vaults".to_string(), "keys".to_string()],
            input: "/a".to_string(),
        };
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedSegmentCount);
        assert_eq!(err.segment(), Some("vaults"));
        assert_eq!(err.unexpected_token(), None);
    }

    #[test]
    fn test_unexpected_segment_display() {
        let err = ParseError::UnexpectedSegmentCount {
            description: "Capacity",
            expected: 8,
            actual: 9,
            token: "x".to_string(),
            after: "capacityName",
            input: "/a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parsing Capacity ID \"/a\": expected 8 segments but got 9, the first unexpected \
             segment is \"x\" at position 8"
        );

        let err = ParseError::UnexpectedSegmentCount {
            description: "Capacity",
            expected: 8,
            actual: 9,
            token: String::new(),
            after: "capacityName",
            input: "/a/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parsing Capacity ID \"/a/\": unexpected trailing \"/\" after the segment \"capacityName\""
        );
    }
}
