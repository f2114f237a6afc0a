//! Typed Resource IDs.
//!
//! Azure Resource Manager identifies every resource with a hierarchical path:
//!
//! ```text
//! /subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/{namespace}/{type}/{name}
//! ```
//!
//! An ID type is described once as an ordered list of [`Segment`]s. The same
//! list drives both parsing ([`Parser`]) and formatting ([`format_segments`]),
//! so the two can never disagree about segment order.
//!
//! Concrete ID types are declared with the [`resource_id!`](crate::resource_id)
//! macro, which generates the struct, its constructor and a [`ResourceId`] impl.
//! IDs read without a declared type go through [`GenericId`].
//!
//! # Example
//!
//! ```
//! use azurerm_provider_sdk::resourceids::ResourceId;
//! use azurerm_provider_sdk::services::powerbi::CapacityId;
//!
//! let id = CapacityId::parse(
//!     "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resGroup1/providers/Microsoft.PowerBIDedicated/capacities/capacity1",
//! )
//! .unwrap();
//! assert_eq!(id.resource_group_name, "resGroup1");
//! assert_eq!(id.capacity_name, "capacity1");
//! assert_eq!(CapacityId::parse(&id.id()).unwrap(), id);
//! ```

mod error;
mod generic;
mod parser;
mod recaser;
mod segment;

pub use error::{ParseError, ParseErrorKind};
pub use generic::GenericId;
pub use parser::{format_segments, ParseResult, Parser};
pub use recaser::{Recaser, RecaserBuilder};
pub use segment::{Segment, SegmentType};

use serde_json::Value;

use crate::error::ProviderError;

/// A typed Resource ID.
///
/// Implementations are normally generated by [`resource_id!`](crate::resource_id).
pub trait ResourceId: Sized {
    /// A short human readable name for the ID type, e.g. `Capacity`.
    const DESCRIPTION: &'static str;

    /// The ordered segments making up this ID type.
    fn segments() -> Vec<Segment>;

    /// Build the typed ID from a successful parse.
    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError>;

    /// The values of the user-specified segments, in segment order.
    fn values(&self) -> Vec<&str>;

    /// The canonical string form of this ID.
    fn id(&self) -> String {
        format_segments(&Self::segments(), &self.values())
    }

    /// Parse `input`, matching fixed segments exactly.
    fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, false)
    }

    /// Parse `input` ignoring the casing of fixed segments.
    ///
    /// Only use this for IDs returned by the API, which doesn't always preserve
    /// casing. User-supplied IDs should go through [`ResourceId::parse`].
    fn parse_insensitively(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, true)
    }

    /// Parse `input` in the given mode.
    fn parse_with(input: &str, insensitively: bool) -> Result<Self, ParseError> {
        let result = Parser::new(Self::DESCRIPTION, Self::segments()).parse(input, insensitively)?;
        Self::from_parse_result(&result)
    }

    /// One `Label: "value"` line per user-specified segment.
    fn components(&self) -> Vec<String> {
        Self::segments()
            .iter()
            .filter(|segment| segment.is_user_value())
            .zip(self.values())
            .map(|(segment, value)| format!("{}: {:?}", segment.label(), value))
            .collect()
    }

    /// An example of this ID built from each segment's example value.
    fn example() -> String {
        let segments = Self::segments();
        let values: Vec<&str> = segments
            .iter()
            .filter(|segment| segment.is_user_value())
            .map(|segment| segment.example_value)
            .collect();
        format_segments(&segments, &values)
    }
}

/// The multi-line diagnostic rendering of an ID.
///
/// Only meant for logs and error messages; it is never parsed back.
pub fn describe<T: ResourceId>(id: &T) -> String {
    format!("{} ({})", T::DESCRIPTION, id.components().join("\n"))
}

/// Validate that `input` is a string holding a valid `T`.
///
/// The return shape matches [`ValidateFunc`](crate::schema::ValidateFunc):
/// warnings first, then errors. No warnings are currently produced.
pub fn validate_resource_id<T: ResourceId>(
    input: &Value,
    key: &str,
) -> (Vec<String>, Vec<ProviderError>) {
    let Some(value) = input.as_str() else {
        return (
            Vec::new(),
            vec![ProviderError::Validation(format!("expected {key} to be a string"))],
        );
    };

    match T::parse(value) {
        Ok(_) => (Vec::new(), Vec::new()),
        Err(source) => (
            Vec::new(),
            vec![ProviderError::InvalidField {
                field: key.to_string(),
                source,
            }],
        ),
    }
}

/// Declare a typed Resource ID.
///
/// Each entry names a [`Segment`] constructor, the segment name, optionally the
/// struct field holding its value, and the fixed literal (for `static_segment`
/// and `resource_provider`) or example value (for everything else). Only
/// segments that carry a user value should name a field.
///
/// ```
/// use azurerm_provider_sdk::resource_id;
/// use azurerm_provider_sdk::resourceids::ResourceId;
///
/// resource_id! {
///     /// A Redis cache.
///     pub struct RedisId("Redis") {
///         static_segment("staticSubscriptions", "subscriptions"),
///         subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
///         static_segment("staticResourceGroups", "resourceGroups"),
///         resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
///         static_segment("staticProviders", "providers"),
///         resource_provider("staticMicrosoftCache", "Microsoft.Cache"),
///         static_segment("staticRedis", "redis"),
///         user_specified("redisName" => redis_name, "redisName"),
///     }
/// }
///
/// let id = RedisId::new("sub", "rg", "cache1");
/// assert_eq!(
///     id.id(),
///     "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Cache/redis/cache1"
/// );
/// ```
#[macro_export]
macro_rules! resource_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($description:literal) {
            $( $kind:ident($segment:literal $(=> $field:ident)?, $value:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name {
            $( $(
                #[doc = concat!("The `", $segment, "` segment.")]
                pub $field: ::std::string::String,
            )? )+
        }

        impl $name {
            /// Construct the ID from its user-specified segments.
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $( $field: impl ::std::convert::Into<::std::string::String>, )? )+) -> Self {
                Self {
                    $( $(
                        $field: $crate::resourceids::Segment::$kind($segment, $value)
                            .normalise($field.into()),
                    )? )+
                }
            }
        }

        impl $crate::resourceids::ResourceId for $name {
            const DESCRIPTION: &'static str = $description;

            fn segments() -> ::std::vec::Vec<$crate::resourceids::Segment> {
                ::std::vec![
                    $( $crate::resourceids::Segment::$kind($segment, $value), )+
                ]
            }

            fn from_parse_result(
                result: &$crate::resourceids::ParseResult,
            ) -> ::std::result::Result<Self, $crate::resourceids::ParseError> {
                ::std::result::Result::Ok(Self {
                    $( $(
                        $field: result
                            .require(&$crate::resourceids::Segment::$kind($segment, $value))?
                            .to_string(),
                    )? )+
                })
            }

            fn values(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![ $( $( self.$field.as_str(), )? )+ ]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::resourceids::describe(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::resourceids::ParseError;

            fn from_str(input: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::resourceids::ResourceId>::parse(input)
            }
        }
    };
}
