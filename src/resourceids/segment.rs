//! Segment specifications for Resource IDs.
//!
//! A Resource ID type is an ordered list of [`Segment`]s. Each segment knows
//! how many path tokens it consumes, whether its value is fixed, and an example
//! value used when the ID type documents itself.

/// The kind of a single segment within a Resource ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentType {
    /// A fixed literal, such as `resourceGroups` or `capacities`.
    Static,
    /// A fixed Resource Provider namespace, such as `Microsoft.Storage`.
    ResourceProvider,
    /// An arbitrary non-empty value supplied by the user, such as a resource name.
    UserSpecified,
    /// The Subscription ID. User-specified, documented with a placeholder GUID.
    SubscriptionId,
    /// The Resource Group name. User-specified, documented with a placeholder name.
    ResourceGroup,
    /// One value out of a fixed set, such as a DNS record type.
    Constant,
    /// One or more tokens forming an arbitrary parent resource path.
    Scope,
}

/// A single segment specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// The name of the segment, used as the key in a parse result and in errors.
    pub name: &'static str,
    /// The kind of segment.
    pub segment_type: SegmentType,
    /// The canonical literal for `Static` and `ResourceProvider` segments.
    pub fixed_value: Option<&'static str>,
    /// The accepted values for a `Constant` segment.
    pub possible_values: &'static [&'static str],
    /// An example value, used for documentation and error messages.
    pub example_value: &'static str,
}

impl Segment {
    fn new(name: &'static str, segment_type: SegmentType, example_value: &'static str) -> Self {
        Self {
            name,
            segment_type,
            fixed_value: None,
            possible_values: &[],
            example_value,
        }
    }

    /// A static segment which must match `value`.
    pub fn static_segment(name: &'static str, value: &'static str) -> Self {
        Self {
            fixed_value: Some(value),
            ..Self::new(name, SegmentType::Static, value)
        }
    }

    /// A Resource Provider segment which must match the namespace `value`.
    pub fn resource_provider(name: &'static str, value: &'static str) -> Self {
        Self {
            fixed_value: Some(value),
            ..Self::new(name, SegmentType::ResourceProvider, value)
        }
    }

    /// A user-specified segment.
    pub fn user_specified(name: &'static str, example: &'static str) -> Self {
        Self::new(name, SegmentType::UserSpecified, example)
    }

    /// The Subscription ID segment.
    pub fn subscription_id(name: &'static str, example: &'static str) -> Self {
        Self::new(name, SegmentType::SubscriptionId, example)
    }

    /// The Resource Group segment.
    pub fn resource_group(name: &'static str, example: &'static str) -> Self {
        Self::new(name, SegmentType::ResourceGroup, example)
    }

    /// A segment whose value must be one of `possible_values`.
    pub fn constant(
        name: &'static str,
        possible_values: &'static [&'static str],
        example: &'static str,
    ) -> Self {
        Self {
            possible_values,
            ..Self::new(name, SegmentType::Constant, example)
        }
    }

    /// A scope segment spanning one or more tokens.
    pub fn scope(name: &'static str, example: &'static str) -> Self {
        Self::new(name, SegmentType::Scope, example)
    }

    /// Whether the segment value is fixed by the ID type rather than the user.
    pub fn is_fixed(&self) -> bool {
        matches!(
            self.segment_type,
            SegmentType::Static | SegmentType::ResourceProvider
        )
    }

    /// Whether the segment carries a value the caller supplies.
    pub fn is_user_value(&self) -> bool {
        !self.is_fixed()
    }

    /// Whether the segment consumes exactly one path token.
    pub fn is_single_token(&self) -> bool {
        self.segment_type != SegmentType::Scope
    }

    /// The stored form of a user value for this segment: scope values always
    /// start with `/`, everything else is kept as given.
    pub fn normalise(&self, value: String) -> String {
        match self.segment_type {
            SegmentType::Scope if !value.starts_with('/') => format!("/{value}"),
            _ => value,
        }
    }

    /// A human readable label for the segment, e.g. `resourceGroupName` becomes
    /// `Resource Group Name`.
    pub fn label(&self) -> String {
        humanize(self.name)
    }
}

pub(crate) fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}
