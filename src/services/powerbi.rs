//! Power BI Embedded.

crate::resource_id! {
    /// A Power BI Embedded Capacity.
    pub struct CapacityId("Capacity") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftPowerBIDedicated", "Microsoft.PowerBIDedicated"),
        static_segment("staticCapacities", "capacities"),
        user_specified("capacityName" => capacity_name, "capacityName"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resourceids::{ParseError, ParseErrorKind, ResourceId};
    use crate::testing::{assert_parse_fails_at, assert_round_trip, assert_truncations_rejected};

    const CAPACITY: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resGroup1/providers/Microsoft.PowerBIDedicated/capacities/capacity1";

    #[test]
    fn test_parse_capacity() {
        let id = CapacityId::parse(CAPACITY).unwrap();
        assert_eq!(id.subscription_id, "00000000-0000-0000-0000-000000000000");
        assert_eq!(id.resource_group_name, "resGroup1");
        assert_eq!(id.capacity_name, "capacity1");
        assert_eq!(id.id(), CAPACITY);
        assert_round_trip(&id);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = CapacityId::parse("").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::EmptyInput);
        assert!(CapacityId::parse_insensitively("").is_err());
    }

    #[test]
    fn test_trailing_empty_name() {
        let input = CAPACITY.trim_end_matches("capacity1");
        assert_parse_fails_at::<CapacityId>(input, "capacityName");

        let ParseError::SegmentNotSpecified { parsed, example, .. } = CapacityId::parse(input).unwrap_err() else {
            panic!("expected a missing segment");
        };
        assert_eq!(example, "capacityName");
        assert_eq!(parsed.get("resourceGroupName").map(String::as_str), Some("resGroup1"));
    }

    #[test]
    fn test_truncations() {
        assert_truncations_rejected::<CapacityId>(CAPACITY);
        assert_parse_fails_at::<CapacityId>(
            "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resGroup1",
            "staticProviders",
        );
    }

    #[test]
    fn test_parse_insensitively() {
        let id = CapacityId::parse_insensitively(
            "/SUBSCRIPTIONS/00000000-0000-0000-0000-000000000000/RESOURCEGROUPS/resGroup1/PROVIDERS/microsoft.powerbidedicated/CAPACITIES/capacity1",
        )
        .unwrap();
        assert_eq!(id.id(), CAPACITY);

        let err = CapacityId::parse(&CAPACITY.to_uppercase()).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::SegmentMismatch);
    }
}
