//! Azure Virtual Desktop.

use crate::commonids::ResourceGroupId;

crate::resource_id! {
    /// A Virtual Desktop Host Pool.
    pub struct HostPoolId("Host Pool") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftDesktopVirtualization", "Microsoft.DesktopVirtualization"),
        static_segment("staticHostPools", "hostPools"),
        user_specified("hostPoolName" => host_pool_name, "hostPoolValue"),
    }
}

crate::resource_id! {
    /// A Virtual Desktop Application Group.
    pub struct ApplicationGroupId("Application Group") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftDesktopVirtualization", "Microsoft.DesktopVirtualization"),
        static_segment("staticApplicationGroups", "applicationGroups"),
        user_specified("applicationGroupName" => application_group_name, "applicationGroupValue"),
    }
}

impl HostPoolId {
    /// The Resource Group holding this Host Pool.
    pub fn resource_group_id(&self) -> ResourceGroupId {
        ResourceGroupId::new(&self.subscription_id, &self.resource_group_name)
    }
}

impl ApplicationGroupId {
    /// The Resource Group holding this Application Group.
    pub fn resource_group_id(&self) -> ResourceGroupId {
        ResourceGroupId::new(&self.subscription_id, &self.resource_group_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resourceids::{ParseErrorKind, ResourceId};
    use crate::testing::{assert_insensitive_parse_matches, assert_round_trip, assert_truncations_rejected};

    const HOST_POOL: &str = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.DesktopVirtualization/hostPools/pool1";

    #[test]
    fn test_host_pool_id() {
        let id = HostPoolId::parse(HOST_POOL).unwrap();
        assert_eq!(id.host_pool_name, "pool1");
        assert_eq!(
            id.resource_group_id(),
            ResourceGroupId::new("12345678-1234-9876-4563-123456789012", "resGroup1")
        );
        assert_round_trip(&id);
        assert_truncations_rejected::<HostPoolId>(HOST_POOL);
        assert_insensitive_parse_matches::<HostPoolId>(HOST_POOL);
    }

    #[test]
    fn test_host_pool_id_is_not_an_application_group() {
        let err = ApplicationGroupId::parse(HOST_POOL).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::SegmentMismatch);
        assert_eq!(err.segment(), Some("staticApplicationGroups"));
    }

    #[test]
    fn test_application_group_id() {
        let id = ApplicationGroupId::new("sub1", "rg1", "desktop");
        assert_eq!(
            id.id(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.DesktopVirtualization/applicationGroups/desktop"
        );
        assert_eq!(id.resource_group_id().id(), "/subscriptions/sub1/resourceGroups/rg1");
        assert_round_trip(&id);
    }

    #[test]
    fn test_example() {
        assert_eq!(
            HostPoolId::example(),
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/example-resource-group/providers/Microsoft.DesktopVirtualization/hostPools/hostPoolValue"
        );
    }
}
