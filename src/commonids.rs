//! Resource IDs shared across many services.

crate::resource_id! {
    /// A Subscription.
    pub struct SubscriptionId("Subscription") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
    }
}

crate::resource_id! {
    /// A Resource Group.
    pub struct ResourceGroupId("Resource Group") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
    }
}

crate::resource_id! {
    /// Any scope a resource can be nested under: a subscription, a resource
    /// group, or another resource.
    pub struct ScopeId("Scope") {
        scope("scope" => scope, "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/some-resource-group"),
    }
}

crate::resource_id! {
    /// A Storage Account.
    pub struct StorageAccountId("Storage Account") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftStorage", "Microsoft.Storage"),
        static_segment("staticStorageAccounts", "storageAccounts"),
        user_specified("storageAccountName" => storage_account_name, "storageAccountValue"),
    }
}

crate::resource_id! {
    /// A Key Vault.
    pub struct KeyVaultId("Key Vault") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftKeyVault", "Microsoft.KeyVault"),
        static_segment("staticVaults", "vaults"),
        user_specified("vaultName" => vault_name, "vaultValue"),
    }
}

crate::resource_id! {
    /// A Virtual Network.
    pub struct VirtualNetworkId("Virtual Network") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftNetwork", "Microsoft.Network"),
        static_segment("staticVirtualNetworks", "virtualNetworks"),
        user_specified("virtualNetworkName" => virtual_network_name, "virtualNetworkValue"),
    }
}

crate::resource_id! {
    /// A Subnet within a Virtual Network.
    pub struct SubnetId("Subnet") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftNetwork", "Microsoft.Network"),
        static_segment("staticVirtualNetworks", "virtualNetworks"),
        user_specified("virtualNetworkName" => virtual_network_name, "virtualNetworkValue"),
        static_segment("staticSubnets", "subnets"),
        user_specified("subnetName" => subnet_name, "subnetValue"),
    }
}

crate::resource_id! {
    /// An App Service Plan.
    pub struct AppServicePlanId("App Service Plan") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftWeb", "Microsoft.Web"),
        static_segment("staticServerFarms", "serverFarms"),
        user_specified("serverFarmName" => server_farm_name, "serverFarmValue"),
    }
}

crate::resource_id! {
    /// An App Service (Web App or Function App).
    pub struct AppServiceId("App Service") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftWeb", "Microsoft.Web"),
        static_segment("staticSites", "sites"),
        user_specified("siteName" => site_name, "siteValue"),
    }
}

crate::resource_id! {
    /// A Kubernetes (AKS) Cluster.
    pub struct KubernetesClusterId("Kubernetes Cluster") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftContainerService", "Microsoft.ContainerService"),
        static_segment("staticManagedClusters", "managedClusters"),
        user_specified("managedClusterName" => managed_cluster_name, "managedClusterValue"),
    }
}

crate::resource_id! {
    /// A User Assigned Identity.
    pub struct UserAssignedIdentityId("User Assigned Identity") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftManagedIdentity", "Microsoft.ManagedIdentity"),
        static_segment("staticUserAssignedIdentities", "userAssignedIdentities"),
        user_specified("userAssignedIdentityName" => user_assigned_identity_name, "userAssignedIdentityValue"),
    }
}

impl SubnetId {
    /// The Virtual Network this Subnet belongs to.
    pub fn virtual_network_id(&self) -> VirtualNetworkId {
        VirtualNetworkId::new(
            &self.subscription_id,
            &self.resource_group_name,
            &self.virtual_network_name,
        )
    }
}

impl ResourceGroupId {
    /// The Subscription this Resource Group belongs to.
    pub fn subscription(&self) -> SubscriptionId {
        SubscriptionId::new(&self.subscription_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resourceids::{ParseErrorKind, ResourceId};
    use crate::testing::{assert_insensitive_parse_matches, assert_round_trip, assert_truncations_rejected};

    const SUBNET: &str = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/example-resource-group/providers/Microsoft.Network/virtualNetworks/vnet1/subnets/internal";

    #[test]
    fn test_subscription_id() {
        let id = SubscriptionId::parse("/subscriptions/sub1").unwrap();
        assert_eq!(id.subscription_id, "sub1");
        assert_eq!(id.id(), "/subscriptions/sub1");
        assert_round_trip(&id);

        let err = SubscriptionId::parse("/subscriptions").unwrap_err();
        assert_eq!(err.segment(), Some("subscriptionId"));
    }

    #[test]
    fn test_resource_group_id() {
        let id = ResourceGroupId::new("sub1", "rg1");
        assert_eq!(id.id(), "/subscriptions/sub1/resourceGroups/rg1");
        assert_eq!(id.subscription(), SubscriptionId::new("sub1"));
        assert_round_trip(&id);
        assert_truncations_rejected::<ResourceGroupId>(&id.id());
    }

    #[test]
    fn test_scope_id() {
        let id = ScopeId::parse("/subscriptions/sub1/resourceGroups/rg1").unwrap();
        assert_eq!(id.scope, "/subscriptions/sub1/resourceGroups/rg1");
        assert_eq!(id.id(), "/subscriptions/sub1/resourceGroups/rg1");

        let built = ScopeId::new("subscriptions/sub1/resourceGroups/rg1");
        assert_eq!(built, id);
        assert_round_trip(&built);

        let err = ScopeId::parse("").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::EmptyInput);
        let err = ScopeId::parse("/").unwrap_err();
        assert_eq!(err.segment(), Some("scope"));
    }

    #[test]
    fn test_subnet_id() {
        let id = SubnetId::parse(SUBNET).unwrap();
        assert_eq!(id.virtual_network_name, "vnet1");
        assert_eq!(id.subnet_name, "internal");
        assert_eq!(
            id.virtual_network_id().id(),
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/example-resource-group/providers/Microsoft.Network/virtualNetworks/vnet1"
        );
        assert_round_trip(&id);
        assert_truncations_rejected::<SubnetId>(SUBNET);
        assert_insensitive_parse_matches::<SubnetId>(SUBNET);
    }

    #[test]
    fn test_ids_reject_other_types() {
        let err = StorageAccountId::parse(SUBNET).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::SegmentMismatch);
        assert_eq!(err.segment(), Some("staticMicrosoftStorage"));

        let err = VirtualNetworkId::parse(SUBNET).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedSegmentCount);
    }

    #[test]
    fn test_common_round_trips() {
        assert_round_trip(&StorageAccountId::new("sub", "rg", "acct"));
        assert_round_trip(&KeyVaultId::new("sub", "rg", "vault"));
        assert_round_trip(&AppServicePlanId::new("sub", "rg", "plan"));
        assert_round_trip(&AppServiceId::new("sub", "rg", "site"));
        assert_round_trip(&KubernetesClusterId::new("sub", "rg", "aks"));
        assert_round_trip(&UserAssignedIdentityId::new("sub", "rg", "uai"));
        assert_round_trip(&ScopeId::new("/subscriptions/sub/resourceGroups/rg"));
    }

    #[test]
    fn test_display() {
        let id = KeyVaultId::new("sub", "rg", "vault1");
        assert_eq!(
            id.to_string(),
            "Key Vault (Subscription Id: \"sub\"\nResource Group Name: \"rg\"\nVault Name: \"vault1\")"
        );
    }
}
