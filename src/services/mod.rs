//! Resource IDs and API models grouped by Azure service.

pub mod desktopvirtualization;
pub mod devopsinfrastructure;
pub mod machinelearning;
pub mod powerbi;

use crate::commonids;
use crate::resourceids::Recaser;

/// Build a [`Recaser`] knowing every Resource ID type in this crate.
///
/// Build it once at provider start-up and share it by reference.
pub fn recaser() -> Recaser {
    Recaser::builder()
        .register::<commonids::ScopeId>()
        .register::<commonids::SubscriptionId>()
        .register::<commonids::ResourceGroupId>()
        .register::<commonids::StorageAccountId>()
        .register::<commonids::KeyVaultId>()
        .register::<commonids::VirtualNetworkId>()
        .register::<commonids::SubnetId>()
        .register::<commonids::AppServicePlanId>()
        .register::<commonids::AppServiceId>()
        .register::<commonids::KubernetesClusterId>()
        .register::<commonids::UserAssignedIdentityId>()
        .register::<desktopvirtualization::HostPoolId>()
        .register::<desktopvirtualization::ApplicationGroupId>()
        .register::<devopsinfrastructure::PoolId>()
        .register::<machinelearning::WorkspaceId>()
        .register::<machinelearning::DatastoreId>()
        .register::<machinelearning::ModelVersionId>()
        .register::<powerbi::CapacityId>()
        .build()
}
