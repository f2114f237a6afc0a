//! Managed DevOps Pools.

use serde::{Deserialize, Serialize};

crate::resource_id! {
    /// A Managed DevOps Pool.
    pub struct PoolId("Pool") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftDevOpsInfrastructure", "Microsoft.DevOpsInfrastructure"),
        static_segment("staticPools", "pools"),
        user_specified("poolName" => pool_name, "poolValue"),
    }
}

/// An Azure DevOps organization the pool serves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// The organization URL.
    pub url: String,
    /// Projects the pool is limited to; all projects when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    /// How many agents this organization may use at once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<i64>,
}

/// Who may administer the pool in Azure DevOps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureDevOpsPermissionProfile {
    /// `CreatorOnly`, `Inherit` or `SpecificAccounts`.
    pub kind: String,
    /// Users granted access when `kind` is `SpecificAccounts`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    /// Groups granted access when `kind` is `SpecificAccounts`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

/// A pool registered with Azure DevOps organizations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureDevOpsOrganizationProfile {
    /// The organizations the pool is available to.
    #[serde(default)]
    pub organizations: Vec<Organization>,
    /// Administration permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_profile: Option<AzureDevOpsPermissionProfile>,
}

/// A GitHub organization the pool serves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubOrganization {
    /// The organization URL.
    pub url: String,
    /// Repositories the pool is limited to; all repositories when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<String>,
}

/// A pool registered with GitHub organizations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubOrganizationProfile {
    /// The organizations the pool is available to.
    #[serde(default)]
    pub organizations: Vec<GitHubOrganization>,
}

crate::discriminated_union! {
    /// Where the pool's agents are registered.
    pub enum OrganizationProfile("kind") {
        /// Azure DevOps.
        AzureDevOps("AzureDevOps") => AzureDevOpsOrganizationProfile,
        /// GitHub.
        GitHub("GitHub") => GitHubOrganizationProfile,
    }
}

/// Standby agents provisioned from observed demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomaticResourcePredictionsProfile {
    /// `Balanced`, `MostCostEffective`, `MoreCostEffective`, `MorePerformance`
    /// or `BestPerformance`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_preference: Option<String>,
}

/// Standby agents provisioned from a manual schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ManualResourcePredictionsProfile {}

crate::discriminated_union! {
    /// How standby agents are provisioned.
    pub enum ResourcePredictionsProfile("kind") {
        /// Driven by observed demand.
        Automatic("Automatic") => AutomaticResourcePredictionsProfile,
        /// Driven by a schedule.
        Manual("Manual") => ManualResourcePredictionsProfile,
    }
}

/// Agents which are kept between jobs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatefulAgentProfile {
    /// How long an agent may live, as a `d.hh:mm:ss` time span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_agent_lifetime: Option<String>,
    /// How long an idle agent is kept before being removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period_time_span: Option<String>,
    /// Standby agent provisioning.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub resource_predictions_profile: Option<ResourcePredictionsProfile>,
}

/// Agents which are discarded after every job.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatelessAgentProfile {
    /// Standby agent provisioning.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub resource_predictions_profile: Option<ResourcePredictionsProfile>,
}

crate::discriminated_union! {
    /// The lifecycle of the pool's agents.
    pub enum AgentProfile("kind") {
        /// Agents are kept between jobs.
        Stateful("Stateful") => StatefulAgentProfile,
        /// Agents are discarded after every job.
        Stateless("Stateless") => StatelessAgentProfile,
    }
}

impl AgentProfile {
    /// The standby agent provisioning, unless this is an unrecognised profile.
    pub fn resource_predictions_profile(&self) -> Option<&ResourcePredictionsProfile> {
        match self {
            Self::Stateful(p) => p.resource_predictions_profile.as_ref(),
            Self::Stateless(p) => p.resource_predictions_profile.as_ref(),
            Self::Unknown(_) => None,
        }
    }
}

/// The properties of a Managed DevOps Pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolProperties {
    /// The Dev Center project the pool belongs to.
    #[serde(default)]
    pub dev_center_project_resource_id: String,
    /// The maximum number of agents running at once.
    #[serde(default)]
    pub maximum_concurrency: i64,
    /// Agent lifecycle.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub agent_profile: Option<AgentProfile>,
    /// Where agents are registered.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub organization_profile: Option<OrganizationProfile>,
    /// The provisioning state. Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polymorphic::{unmarshal, UnionFamily};
    use crate::resourceids::ResourceId;
    use crate::testing::{assert_discriminator, assert_insensitive_parse_matches, assert_union_round_trip};
    use serde_json::json;

    #[test]
    fn test_pool_id() {
        let input = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/rg1/providers/Microsoft.DevOpsInfrastructure/pools/pool1";
        let id = PoolId::parse(input).unwrap();
        assert_eq!(id.pool_name, "pool1");
        assert_insensitive_parse_matches::<PoolId>(input);
    }

    #[test]
    fn test_pool_properties() {
        let properties: PoolProperties = serde_json::from_value(json!({
            "devCenterProjectResourceId": "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.DevCenter/projects/p1",
            "maximumConcurrency": 4,
            "agentProfile": {
                "kind": "stateless",
                "resourcePredictionsProfile": {"kind": "Automatic", "predictionPreference": "Balanced"},
            },
            "organizationProfile": {
                "kind": "GitHub",
                "organizations": [{"url": "https://github.com/contoso", "repositories": ["app"]}],
            },
            "provisioningState": "Succeeded",
        }))
        .unwrap();

        assert_eq!(properties.maximum_concurrency, 4);
        assert_eq!(
            properties
                .agent_profile
                .as_ref()
                .and_then(AgentProfile::resource_predictions_profile),
            Some(&ResourcePredictionsProfile::Automatic(AutomaticResourcePredictionsProfile {
                prediction_preference: Some("Balanced".to_string()),
            }))
        );
        let Some(OrganizationProfile::GitHub(github)) = &properties.organization_profile else {
            panic!("expected a GitHub organization profile");
        };
        assert_eq!(github.organizations[0].repositories, vec!["app".to_string()]);

        let value = serde_json::to_value(&properties).unwrap();
        assert_eq!(value["agentProfile"]["kind"], "Stateless");
        assert_eq!(value["organizationProfile"]["kind"], "GitHub");
    }

    #[test]
    fn test_unknown_agent_profile_survives_round_trip() {
        let profile: AgentProfile = unmarshal(br#"{"kind":"Ephemeral","ttl":"PT1H"}"#).unwrap().unwrap();
        assert!(profile.is_unknown());
        assert!(profile.resource_predictions_profile().is_none());
        assert_eq!(
            assert_discriminator(&profile, "Ephemeral"),
            json!({"kind": "Ephemeral", "ttl": "PT1H"})
        );
    }

    #[test]
    fn test_organization_profile_round_trip() {
        assert_union_round_trip(&OrganizationProfile::from(AzureDevOpsOrganizationProfile {
            organizations: vec![Organization {
                url: "https://dev.azure.com/contoso".to_string(),
                projects: vec!["web".to_string()],
                parallelism: Some(2),
            }],
            permission_profile: Some(AzureDevOpsPermissionProfile {
                kind: "CreatorOnly".to_string(),
                ..Default::default()
            }),
        }));
        assert_union_round_trip(&ResourcePredictionsProfile::from(ManualResourcePredictionsProfile {}));
    }

    #[test]
    fn test_manual_profile_forces_discriminator() {
        let value = assert_discriminator(
            &ResourcePredictionsProfile::Manual(ManualResourcePredictionsProfile {}),
            "Manual",
        );
        assert_eq!(value, json!({"kind": "Manual"}));
    }
}
