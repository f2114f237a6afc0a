//! Azure Machine Learning workspaces, datastores and models.
//!
//! Datastores are the main polymorphic model here: a [`Datastore`] is picked by
//! `datastoreType`, its [`DatastoreCredentials`] by `credentialsType`, and the
//! credentials' [`DatastoreSecrets`] by `secretsType`. Fields shared by every
//! datastore live in [`DatastoreBase`], flattened into each variant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resourceids::{ParseError, ResourceId};

crate::resource_id! {
    /// A Machine Learning Workspace.
    pub struct WorkspaceId("Workspace") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftMachineLearningServices", "Microsoft.MachineLearningServices"),
        static_segment("staticWorkspaces", "workspaces"),
        user_specified("workspaceName" => workspace_name, "workspaceValue"),
    }
}

crate::resource_id! {
    /// A Datastore within a Machine Learning Workspace.
    pub struct DatastoreId("Datastore") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftMachineLearningServices", "Microsoft.MachineLearningServices"),
        static_segment("staticWorkspaces", "workspaces"),
        user_specified("workspaceName" => workspace_name, "workspaceValue"),
        static_segment("staticDatastores", "datastores"),
        user_specified("datastoreName" => datastore_name, "datastoreValue"),
    }
}

crate::resource_id! {
    /// A version of a registered Model.
    pub struct ModelVersionId("Model Version") {
        static_segment("staticSubscriptions", "subscriptions"),
        subscription_id("subscriptionId" => subscription_id, "12345678-1234-9876-4563-123456789012"),
        static_segment("staticResourceGroups", "resourceGroups"),
        resource_group("resourceGroupName" => resource_group_name, "example-resource-group"),
        static_segment("staticProviders", "providers"),
        resource_provider("staticMicrosoftMachineLearningServices", "Microsoft.MachineLearningServices"),
        static_segment("staticWorkspaces", "workspaces"),
        user_specified("workspaceName" => workspace_name, "workspaceValue"),
        static_segment("staticModels", "models"),
        user_specified("modelName" => model_name, "modelValue"),
        static_segment("staticVersions", "versions"),
        user_specified("versionName" => version_name, "versionValue"),
    }
}

impl DatastoreId {
    /// The Workspace this Datastore belongs to.
    pub fn workspace_id(&self) -> WorkspaceId {
        WorkspaceId::new(
            &self.subscription_id,
            &self.resource_group_name,
            &self.workspace_name,
        )
    }
}

impl ModelVersionId {
    /// The Workspace this Model belongs to.
    pub fn workspace_id(&self) -> WorkspaceId {
        WorkspaceId::new(
            &self.subscription_id,
            &self.resource_group_name,
            &self.workspace_name,
        )
    }
}

/// Fields shared by every [`Datastore`] variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatastoreBase {
    /// How the workspace authenticates against the storage service.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub credentials: Option<DatastoreCredentials>,
    /// The asset description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this is the workspace's default datastore. Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// The asset property dictionary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    /// Tag dictionary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

/// How the service's managed identity accesses the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceDataAccessAuthIdentity {
    /// Do not use the service's identity.
    None,
    /// Use the workspace's system-assigned managed identity.
    WorkspaceSystemAssignedIdentity,
    /// Use the workspace's user-assigned managed identity.
    WorkspaceUserAssignedIdentity,
}

/// An Azure Blob Storage container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureBlobDatastore {
    /// Shared datastore fields.
    #[serde(flatten)]
    pub base: DatastoreBase,
    /// Storage account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Storage account container name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    /// Azure cloud endpoint for the storage account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Protocol used to communicate with the storage account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Azure Resource Group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// Azure Subscription ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    /// Identity used to access the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_data_access_auth_identity: Option<ServiceDataAccessAuthIdentity>,
}

/// An Azure Data Lake Gen1 store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureDataLakeGen1Datastore {
    /// Shared datastore fields.
    #[serde(flatten)]
    pub base: DatastoreBase,
    /// Azure Data Lake store name.
    #[serde(default)]
    pub store_name: String,
    /// Identity used to access the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_data_access_auth_identity: Option<ServiceDataAccessAuthIdentity>,
}

/// An Azure Data Lake Gen2 filesystem.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureDataLakeGen2Datastore {
    /// Shared datastore fields.
    #[serde(flatten)]
    pub base: DatastoreBase,
    /// Storage account name.
    #[serde(default)]
    pub account_name: String,
    /// The name of the Data Lake Gen2 filesystem.
    #[serde(default)]
    pub filesystem: String,
    /// Azure cloud endpoint for the storage account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Protocol used to communicate with the storage account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Identity used to access the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_data_access_auth_identity: Option<ServiceDataAccessAuthIdentity>,
}

/// An Azure File share.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureFileDatastore {
    /// Shared datastore fields.
    #[serde(flatten)]
    pub base: DatastoreBase,
    /// Storage account name.
    #[serde(default)]
    pub account_name: String,
    /// The name of the Azure file share.
    #[serde(default)]
    pub file_share_name: String,
    /// Azure cloud endpoint for the storage account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Protocol used to communicate with the storage account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Identity used to access the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_data_access_auth_identity: Option<ServiceDataAccessAuthIdentity>,
}

crate::discriminated_union! {
    /// A storage location a Machine Learning Workspace can read data from.
    pub enum Datastore("datastoreType") {
        /// Azure Blob Storage.
        AzureBlob("AzureBlob") => AzureBlobDatastore,
        /// Azure Data Lake Gen1.
        AzureDataLakeGen1("AzureDataLakeGen1") => AzureDataLakeGen1Datastore,
        /// Azure Data Lake Gen2.
        AzureDataLakeGen2("AzureDataLakeGen2") => AzureDataLakeGen2Datastore,
        /// Azure Files.
        AzureFile("AzureFile") => AzureFileDatastore,
    }
}

impl Datastore {
    /// The shared fields, unless this is an unrecognised datastore.
    pub fn base(&self) -> Option<&DatastoreBase> {
        match self {
            Self::AzureBlob(d) => Some(&d.base),
            Self::AzureDataLakeGen1(d) => Some(&d.base),
            Self::AzureDataLakeGen2(d) => Some(&d.base),
            Self::AzureFile(d) => Some(&d.base),
            Self::Unknown(_) => None,
        }
    }
}

/// Storage account key credentials.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKeyDatastoreCredentials {
    /// The storage account key.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub secrets: Option<DatastoreSecrets>,
}

/// Service principal credentials authenticated with a certificate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDatastoreCredentials {
    /// Authority URL used for authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_url: Option<String>,
    /// Service principal client ID.
    #[serde(default)]
    pub client_id: String,
    /// Resource the service principal has access to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    /// The certificate.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub secrets: Option<DatastoreSecrets>,
    /// ID of the tenant the service principal belongs to.
    #[serde(default)]
    pub tenant_id: String,
    /// Thumbprint of the certificate used for authentication.
    #[serde(default)]
    pub thumbprint: String,
}

/// No credentials; the data is public or reached through the workspace identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NoneDatastoreCredentials {}

/// Shared access signature credentials.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SasDatastoreCredentials {
    /// The SAS token.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub secrets: Option<DatastoreSecrets>,
}

/// Service principal credentials authenticated with a client secret.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipalDatastoreCredentials {
    /// Authority URL used for authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_url: Option<String>,
    /// Service principal client ID.
    #[serde(default)]
    pub client_id: String,
    /// Resource the service principal has access to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    /// The client secret.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
    pub secrets: Option<DatastoreSecrets>,
    /// ID of the tenant the service principal belongs to.
    #[serde(default)]
    pub tenant_id: String,
}

crate::discriminated_union! {
    /// How a [`Datastore`] authenticates against its storage service.
    pub enum DatastoreCredentials("credentialsType") {
        /// Storage account key.
        AccountKey("AccountKey") => AccountKeyDatastoreCredentials,
        /// Service principal with a certificate.
        Certificate("Certificate") => CertificateDatastoreCredentials,
        /// No credentials.
        None("None") => NoneDatastoreCredentials,
        /// Shared access signature.
        Sas("Sas") => SasDatastoreCredentials,
        /// Service principal with a client secret.
        ServicePrincipal("ServicePrincipal") => ServicePrincipalDatastoreCredentials,
    }
}

/// A storage account key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountKeyDatastoreSecrets {
    /// The storage account key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// A service principal certificate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CertificateDatastoreSecrets {
    /// The certificate, PEM encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
}

/// A SAS token.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SasDatastoreSecrets {
    /// The storage container SAS token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sas_token: Option<String>,
}

/// A service principal client secret.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipalDatastoreSecrets {
    /// The service principal secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

crate::discriminated_union! {
    /// The secret half of some [`DatastoreCredentials`].
    ///
    /// The API never returns secrets, so these are only ever encoded.
    pub enum DatastoreSecrets("secretsType") {
        /// Storage account key.
        AccountKey("AccountKey") => AccountKeyDatastoreSecrets,
        /// Service principal certificate.
        Certificate("Certificate") => CertificateDatastoreSecrets,
        /// SAS token.
        Sas("Sas") => SasDatastoreSecrets,
        /// Service principal client secret.
        ServicePrincipal("ServicePrincipal") => ServicePrincipalDatastoreSecrets,
    }
}

/// The Azure Resource Manager envelope around a [`Datastore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatastoreResource {
    /// Fully qualified Resource ID, as returned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The name of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The type of the resource.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// The datastore itself.
    pub properties: Datastore,
}

impl DatastoreResource {
    /// Wrap `properties` for a create or update request.
    pub fn new(properties: impl Into<Datastore>) -> Self {
        Self {
            id: None,
            name: None,
            resource_type: None,
            properties: properties.into(),
        }
    }

    /// The typed ID of this datastore, if the API returned one.
    ///
    /// IDs returned by the API don't always preserve casing, so they are parsed
    /// insensitively.
    pub fn datastore_id(&self) -> Result<Option<DatastoreId>, ParseError> {
        self.id
            .as_deref()
            .map(DatastoreId::parse_insensitively)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polymorphic::{marshal_value, unmarshal, UnionFamily};
    use crate::testing::{assert_discriminator, assert_round_trip, assert_union_round_trip};
    use serde_json::{json, Value};

    const DATASTORE: &str = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.MachineLearningServices/workspaces/ws1/datastores/blob1";

    #[test]
    fn test_blob_datastore_with_nested_credentials() {
        let raw = br#"{"datastoreType":"AzureBlob","accountName":"foo","credentials":{"credentialsType":"None"}}"#;
        let datastore: Datastore = unmarshal(raw).unwrap().unwrap();

        let Datastore::AzureBlob(blob) = &datastore else {
            panic!("expected a blob datastore, got {datastore:?}");
        };
        assert_eq!(blob.account_name.as_deref(), Some("foo"));
        assert_eq!(
            blob.base.credentials,
            Some(DatastoreCredentials::None(NoneDatastoreCredentials {}))
        );

        assert_eq!(
            marshal_value(&datastore).unwrap(),
            json!({"datastoreType": "AzureBlob", "accountName": "foo", "credentials": {"credentialsType": "None"}})
        );
    }

    #[test]
    fn test_unknown_datastore_is_kept() {
        let datastore: Datastore = unmarshal(br#"{"datastoreType":"SomeFutureType","xyz":123}"#)
            .unwrap()
            .unwrap();

        let Datastore::Unknown(raw) = &datastore else {
            panic!("expected the raw variant, got {datastore:?}");
        };
        assert_eq!(raw.discriminator, "SomeFutureType");
        assert_eq!(
            Value::Object(raw.values.clone()),
            json!({"datastoreType": "SomeFutureType", "xyz": 123})
        );
        assert!(datastore.base().is_none());
        assert_discriminator(&datastore, "SomeFutureType");
    }

    #[test]
    fn test_forced_discriminators() {
        let datastore = Datastore::from(AzureFileDatastore {
            account_name: "acct".to_string(),
            file_share_name: "share".to_string(),
            base: DatastoreBase {
                credentials: Some(DatastoreCredentials::Sas(SasDatastoreCredentials {
                    secrets: Some(DatastoreSecrets::Sas(SasDatastoreSecrets {
                        sas_token: Some("token".to_string()),
                    })),
                })),
                ..Default::default()
            },
            ..Default::default()
        });

        let value = assert_discriminator(&datastore, "AzureFile");
        assert_eq!(value["credentials"]["credentialsType"], "Sas");
        assert_eq!(value["credentials"]["secrets"]["secretsType"], "Sas");
        assert_eq!(value["credentials"]["secrets"]["sasToken"], "token");
    }

    #[test]
    fn test_variant_round_trips() {
        assert_union_round_trip(&Datastore::from(AzureBlobDatastore {
            account_name: Some("acct".to_string()),
            container_name: Some("data".to_string()),
            service_data_access_auth_identity: Some(ServiceDataAccessAuthIdentity::WorkspaceSystemAssignedIdentity),
            base: DatastoreBase {
                description: Some("training data".to_string()),
                tags: Some(BTreeMap::from([("env".to_string(), "test".to_string())])),
                credentials: Some(
                    ServicePrincipalDatastoreCredentials {
                        client_id: "client".to_string(),
                        tenant_id: "tenant".to_string(),
                        ..Default::default()
                    }
                    .into(),
                ),
                ..Default::default()
            },
            ..Default::default()
        }));
        assert_union_round_trip(&Datastore::from(AzureDataLakeGen1Datastore {
            store_name: "lake".to_string(),
            ..Default::default()
        }));
        assert_union_round_trip(&Datastore::from(AzureDataLakeGen2Datastore {
            account_name: "acct".to_string(),
            filesystem: "fs".to_string(),
            ..Default::default()
        }));
        assert_union_round_trip(&DatastoreCredentials::from(CertificateDatastoreCredentials {
            client_id: "client".to_string(),
            tenant_id: "tenant".to_string(),
            thumbprint: "ABCDEF".to_string(),
            ..Default::default()
        }));
    }

    #[test]
    fn test_credentials_without_discriminator_are_absent() {
        let datastore: Datastore = serde_json::from_value(json!({
            "datastoreType": "azureblob",
            "credentials": {"secrets": {}},
        }))
        .unwrap();
        assert_eq!(datastore.discriminator_value(), "AzureBlob");
        assert_eq!(datastore.base().and_then(|b| b.credentials.as_ref()), None);
    }

    #[test]
    fn test_datastore_resource() {
        let resource: DatastoreResource = serde_json::from_value(json!({
            "id": DATASTORE.replace("resourceGroups", "resourcegroups"),
            "name": "blob1",
            "type": "Microsoft.MachineLearningServices/workspaces/datastores",
            "properties": {"datastoreType": "AzureBlob", "isDefault": true},
        }))
        .unwrap();

        let id = resource.datastore_id().unwrap().unwrap();
        assert_eq!(id.id(), DATASTORE);
        assert_eq!(id.workspace_id().workspace_name, "ws1");
        assert_eq!(resource.properties.base().and_then(|b| b.is_default), Some(true));

        let resource = DatastoreResource::new(AzureDataLakeGen1Datastore::default());
        assert_eq!(resource.datastore_id().unwrap(), None);
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"properties": {"datastoreType": "AzureDataLakeGen1", "storeName": ""}})
        );
    }

    #[test]
    fn test_datastore_resource_requires_a_discriminator() {
        let err = serde_json::from_value::<DatastoreResource>(json!({"properties": {}})).unwrap_err();
        assert!(err.to_string().contains("datastoreType"));
    }

    #[test]
    fn test_model_version_id() {
        let id = ModelVersionId::new("sub1", "rg1", "ws1", "model1", "3");
        assert_eq!(
            id.id(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.MachineLearningServices/workspaces/ws1/models/model1/versions/3"
        );
        assert_eq!(id.workspace_id(), WorkspaceId::new("sub1", "rg1", "ws1"));
        assert_round_trip(&id);
        assert_eq!(
            id.to_string(),
            "Model Version (Subscription Id: \"sub1\"\nResource Group Name: \"rg1\"\nWorkspace Name: \"ws1\"\nModel Name: \"model1\"\nVersion Name: \"3\")"
        );
    }

    #[test]
    fn test_known_values() {
        assert_eq!(
            Datastore::known_values(),
            &["AzureBlob", "AzureDataLakeGen1", "AzureDataLakeGen2", "AzureFile"]
        );
        assert_eq!(DatastoreSecrets::DISCRIMINATOR, "secretsType");
    }
}
