//! AzureRM Provider SDK
//!
//! This crate provides the two codecs an Azure Resource Manager provider leans
//! on everywhere: typed Resource IDs and discriminated-union JSON models.
//!
//! # Overview
//!
//! The SDK provides:
//!
//! - **Resource IDs** ([`resourceids`]): segment-driven parsing, validation and
//!   canonical formatting of ARM paths, with an insensitive mode and a
//!   [`Recaser`] for IDs returned by the API
//! - **Polymorphic models** ([`polymorphic`]): closed enums selected by a
//!   string discriminator, with a raw fallback for values this crate doesn't
//!   know about
//! - **Shipped types** ([`commonids`], [`services`]): common IDs plus per-service
//!   IDs and models
//! - **Schema & validation**: attribute schemas whose Resource ID attributes
//!   validate and document themselves
//! - **Error types**: Common error types for provider implementations
//! - **Logging**: Integration with `tracing` for structured logging
//!
//! # Quick Start
//!
//! ```
//! use azurerm_provider_sdk::resourceids::ResourceId;
//! use azurerm_provider_sdk::services::desktopvirtualization::HostPoolId;
//! use azurerm_provider_sdk::services::devopsinfrastructure::PoolProperties;
//! use azurerm_provider_sdk::ProviderError;
//!
//! fn host_pool_name(state_id: &str) -> Result<String, ProviderError> {
//!     let id = HostPoolId::parse(state_id)?;
//!     Ok(id.host_pool_name)
//! }
//!
//! assert_eq!(
//!     host_pool_name(
//!         "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/rg1/providers/Microsoft.DesktopVirtualization/hostPools/pool1"
//!     )
//!     .unwrap(),
//!     "pool1"
//! );
//! assert!(host_pool_name("").unwrap_err().is_unresolvable_id());
//!
//! let properties: PoolProperties = serde_json::from_str(
//!     r#"{"maximumConcurrency": 2, "organizationProfile": {"kind": "AzureDevOps", "organizations": []}}"#,
//! )
//! .unwrap();
//! assert!(properties.organization_profile.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commonids;
pub mod error;
pub mod logging;
pub mod polymorphic;
pub mod resourceids;
pub mod schema;
pub mod services;
pub mod testing;
pub mod validation;

// Re-export main types at crate root
pub use error::ProviderError;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use polymorphic::{marshal, unmarshal, RawVariant, UnionError, UnionFamily};
pub use resourceids::{GenericId, ParseError, Recaser, ResourceId};
pub use schema::{Attribute, Diagnostic, Schema};
pub use validation::{is_valid, validate, validate_result};

// Re-export commonly used external types; the declaration macros expand to
// paths through these.
pub use serde;
pub use serde_json;
pub use tracing;
