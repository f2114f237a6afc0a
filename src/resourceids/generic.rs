//! Untyped Resource IDs.
//!
//! Older resources read their ID as a flat list of `key/value` pairs instead
//! of declaring an ID type. [`GenericId`] splits out the subscription,
//! resource group and provider namespace and keeps every other pair, in path
//! order, for the caller to pop by key.

use std::fmt;
use std::str::FromStr;

use super::error::ParseError;

const DESCRIPTION: &str = "Azure Resource";

const SUBSCRIPTIONS: &str = "subscriptions";
const RESOURCE_GROUPS: &str = "resourceGroups";
const PROVIDERS: &str = "providers";

/// A Resource ID parsed without knowing its type.
///
/// ```
/// use azurerm_provider_sdk::resourceids::GenericId;
///
/// let mut id = GenericId::parse(
///     "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.KeyVault/vaults/vault1",
/// )
/// .unwrap();
/// assert_eq!(id.resource_group.as_deref(), Some("rg1"));
/// assert_eq!(id.pop_segment("vaults").unwrap(), "vault1");
/// assert!(id.ensure_consumed().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericId {
    /// The Subscription ID.
    pub subscription_id: String,
    /// The Resource Group name, absent for subscription level resources.
    pub resource_group: Option<String>,
    /// The Resource Provider namespace, e.g. `Microsoft.KeyVault`.
    pub provider: Option<String>,
    /// The remaining `key/value` pairs, in path order.
    pub path: Vec<(String, String)>,
    input: String,
}

impl GenericId {
    /// Parse `input` as
    /// `/subscriptions/{id}[/resourceGroups/{name}][/providers/{namespace}]/{key}/{value}...`.
    ///
    /// The first `subscriptions`, `resourceGroups` and `providers` keys are
    /// matched ignoring case. Any later occurrence stays in [`GenericId::path`].
    /// A single trailing `/` is accepted.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyInput {
                description: DESCRIPTION,
            });
        }

        let trimmed = input.strip_prefix('/').unwrap_or(input);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let tokens: Vec<&str> = trimmed.split('/').collect();

        if tokens.len() % 2 != 0 {
            return Err(ParseError::UnpairedElement {
                description: DESCRIPTION,
                key: tokens.last().copied().unwrap_or_default().to_string(),
                input: input.to_string(),
            });
        }

        let mut subscription_id = None;
        let mut resource_group = None;
        let mut provider = None;
        let mut path = Vec::new();

        for (index, pair) in tokens.chunks_exact(2).enumerate() {
            let (key, value) = (pair[0], pair[1]);
            if key.is_empty() || value.is_empty() {
                return Err(ParseError::ElementNotSpecified {
                    description: DESCRIPTION,
                    key: if key.is_empty() { value } else { key }.to_string(),
                    index: index * 2,
                    input: input.to_string(),
                });
            }

            let slot = if key.eq_ignore_ascii_case(SUBSCRIPTIONS) {
                &mut subscription_id
            } else if key.eq_ignore_ascii_case(RESOURCE_GROUPS) {
                &mut resource_group
            } else if key.eq_ignore_ascii_case(PROVIDERS) {
                &mut provider
            } else {
                path.push((key.to_string(), value.to_string()));
                continue;
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            } else {
                path.push((key.to_string(), value.to_string()));
            }
        }

        let Some(subscription_id) = subscription_id else {
            return Err(ParseError::ElementNotSpecified {
                description: DESCRIPTION,
                key: SUBSCRIPTIONS.to_string(),
                index: 0,
                input: input.to_string(),
            });
        };

        Ok(Self {
            subscription_id,
            resource_group,
            provider,
            path,
            input: input.to_string(),
        })
    }

    /// The value of the first remaining element named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.path
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove the first remaining element named `key` and return its value.
    ///
    /// Keys are matched exactly.
    pub fn pop_segment(&mut self, key: &str) -> Result<String, ParseError> {
        match self.path.iter().position(|(k, _)| k == key) {
            Some(index) => Ok(self.path.remove(index).1),
            None => Err(ParseError::ElementNotSpecified {
                description: DESCRIPTION,
                key: key.to_string(),
                index: self.input.trim_matches('/').split('/').count(),
                input: self.input.clone(),
            }),
        }
    }

    /// Fail if any element is left after the caller popped the ones it expects.
    pub fn ensure_consumed(&self) -> Result<(), ParseError> {
        if self.path.is_empty() {
            return Ok(());
        }
        Err(ParseError::UnconsumedElements {
            description: DESCRIPTION,
            keys: self.path.iter().map(|(k, _)| k.clone()).collect(),
            input: self.input.clone(),
        })
    }

    /// The input this ID was parsed from.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The canonical string form: subscription, resource group, provider, then
    /// the remaining elements in path order.
    pub fn id(&self) -> String {
        let mut out = format!("/{SUBSCRIPTIONS}/{}", self.subscription_id);
        let known = [
            (RESOURCE_GROUPS, self.resource_group.as_deref()),
            (PROVIDERS, self.provider.as_deref()),
        ];
        let elements = known
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .chain(self.path.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        for (key, value) in elements {
            out.push('/');
            out.push_str(key);
            out.push('/');
            out.push_str(value);
        }
        out
    }
}

impl fmt::Display for GenericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for GenericId {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}
