//! Discriminated-union JSON codec.
//!
//! Many API models hold a property whose concrete shape depends on a string
//! discriminator inside the object, for example:
//!
//! ```json
//! { "datastoreType": "AzureBlob", "accountName": "foo", "credentials": { "credentialsType": "None" } }
//! ```
//!
//! Each such family is a closed Rust enum declared with
//! [`discriminated_union!`](crate::discriminated_union). Decoding compares the
//! discriminator case-insensitively against the known variants in declaration
//! order; an unrecognised value decodes into [`RawVariant`] so no data is lost.
//! Encoding always writes the variant's own discriminator value, whatever the
//! struct holds.
//!
//! # Example
//!
//! ```
//! use azurerm_provider_sdk::polymorphic::{marshal, unmarshal, UnionFamily};
//! use azurerm_provider_sdk::services::machinelearning::{Datastore, DatastoreCredentials};
//!
//! let raw = br#"{"datastoreType":"AzureBlob","accountName":"foo","credentials":{"credentialsType":"None"}}"#;
//! let datastore: Datastore = unmarshal(raw).unwrap().unwrap();
//!
//! let Datastore::AzureBlob(blob) = &datastore else { panic!("expected a blob datastore") };
//! assert_eq!(blob.account_name.as_deref(), Some("foo"));
//! assert!(matches!(blob.base.credentials, Some(DatastoreCredentials::None(_))));
//!
//! let encoded: serde_json::Value = serde_json::from_slice(&marshal(&datastore).unwrap()).unwrap();
//! assert_eq!(encoded["datastoreType"], "AzureBlob");
//! assert_eq!(encoded["credentials"]["credentialsType"], "None");
//! ```

mod error;

pub use error::UnionError;

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

/// A variant whose discriminator value is not one of the family's known values.
///
/// `values` holds every field of the original object, discriminator included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawVariant {
    /// The discriminator value that was observed.
    pub discriminator: String,
    /// The original object.
    pub values: Map<String, Value>,
}

impl RawVariant {
    /// The object to encode, with `key` set to the observed discriminator.
    pub fn to_map(&self, key: &str) -> Map<String, Value> {
        let mut map = self.values.clone();
        map.insert(key.to_string(), Value::String(self.discriminator.clone()));
        map
    }
}

/// A closed family of variants selected by a string discriminator.
///
/// Implementations are normally generated by
/// [`discriminated_union!`](crate::discriminated_union).
pub trait UnionFamily: Sized {
    /// The family name, used in errors and logs.
    const NAME: &'static str;

    /// The JSON key holding the discriminator.
    const DISCRIMINATOR: &'static str;

    /// The known discriminator values, in matching priority order.
    fn known_values() -> &'static [&'static str];

    /// Decode `value` as the known variant named by `discriminator`.
    ///
    /// Returns `None` when the discriminator names no known variant.
    fn decode_known(discriminator: &str, value: &Value) -> Option<Result<Self, UnionError>>;

    /// Wrap an unrecognised variant.
    fn from_raw(raw: RawVariant) -> Self;

    /// Encode this value as a JSON object carrying the right discriminator.
    fn to_map(&self) -> Result<Map<String, Value>, UnionError>;

    /// The discriminator value for this variant.
    fn discriminator_value(&self) -> &str;

    /// Whether this value is the raw fallback variant.
    fn is_unknown(&self) -> bool;
}

/// Decode a family value from raw JSON bytes.
///
/// Empty input, `null`, and objects without a string discriminator all decode
/// to `Ok(None)`: there is no variant to pick, which is not an error.
pub fn unmarshal<F: UnionFamily>(raw: &[u8]) -> Result<Option<F>, UnionError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(raw).map_err(|source| UnionError::Malformed {
        family: F::NAME,
        source,
    })?;
    unmarshal_value(value)
}

/// Decode a family value from an already parsed JSON value.
pub fn unmarshal_value<F: UnionFamily>(value: Value) -> Result<Option<F>, UnionError> {
    let map = match value {
        Value::Null => return Ok(None),
        Value::Object(map) => map,
        other => {
            return Err(UnionError::NotAnObject {
                family: F::NAME,
                found: json_type_name(&other),
            })
        },
    };

    let Some(discriminator) = map
        .get(F::DISCRIMINATOR)
        .and_then(Value::as_str)
        .map(str::to_string)
    else {
        return Ok(None);
    };

    let value = Value::Object(map);
    if let Some(decoded) = F::decode_known(&discriminator, &value) {
        return decoded.map(Some);
    }

    debug!(
        family = F::NAME,
        discriminator = %discriminator,
        "unrecognised discriminator, keeping the raw variant"
    );
    let values = match value {
        Value::Object(values) => values,
        _ => Map::new(),
    };
    Ok(Some(F::from_raw(RawVariant {
        discriminator,
        values,
    })))
}

/// Encode a family value as JSON bytes.
pub fn marshal<F: UnionFamily>(value: &F) -> Result<Vec<u8>, UnionError> {
    let map = value.to_map()?;
    serde_json::to_vec(&map).map_err(|source| UnionError::Encode {
        family: F::NAME,
        variant: value.discriminator_value().to_string(),
        source,
    })
}

/// Encode a family value as a JSON value.
pub fn marshal_value<F: UnionFamily>(value: &F) -> Result<Value, UnionError> {
    value.to_map().map(Value::Object)
}

/// Decode the fields of one known variant.
pub fn decode_variant<V: DeserializeOwned>(
    family: &'static str,
    variant: &'static str,
    value: &Value,
) -> Result<V, UnionError> {
    V::deserialize(value).map_err(|source| UnionError::Decode {
        family,
        variant: variant.to_string(),
        source,
    })
}

/// Encode the fields of one known variant and force its discriminator.
///
/// The value is serialized, read back as a map, and the discriminator key is
/// overwritten with `variant` so the output is correct even if the struct
/// carried no (or a stale) discriminator.
pub fn encode_variant<V: Serialize>(
    family: &'static str,
    discriminator: &'static str,
    variant: &'static str,
    value: &V,
) -> Result<Map<String, Value>, UnionError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(mut map)) => {
            map.insert(
                discriminator.to_string(),
                Value::String(variant.to_string()),
            );
            Ok(map)
        },
        Ok(_) => Err(UnionError::EncodeNotObject {
            family,
            variant: variant.to_string(),
        }),
        Err(source) => Err(UnionError::Encode {
            family,
            variant: variant.to_string(),
            source,
        }),
    }
}

/// `Serialize` body shared by every generated family.
pub fn serialize_family<F: UnionFamily, S: Serializer>(
    value: &F,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    value.to_map().map_err(S::Error::custom)?.serialize(serializer)
}

/// `Deserialize` body shared by every generated family.
///
/// A required value has to name a variant, so a missing discriminator fails
/// here. Use [`optional`] for fields that may be absent.
pub fn deserialize_family<'de, F: UnionFamily, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<F, D::Error> {
    let value = Value::deserialize(deserializer)?;
    unmarshal_value::<F>(value)
        .map_err(D::Error::custom)?
        .ok_or_else(|| {
            D::Error::custom(UnionError::MissingDiscriminator {
                family: F::NAME,
                discriminator: F::DISCRIMINATOR,
            })
        })
}

/// Serde helpers for `Option<Family>` fields.
///
/// ```ignore
/// #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
/// pub credentials: Option<DatastoreCredentials>,
/// ```
pub mod optional {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::UnionFamily;

    /// Serialize an optional family value.
    pub fn serialize<F: UnionFamily, S: Serializer>(
        value: &Option<F>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize_family(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional family value; `null` or a missing discriminator
    /// yields `None`.
    pub fn deserialize<'de, F: UnionFamily, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<F>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            Some(value) => super::unmarshal_value(value).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Declare a discriminated-union family.
///
/// Each entry maps an enum variant to its discriminator value and the struct
/// holding its fields. An `Unknown(RawVariant)` variant is always appended.
///
/// ```
/// use azurerm_provider_sdk::discriminated_union;
/// use azurerm_provider_sdk::polymorphic::{unmarshal, UnionFamily};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// pub struct Circle {
///     pub radius: f64,
/// }
///
/// #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// pub struct Square {
///     pub side: f64,
/// }
///
/// discriminated_union! {
///     /// A shape.
///     pub enum Shape("shapeType") {
///         Circle("Circle") => Circle,
///         Square("Square") => Square,
///     }
/// }
///
/// let shape: Shape = unmarshal(br#"{"shapeType":"circle","radius":2.0}"#).unwrap().unwrap();
/// assert_eq!(shape, Shape::Circle(Circle { radius: 2.0 }));
/// assert_eq!(shape.discriminator_value(), "Circle");
/// ```
#[macro_export]
macro_rules! discriminated_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($discriminator:literal) {
            $( $(#[$variant_meta:meta])* $variant:ident($tag:literal) => $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($ty),
            )+
            /// A variant not known to this crate, kept verbatim.
            Unknown($crate::polymorphic::RawVariant),
        }

        impl $crate::polymorphic::UnionFamily for $name {
            const NAME: &'static str = ::std::stringify!($name);
            const DISCRIMINATOR: &'static str = $discriminator;

            fn known_values() -> &'static [&'static str] {
                &[ $( $tag ),+ ]
            }

            fn decode_known(
                discriminator: &str,
                value: &$crate::serde_json::Value,
            ) -> ::std::option::Option<
                ::std::result::Result<Self, $crate::polymorphic::UnionError>,
            > {
                $(
                    if discriminator.eq_ignore_ascii_case($tag) {
                        return ::std::option::Option::Some(
                            $crate::polymorphic::decode_variant::<$ty>(
                                <Self as $crate::polymorphic::UnionFamily>::NAME,
                                $tag,
                                value,
                            )
                            .map(Self::$variant),
                        );
                    }
                )+
                ::std::option::Option::None
            }

            fn from_raw(raw: $crate::polymorphic::RawVariant) -> Self {
                Self::Unknown(raw)
            }

            fn to_map(
                &self,
            ) -> ::std::result::Result<
                $crate::serde_json::Map<::std::string::String, $crate::serde_json::Value>,
                $crate::polymorphic::UnionError,
            > {
                match self {
                    $(
                        Self::$variant(value) => $crate::polymorphic::encode_variant(
                            <Self as $crate::polymorphic::UnionFamily>::NAME,
                            <Self as $crate::polymorphic::UnionFamily>::DISCRIMINATOR,
                            $tag,
                            value,
                        ),
                    )+
                    Self::Unknown(raw) => ::std::result::Result::Ok(
                        raw.to_map(<Self as $crate::polymorphic::UnionFamily>::DISCRIMINATOR),
                    ),
                }
            }

            fn discriminator_value(&self) -> &str {
                match self {
                    $( Self::$variant(_) => $tag, )+
                    Self::Unknown(raw) => &raw.discriminator,
                }
            }

            fn is_unknown(&self) -> bool {
                ::std::matches!(self, Self::Unknown(_))
            }
        }

        impl $crate::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::serde::Serializer,
            {
                $crate::polymorphic::serialize_family(self, serializer)
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                $crate::polymorphic::deserialize_family(deserializer)
            }
        }

        $(
            impl ::std::convert::From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Manual {}

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Automatic {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prediction_preference: Option<String>,
    }

    crate::discriminated_union! {
        /// Test family.
        enum Predictions("kind") {
            Automatic("Automatic") => Automatic,
            Manual("Manual") => Manual,
        }
    }

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::polymorphic::optional")]
        predictions: Option<Predictions>,
    }

    #[test]
    fn test_unmarshal_known_variant_case_insensitively() {
        let decoded: Predictions =
            unmarshal(br#"{"kind":"AUTOMATIC","predictionPreference":"Balanced","extra":1}"#)
                .unwrap()
                .unwrap();
        assert_eq!(
            decoded,
            Predictions::Automatic(Automatic {
                prediction_preference: Some("Balanced".to_string())
            })
        );
        assert_eq!(decoded.discriminator_value(), "Automatic");
        assert!(!decoded.is_unknown());
    }

    #[test]
    fn test_unmarshal_absent_inputs() {
        assert_eq!(unmarshal::<Predictions>(b"").unwrap(), None);
        assert_eq!(unmarshal::<Predictions>(b"null").unwrap(), None);
        assert_eq!(unmarshal::<Predictions>(br#"{"other":"x"}"#).unwrap(), None);
        assert_eq!(unmarshal::<Predictions>(br#"{"kind":42}"#).unwrap(), None);
    }

    #[test]
    fn test_unmarshal_unknown_variant() {
        let decoded: Predictions = unmarshal(br#"{"kind":"UnheardOf","xyz":123}"#)
            .unwrap()
            .unwrap();
        match &decoded {
            Predictions::Unknown(raw) => {
                assert_eq!(raw.discriminator, "UnheardOf");
                assert_eq!(Value::Object(raw.values.clone()), json!({"kind": "UnheardOf", "xyz": 123}));
            },
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(decoded.is_unknown());
        assert_eq!(
            marshal_value(&decoded).unwrap(),
            json!({"kind": "UnheardOf", "xyz": 123})
        );
    }

    #[test]
    fn test_unmarshal_errors() {
        let err = unmarshal::<Predictions>(b"{not json").unwrap_err();
        assert!(matches!(err, UnionError::Malformed { .. }));
        assert_eq!(err.family(), "Predictions");

        let err = unmarshal::<Predictions>(b"[1,2]").unwrap_err();
        assert!(matches!(err, UnionError::NotAnObject { found: "array", .. }));

        let err = unmarshal::<Predictions>(br#"{"kind":"Automatic","predictionPreference":7}"#)
            .unwrap_err();
        assert!(matches!(err, UnionError::Decode { .. }));
        assert_eq!(err.variant(), Some("Automatic"));
    }

    #[test]
    fn test_marshal_forces_discriminator() {
        let encoded = marshal(&Predictions::Manual(Manual::default())).unwrap();
        let value: Value = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(value, json!({"kind": "Manual"}));
    }

    #[test]
    fn test_encode_variant_overwrites_stale_discriminator() {
        let map = encode_variant("Predictions", "kind", "Manual", &json!({"kind": "Automatic"}))
            .unwrap();
        assert_eq!(map.get("kind"), Some(&json!("Manual")));

        let err = encode_variant("Predictions", "kind", "Manual", &"text").unwrap_err();
        assert!(matches!(err, UnionError::EncodeNotObject { .. }));
    }

    #[test]
    fn test_serde_integration() {
        let holder: Holder = serde_json::from_value(json!({"predictions": {"kind": "manual"}})).unwrap();
        assert_eq!(holder.predictions, Some(Predictions::Manual(Manual {})));
        assert_eq!(
            serde_json::to_value(&holder).unwrap(),
            json!({"predictions": {"kind": "Manual"}})
        );

        let holder: Holder = serde_json::from_value(json!({"predictions": {}})).unwrap();
        assert_eq!(holder.predictions, None);
        let holder: Holder = serde_json::from_value(json!({"predictions": null})).unwrap();
        assert_eq!(holder.predictions, None);
        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert_eq!(holder.predictions, None);
        assert_eq!(serde_json::to_value(&holder).unwrap(), json!({}));
    }

    #[test]
    fn test_required_value_needs_discriminator() {
        let err = serde_json::from_value::<Predictions>(json!({"predictionPreference": "x"}))
            .unwrap_err();
        assert!(err.to_string().contains("\"kind\" was missing"));
    }

    #[test]
    fn test_known_values_and_from() {
        assert_eq!(Predictions::known_values(), &["Automatic", "Manual"]);
        assert_eq!(Predictions::DISCRIMINATOR, "kind");
        let value: Predictions = Manual {}.into();
        assert_eq!(value.discriminator_value(), "Manual");
    }
}
