//! Configuration validation helpers.
//!
//! Validates a `serde_json::Value` against a [`Schema`], running each
//! attribute's [`ValidateFunc`](crate::schema::ValidateFunc) once its type is
//! known to be correct. This is where Resource ID validation surfaces to users.
//!
//! # Example
//!
//! ```
//! use azurerm_provider_sdk::schema::{Attribute, Schema};
//! use azurerm_provider_sdk::services::powerbi::CapacityId;
//! use azurerm_provider_sdk::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("capacity_id", Attribute::resource_id::<CapacityId>())
//!     .with_attribute("sku", Attribute::optional_string());
//!
//! let input = json!({
//!     "capacity_id": "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resGroup1/providers/Microsoft.PowerBIDedicated/capacities/capacity1",
//! });
//! assert!(validate(&schema, &input).is_empty());
//!
//! let input = json!({
//!     "capacity_id": "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resGroup1",
//! });
//! let diagnostics = validate(&schema, &input);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute, Some("capacity_id".to_string()));
//! ```

use serde_json::Value;
use tracing::debug;

use crate::schema::{Attribute, AttributeType, Diagnostic, Schema};

/// Validate a JSON value against a schema.
///
/// Returns a list of diagnostics; an empty list means the value is valid.
///
/// # Validation Rules
///
/// - Required attributes must be present and non-null
/// - Computed-only attributes are skipped
/// - Attribute types must match the schema
/// - Validators run only on values of the right type, and their warnings are
///   reported as warning diagnostics
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let Some(obj) = value.as_object() else {
        diagnostics.push(
            Diagnostic::error("Expected object").with_detail(format!("Got {}", value_type_name(value))),
        );
        return diagnostics;
    };

    for (name, attr) in &schema.attributes {
        validate_attribute(attr, obj.get(name), name, &mut diagnostics);
    }

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        debug!(errors, "configuration failed validation");
    }
    diagnostics
}

/// Validate a JSON value against a schema, returning the error diagnostics on
/// failure. Warnings alone don't fail validation.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let errors: Vec<Diagnostic> = validate(schema, value)
        .into_iter()
        .filter(Diagnostic::is_error)
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check if a JSON value is valid against a schema.
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate_result(schema, value).is_ok()
}

fn validate_attribute(
    attr: &Attribute,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if attr.flags.computed && !attr.flags.optional && !attr.flags.required {
        return;
    }

    let value = match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
            return;
        },
        Some(v) => v,
    };

    let before = diagnostics.len();
    validate_attribute_type(&attr.attr_type, value, path, diagnostics);
    if diagnostics.len() > before {
        return;
    }

    if let Some(validate_func) = attr.validate_func {
        let (warnings, errors) = validate_func(value, path);
        diagnostics.extend(
            warnings
                .into_iter()
                .map(|warning| Diagnostic::warning(warning).with_attribute(path)),
        );
        diagnostics.extend(errors.into_iter().map(|err| {
            Diagnostic::error(format!("Invalid value for attribute '{}'", path))
                .with_detail(err.message())
                .with_attribute(path)
        }));
    }
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String if !value.is_string() => {
            diagnostics.push(type_error(path, "string", value));
        },
        AttributeType::Int64 if !is_int64(value) => {
            diagnostics.push(type_error(path, "int64", value));
        },
        AttributeType::Bool if !value.is_boolean() => {
            diagnostics.push(type_error(path, "bool", value));
        },
        AttributeType::List(element_type) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}.{}", path, i);
                    validate_attribute_type(element_type, item, &item_path, diagnostics);
                }
            },
            None => diagnostics.push(type_error(path, "list", value)),
        },
        AttributeType::Map(value_type) => match value.as_object() {
            Some(entries) => {
                for (key, entry) in entries {
                    let entry_path = format!("{}.{}", path, key);
                    validate_attribute_type(value_type, entry, &entry_path, diagnostics);
                }
            },
            None => diagnostics.push(type_error(path, "map", value)),
        },
        _ => {},
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_int64(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() => true,
        Value::Number(n) => n
            .as_f64()
            .is_some_and(|f| f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64),
        _ => false,
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for attribute '{}'", path))
        .with_detail(format!("Expected {}, got {}", expected, value_type_name(got)))
        .with_attribute(path)
}
