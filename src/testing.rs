//! Assertion helpers for Resource ID types, union families and schemas.
//!
//! These check the laws every ID type and family is expected to follow, so a
//! new type can be covered with a couple of lines.
//!
//! # Example
//!
//! ```
//! use azurerm_provider_sdk::services::powerbi::CapacityId;
//! use azurerm_provider_sdk::testing::{assert_parse_fails_at, assert_round_trip};
//!
//! assert_round_trip(&CapacityId::new("sub1", "rg1", "capacity1"));
//! assert_parse_fails_at::<CapacityId>(
//!     "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.PowerBIDedicated/capacities/",
//!     "capacityName",
//! );
//! ```

use std::fmt::Debug;

use serde_json::Value;

use crate::polymorphic::{marshal, marshal_value, unmarshal, UnionFamily};
use crate::resourceids::{ParseError, ParseErrorKind, ResourceId, SegmentType};
use crate::schema::{Diagnostic, Schema};
use crate::validation::validate;

// =========================================================================
// Resource IDs
// =========================================================================

/// Assert that formatting `id` and parsing it back, in either mode, yields `id`.
///
/// # Panics
///
/// Panics if the canonical form doesn't parse or parses to a different value.
pub fn assert_round_trip<T: ResourceId + PartialEq + Debug>(id: &T) {
    let formatted = id.id();
    match T::parse(&formatted) {
        Ok(parsed) => assert_eq!(&parsed, id, "{formatted:?} parsed to a different ID"),
        Err(err) => panic!("Expected {formatted:?} to parse, but got: {err}"),
    }
    match T::parse_insensitively(&formatted) {
        Ok(parsed) => assert_eq!(&parsed, id, "{formatted:?} parsed insensitively to a different ID"),
        Err(err) => panic!("Expected {formatted:?} to parse insensitively, but got: {err}"),
    }
}

/// Assert that parsing `input` fails, naming `segment`.
///
/// Returns the error for further checks.
///
/// # Panics
///
/// Panics if `input` parses, or the error names another segment.
pub fn assert_parse_fails_at<T: ResourceId + Debug>(input: &str, segment: &str) -> ParseError {
    let err = match T::parse(input) {
        Ok(id) => panic!("Expected {input:?} to be rejected, but it parsed to {id:?}"),
        Err(err) => err,
    };
    assert_eq!(
        err.segment(),
        Some(segment),
        "Expected the error to name {segment:?}, but got: {err}"
    );
    err
}

/// Assert that re-casing the fixed segments of `input` to upper and lower case
/// still parses insensitively to the same ID, with user values untouched.
///
/// # Panics
///
/// Panics if `input` doesn't parse, or a re-cased variant parses differently.
pub fn assert_insensitive_parse_matches<T: ResourceId + PartialEq + Debug>(input: &str) {
    let expected = match T::parse(input) {
        Ok(id) => id,
        Err(err) => panic!("Expected {input:?} to parse, but got: {err}"),
    };

    for recase in [str::to_uppercase, str::to_lowercase] {
        let variant = recase_fixed_segments(&expected, recase);
        match T::parse_insensitively(&variant) {
            Ok(parsed) => {
                assert_eq!(parsed, expected, "{variant:?} parsed insensitively to a different ID");
                assert_eq!(parsed.id(), expected.id());
            },
            Err(err) => panic!("Expected {variant:?} to parse insensitively, but got: {err}"),
        }
    }
}

fn recase_fixed_segments<T: ResourceId>(id: &T, recase: fn(&str) -> String) -> String {
    let mut values = id.values().into_iter();
    let mut out = String::new();
    for segment in T::segments() {
        out.push('/');
        match segment.fixed_value {
            Some(fixed) if segment.is_fixed() => out.push_str(&recase(fixed)),
            _ => out.push_str(values.next().unwrap_or_default().trim_start_matches('/')),
        }
    }
    out
}

/// Assert that every prefix of `input` cut at a segment boundary is rejected,
/// and that the error names the first missing segment.
///
/// # Panics
///
/// Panics if the empty string or any truncation parses.
pub fn assert_truncations_rejected<T: ResourceId + Debug>(input: &str) {
    let empty = T::parse("").err();
    assert_eq!(
        empty.as_ref().map(ParseError::kind),
        Some(ParseErrorKind::EmptyInput),
        "Expected the empty string to be rejected"
    );

    let segments = T::segments();
    let names_first_missing = segments
        .iter()
        .all(|segment| segment.segment_type != SegmentType::Scope);
    let tokens: Vec<&str> = input.trim_start_matches('/').split('/').collect();

    for end in 1..tokens.len() {
        let truncated = format!("/{}", tokens[..end].join("/"));
        let err = match T::parse(&truncated) {
            Ok(id) => panic!("Expected {truncated:?} to be rejected, but it parsed to {id:?}"),
            Err(err) => err,
        };
        if names_first_missing {
            assert_eq!(
                err.segment(),
                segments.get(end).map(|segment| segment.name),
                "Expected {truncated:?} to be rejected at the first missing segment, but got: {err}"
            );
        }
    }
}

// =========================================================================
// Union Families
// =========================================================================

/// Assert that encoding `value` and decoding the bytes yields `value`.
///
/// # Panics
///
/// Panics if encoding or decoding fails, or the decoded value differs.
pub fn assert_union_round_trip<F: UnionFamily + PartialEq + Debug>(value: &F) {
    let encoded = match marshal(value) {
        Ok(encoded) => encoded,
        Err(err) => panic!("Expected {value:?} to encode, but got: {err}"),
    };
    match unmarshal::<F>(&encoded) {
        Ok(Some(decoded)) => assert_eq!(&decoded, value, "{} decoded to a different value", String::from_utf8_lossy(&encoded)),
        Ok(None) => panic!("Expected {} to decode to a {}, but got nothing", String::from_utf8_lossy(&encoded), F::NAME),
        Err(err) => panic!("Expected {} to decode, but got: {err}", String::from_utf8_lossy(&encoded)),
    }
}

/// Assert that `value` encodes with `expected` as its discriminator.
///
/// Returns the encoded JSON for further checks.
///
/// # Panics
///
/// Panics if encoding fails or the discriminator differs.
pub fn assert_discriminator<F: UnionFamily + Debug>(value: &F, expected: &str) -> Value {
    let encoded = match marshal_value(value) {
        Ok(encoded) => encoded,
        Err(err) => panic!("Expected {value:?} to encode, but got: {err}"),
    };
    assert_eq!(
        encoded.get(F::DISCRIMINATOR).and_then(Value::as_str),
        Some(expected),
        "Expected {} to be {expected:?} in {encoded}",
        F::DISCRIMINATOR
    );
    encoded
}

// =========================================================================
// Schemas
// =========================================================================

/// Assert that `value` validates against `schema` without errors.
///
/// # Panics
///
/// Panics with every error diagnostic if validation fails.
pub fn assert_valid(schema: &Schema, value: &Value) {
    let errors: Vec<Diagnostic> = validate(schema, value)
        .into_iter()
        .filter(Diagnostic::is_error)
        .collect();
    assert!(errors.is_empty(), "{}", format_diagnostics(&errors));
}

/// Assert that validating `value` reports an error for `attribute`.
///
/// Returns the errors for that attribute.
///
/// # Panics
///
/// Panics if no error diagnostic names `attribute`.
pub fn assert_invalid_at(schema: &Schema, value: &Value, attribute: &str) -> Vec<Diagnostic> {
    let diagnostics = validate(schema, value);
    let matching: Vec<Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.is_error() && d.attribute.as_deref() == Some(attribute))
        .cloned()
        .collect();
    assert!(
        !matching.is_empty(),
        "Expected an error for '{}', but got {} diagnostic(s):\n{}",
        attribute,
        diagnostics.len(),
        format_diagnostics(&diagnostics)
    );
    matching
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diag in diagnostics {
        out.push_str(&format!("  [{:?}] {}", diag.severity, diag.summary));
        if let Some(detail) = &diag.detail {
            out.push_str(": ");
            out.push_str(detail);
        }
        if let Some(attr) = &diag.attribute {
            out.push_str(&format!(" (at {attr})"));
        }
        out.push('\n');
    }
    out
}
