//! Re-casing of Resource IDs returned by the API.
//!
//! The API does not always return IDs with the casing they were created with
//! (`resourcegroups` instead of `resourceGroups`, for example). A [`Recaser`]
//! holds the shapes of every known ID type and rewrites an observed ID into
//! canonical form. It is built once with [`RecaserBuilder`] and then only read,
//! so it can be shared freely between threads.

use tracing::trace;

use super::parser::{format_segments, Parser};
use super::segment::Segment;
use super::ResourceId;

/// Keys re-cased when an ID matches no registered shape.
const WELL_KNOWN_KEYS: &[&str] = &["subscriptions", "resourceGroups", "providers"];

#[derive(Debug, Clone)]
struct Shape {
    parser: Parser,
    single_token_segments: usize,
    fixed_segments: usize,
}

/// Builds an immutable [`Recaser`].
#[derive(Debug, Default)]
pub struct RecaserBuilder {
    shapes: Vec<Shape>,
}

impl RecaserBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the ID type `T`.
    pub fn register<T: ResourceId>(self) -> Self {
        self.register_segments(T::DESCRIPTION, T::segments())
    }

    /// Register an ID shape described directly by its segments.
    pub fn register_segments(mut self, description: &'static str, segments: Vec<Segment>) -> Self {
        let single_token_segments = segments.iter().filter(|s| s.is_single_token()).count();
        let fixed_segments = segments.iter().filter(|s| s.is_fixed()).count();
        self.shapes.push(Shape {
            parser: Parser::new(description, segments),
            single_token_segments,
            fixed_segments,
        });
        self
    }

    /// Finish building.
    pub fn build(self) -> Recaser {
        Recaser {
            shapes: self.shapes,
        }
    }
}

/// An immutable registry of ID shapes used to re-case IDs.
#[derive(Debug, Clone)]
pub struct Recaser {
    shapes: Vec<Shape>,
}

impl Recaser {
    /// Start building a registry.
    pub fn builder() -> RecaserBuilder {
        RecaserBuilder::new()
    }

    /// The number of registered shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether no shapes are registered.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Rewrite `input` into canonical casing.
    ///
    /// The input is parsed case-insensitively against every registered shape.
    /// The most specific match wins (the one with the most single-token
    /// segments; ties go to the shape registered first). Shapes without fixed
    /// segments, such as a bare scope, say nothing about casing and are
    /// skipped. User-specified values are never changed. When nothing matches
    /// only the well-known keys `subscriptions`, `resourceGroups` and
    /// `providers` are re-cased.
    pub fn recase(&self, input: &str) -> String {
        let mut best: Option<(&Shape, String)> = None;
        for shape in self.shapes.iter().filter(|shape| shape.fixed_segments > 0) {
            let Ok(result) = shape.parser.parse(input, true) else {
                continue;
            };
            if best
                .as_ref()
                .is_some_and(|(b, _)| b.single_token_segments >= shape.single_token_segments)
            {
                continue;
            }
            let segments = shape.parser.segments();
            let values: Vec<&str> = segments
                .iter()
                .filter(|segment| segment.is_user_value())
                .map(|segment| result.get(segment.name).unwrap_or_default())
                .collect();
            best = Some((shape, format_segments(segments, &values)));
        }

        match best {
            Some((shape, recased)) => {
                trace!(id_type = shape.parser.description(), "re-cased resource id");
                recased
            },
            None => recase_well_known_keys(input),
        }
    }
}

fn recase_well_known_keys(input: &str) -> String {
    input
        .split('/')
        .map(|token| {
            WELL_KNOWN_KEYS
                .iter()
                .find(|key| key.eq_ignore_ascii_case(token))
                .copied()
                .unwrap_or(token)
        })
        .collect::<Vec<_>>()
        .join("/")
}
