//! Segment-driven parsing and formatting of Resource IDs.

use std::collections::BTreeMap;

use super::error::ParseError;
use super::segment::{Segment, SegmentType};

/// The values parsed out of a Resource ID, keyed by segment name.
///
/// Fixed segments hold their canonical literal, user-specified segments hold
/// the value exactly as it appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// The ID type that was parsed.
    pub description: &'static str,
    /// The original input.
    pub raw_input: String,
    /// Segment name to value.
    pub parsed: BTreeMap<&'static str, String>,
}

impl ParseResult {
    /// The value of the segment named `name`, if it was parsed.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parsed.get(name).map(String::as_str)
    }

    /// The value of a segment that the ID type requires.
    pub fn require(&self, segment: &Segment) -> Result<&str, ParseError> {
        match self.get(segment.name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ParseError::SegmentNotSpecified {
                description: self.description,
                segment: segment.name,
                example: segment.example_value,
                input: self.raw_input.clone(),
                parsed: self.parsed.clone(),
            }),
        }
    }
}

/// Parses input strings against an ordered list of segments.
#[derive(Debug, Clone)]
pub struct Parser {
    description: &'static str,
    segments: Vec<Segment>,
}

impl Parser {
    /// Create a parser for the ID type `description` made up of `segments`.
    pub fn new(description: &'static str, segments: Vec<Segment>) -> Self {
        Self {
            description,
            segments,
        }
    }

    /// The ID type this parser describes.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// The segments this parser walks.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parse `input`.
    ///
    /// When `insensitively` is true fixed and constant segments are matched
    /// ignoring case and the result holds their canonical casing. This is only
    /// meant for IDs returned by the API, never for user input.
    pub fn parse(&self, input: &str, insensitively: bool) -> Result<ParseResult, ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyInput {
                description: self.description,
            });
        }

        let tokens: Vec<&str> = input
            .strip_prefix('/')
            .unwrap_or(input)
            .split('/')
            .collect();
        let mut parsed = BTreeMap::new();
        let mut position = 0;

        for (index, segment) in self.segments.iter().enumerate() {
            match segment.segment_type {
                SegmentType::Scope => {
                    let trailing = self.segments[index + 1..].len();
                    let end = tokens.len().saturating_sub(trailing);
                    let scope = tokens.get(position..end).unwrap_or_default();
                    if scope.is_empty() || scope.iter().any(|t| t.is_empty()) {
                        return Err(self.not_specified(segment, input, parsed));
                    }
                    parsed.insert(segment.name, format!("/{}", scope.join("/")));
                    position = end;
                },
                _ => {
                    let token = match tokens.get(position) {
                        Some(token) if !token.is_empty() => *token,
                        _ => return Err(self.not_specified(segment, input, parsed)),
                    };
                    let value = self.match_token(segment, token, input, insensitively)?;
                    parsed.insert(segment.name, value);
                    position += 1;
                },
            }
        }

        if let Some(token) = tokens.get(position) {
            return Err(ParseError::UnexpectedSegmentCount {
                description: self.description,
                expected: position,
                actual: tokens.len(),
                token: token.to_string(),
                after: self.segments.last().map(|s| s.name).unwrap_or_default(),
                input: input.to_string(),
            });
        }

        Ok(ParseResult {
            description: self.description,
            raw_input: input.to_string(),
            parsed,
        })
    }

    fn match_token(
        &self,
        segment: &Segment,
        token: &str,
        input: &str,
        insensitively: bool,
    ) -> Result<String, ParseError> {
        let matches = |candidate: &str| {
            if insensitively {
                candidate.eq_ignore_ascii_case(token)
            } else {
                candidate == token
            }
        };

        let accepted: &[&'static str] = match segment.segment_type {
            SegmentType::Constant => segment.possible_values,
            _ if segment.is_fixed() => segment.fixed_value.as_slice(),
            _ => return Ok(token.to_string()),
        };

        match accepted.iter().find(|&&candidate| matches(candidate)) {
            Some(canonical) => Ok(canonical.to_string()),
            None => Err(ParseError::SegmentMismatch {
                description: self.description,
                segment: segment.name,
                expected: accepted.join(" or "),
                actual: token.to_string(),
                input: input.to_string(),
            }),
        }
    }

    fn not_specified(
        &self,
        segment: &Segment,
        input: &str,
        parsed: BTreeMap<&'static str, String>,
    ) -> ParseError {
        ParseError::SegmentNotSpecified {
            description: self.description,
            segment: segment.name,
            example: segment.example_value,
            input: input.to_string(),
            parsed,
        }
    }
}

/// Render the canonical form of an ID from its segments and the user-specified
/// values, in segment order.
///
/// `values` holds one entry per non-fixed segment.
pub fn format_segments(segments: &[Segment], values: &[&str]) -> String {
    let mut values = values.iter();
    let mut out = String::new();
    for segment in segments {
        let value = match segment.fixed_value {
            Some(fixed) if segment.is_fixed() => fixed,
            _ => values.next().copied().unwrap_or_default(),
        };
        out.push('/');
        out.push_str(match segment.segment_type {
            SegmentType::Scope => value.trim_start_matches('/'),
            _ => value,
        });
    }
    out
}
