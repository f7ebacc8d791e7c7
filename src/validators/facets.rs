//! XSD constraining facets
//!
//! This module implements the restriction facets a simple type or an
//! inline-typed element may carry. `enumeration` is kept in the model but is
//! not enforced; facet kinds outside the supported set are kept and ignored.

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::builtins::{
    XSD_ENUMERATION, XSD_MAX_INCLUSIVE, XSD_MAX_LENGTH, XSD_MIN_INCLUSIVE, XSD_MIN_LENGTH,
    XSD_PATTERN,
};
use crate::error::{Error, ErrorCode, Result, ValidationError};

/// Facet kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacetKind {
    /// Minimum length in characters
    MinLength,
    /// Maximum length in characters
    MaxLength,
    /// Regular expression the whole value must match
    Pattern,
    /// Allowed value (not enforced)
    Enumeration,
    /// Inclusive numeric lower bound
    MinInclusive,
    /// Inclusive numeric upper bound
    MaxInclusive,
    /// Any other restriction child; kept, never checked
    Other(String),
}

impl FacetKind {
    /// Parse from the restriction child's local name
    pub fn from_name(name: &str) -> Self {
        match name {
            XSD_MIN_LENGTH => FacetKind::MinLength,
            XSD_MAX_LENGTH => FacetKind::MaxLength,
            XSD_PATTERN => FacetKind::Pattern,
            XSD_ENUMERATION => FacetKind::Enumeration,
            XSD_MIN_INCLUSIVE => FacetKind::MinInclusive,
            XSD_MAX_INCLUSIVE => FacetKind::MaxInclusive,
            other => FacetKind::Other(other.to_string()),
        }
    }

    /// Get the facet name
    pub fn name(&self) -> &str {
        match self {
            FacetKind::MinLength => XSD_MIN_LENGTH,
            FacetKind::MaxLength => XSD_MAX_LENGTH,
            FacetKind::Pattern => XSD_PATTERN,
            FacetKind::Enumeration => XSD_ENUMERATION,
            FacetKind::MinInclusive => XSD_MIN_INCLUSIVE,
            FacetKind::MaxInclusive => XSD_MAX_INCLUSIVE,
            FacetKind::Other(name) => name,
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for FacetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A numeric value
///
/// Exact when the text fits a [`Decimal`]; larger magnitudes and longer
/// mantissas fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Exact decimal value
    Exact(Decimal),
    /// Approximate value beyond `Decimal` range or precision
    Float(f64),
}

impl Number {
    /// Get the value as a float
    pub fn to_f64(self) -> Option<f64> {
        match self {
            Number::Exact(d) => d.to_f64(),
            Number::Float(f) => Some(f),
        }
    }

    /// Get the value as a count, if it is an exact non-negative integer
    pub fn to_usize(self) -> Option<usize> {
        match self {
            Number::Exact(d) if d.fract().is_zero() => d.to_usize(),
            _ => None,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => a.partial_cmp(b),
            _ => self.to_f64()?.partial_cmp(&other.to_f64()?),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Exact(d) => write!(f, "{}", d),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Parse a numeric lexical value (plain or scientific notation)
pub fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map(Number::Exact)
        .ok()
        .or_else(|| {
            s.parse::<f64>()
                .ok()
                .filter(|f| !f.is_nan())
                .map(Number::Float)
        })
}

/// Facet value, numerically coerced when it looks like a number
#[derive(Debug, Clone, PartialEq)]
pub enum FacetValue {
    /// Numeric value
    Number(Number),
    /// Any other value
    Text(String),
}

impl FacetValue {
    /// Coerce a lexical value
    pub fn parse(lexical: &str) -> Self {
        match parse_number(lexical) {
            Some(n) => FacetValue::Number(n),
            None => FacetValue::Text(lexical.to_string()),
        }
    }

    /// Get the numeric value, if any
    pub fn as_number(&self) -> Option<Number> {
        match self {
            FacetValue::Number(n) => Some(*n),
            FacetValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Number(n) => write!(f, "{}", n),
            FacetValue::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for FacetValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FacetValue::Number(Number::Exact(n)) if n.fract().is_zero() => match n.to_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_str(&n.to_string()),
            },
            FacetValue::Number(n) => match n.to_f64() {
                Some(f) => serializer.serialize_f64(f),
                None => serializer.serialize_str(&n.to_string()),
            },
            FacetValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// One restriction facet
#[derive(Debug, Clone, Serialize)]
pub struct Facet {
    /// Facet kind
    pub kind: FacetKind,
    /// Coerced value
    pub value: FacetValue,
    /// Value as written in the schema
    #[serde(skip)]
    pub lexical: String,
    /// Compiled, anchored pattern
    #[serde(skip)]
    regex: Option<Regex>,
}

impl PartialEq for Facet {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value && self.lexical == other.lexical
    }
}

impl Facet {
    /// Build a facet from a restriction child's local name and `value` attribute
    pub fn new(kind_name: &str, lexical: &str) -> Result<Self> {
        let kind = FacetKind::from_name(kind_name);
        let value = FacetValue::parse(lexical);

        let regex = match kind {
            FacetKind::Pattern => {
                let anchored = format!("^(?:{})$", lexical);
                Some(Regex::new(&anchored).map_err(|e| {
                    Error::Schema(format!("Invalid pattern '{}': {}", lexical, e))
                })?)
            }
            FacetKind::MinLength | FacetKind::MaxLength => {
                if value.as_number().and_then(Number::to_usize).is_none() {
                    return Err(Error::Schema(format!(
                        "Facet {} requires a non-negative integer, got '{}'",
                        kind, lexical
                    )));
                }
                None
            }
            _ => None,
        };

        Ok(Self {
            kind,
            value,
            lexical: lexical.to_string(),
            regex,
        })
    }

    /// Check a value against this facet
    ///
    /// The returned diagnostic is unpositioned; callers place it on the node.
    pub fn validate(&self, value: &str) -> std::result::Result<(), ValidationError> {
        match &self.kind {
            FacetKind::MinLength => {
                let len = value.chars().count();
                let min = self.length_bound();
                if len < min {
                    return Err(ValidationError::new(
                        ErrorCode::MinLengthViolation,
                        format!("Value '{}' has length {}, minimum is {}", value, len, min),
                    ));
                }
            }
            FacetKind::MaxLength => {
                let len = value.chars().count();
                let max = self.length_bound();
                if len > max {
                    return Err(ValidationError::new(
                        ErrorCode::MaxLengthViolation,
                        format!("Value '{}' has length {}, maximum is {}", value, len, max),
                    ));
                }
            }
            FacetKind::Pattern => {
                if let Some(regex) = &self.regex {
                    if !regex.is_match(value) {
                        return Err(ValidationError::new(
                            ErrorCode::PatternViolation,
                            format!("Value '{}' does not match pattern '{}'", value, self.lexical),
                        ));
                    }
                }
            }
            FacetKind::MinInclusive => {
                if let (Some(bound), Some(actual)) = (self.value.as_number(), parse_number(value)) {
                    if actual < bound {
                        return Err(ValidationError::new(
                            ErrorCode::MinInclusiveViolation,
                            format!("Value {} is less than minInclusive {}", actual, bound),
                        ));
                    }
                }
            }
            FacetKind::MaxInclusive => {
                if let (Some(bound), Some(actual)) = (self.value.as_number(), parse_number(value)) {
                    if actual > bound {
                        return Err(ValidationError::new(
                            ErrorCode::MaxInclusiveViolation,
                            format!("Value {} is greater than maxInclusive {}", actual, bound),
                        ));
                    }
                }
            }
            FacetKind::Enumeration | FacetKind::Other(_) => {}
        }
        Ok(())
    }

    fn length_bound(&self) -> usize {
        self.value
            .as_number()
            .and_then(|n| n.to_usize())
            .unwrap_or(0)
    }
}
