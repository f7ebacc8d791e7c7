//! Error types for minixsd
//!
//! Two kinds of failure live here. [`Error`] is the internal error enum that
//! fallible steps propagate with `?`. [`ValidationError`] is the positioned
//! diagnostic record that the parser, the schema builder and the validator
//! all hand back to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using the minixsd Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for minixsd operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed markup; carries the positioned diagnostic
    #[error("parse error: {0}")]
    Parse(ValidationError),

    /// Schema document could not be turned into definitions
    #[error("schema error: {0}")]
    Schema(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Tree to/from generic object conversion failed
    #[error("conversion error: {0}")]
    Convert(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stable diagnostic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Markup is not well formed
    ParseError,
    /// Schema document is not a usable schema
    SchemaError,
    /// Document root has no global element declaration
    ElementNotFound,
    /// Element name differs from its declaration
    ElementMismatch,
    /// A required attribute is absent
    MissingRequiredAttribute,
    /// An attribute is not declared by the element's type
    UnexpectedAttribute,
    /// A prohibited attribute is present
    ProhibitedAttribute,
    /// An attribute differs from its fixed value
    FixedValueViolation,
    /// An attribute value does not match its type
    InvalidAttributeValue,
    /// A simple-typed element contains child elements
    InvalidContent,
    /// Element text does not match its type
    InvalidElementValue,
    /// Fewer occurrences than minOccurs
    MinOccursViolation,
    /// More occurrences than maxOccurs
    MaxOccursViolation,
    /// Child element not allowed by the content model
    UnexpectedElement,
    /// Value shorter than minLength
    MinLengthViolation,
    /// Value longer than maxLength
    MaxLengthViolation,
    /// Value does not match a pattern facet
    PatternViolation,
    /// Value below minInclusive
    MinInclusiveViolation,
    /// Value above maxInclusive
    MaxInclusiveViolation,
}

impl ErrorCode {
    /// Get the code as its stable token
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::SchemaError => "SCHEMA_ERROR",
            ErrorCode::ElementNotFound => "ELEMENT_NOT_FOUND",
            ErrorCode::ElementMismatch => "ELEMENT_MISMATCH",
            ErrorCode::MissingRequiredAttribute => "MISSING_REQUIRED_ATTRIBUTE",
            ErrorCode::UnexpectedAttribute => "UNEXPECTED_ATTRIBUTE",
            ErrorCode::ProhibitedAttribute => "PROHIBITED_ATTRIBUTE",
            ErrorCode::FixedValueViolation => "FIXED_VALUE_VIOLATION",
            ErrorCode::InvalidAttributeValue => "INVALID_ATTRIBUTE_VALUE",
            ErrorCode::InvalidContent => "INVALID_CONTENT",
            ErrorCode::InvalidElementValue => "INVALID_ELEMENT_VALUE",
            ErrorCode::MinOccursViolation => "MIN_OCCURS_VIOLATION",
            ErrorCode::MaxOccursViolation => "MAX_OCCURS_VIOLATION",
            ErrorCode::UnexpectedElement => "UNEXPECTED_ELEMENT",
            ErrorCode::MinLengthViolation => "MIN_LENGTH_VIOLATION",
            ErrorCode::MaxLengthViolation => "MAX_LENGTH_VIOLATION",
            ErrorCode::PatternViolation => "PATTERN_VIOLATION",
            ErrorCode::MinInclusiveViolation => "MIN_INCLUSIVE_VIOLATION",
            ErrorCode::MaxInclusiveViolation => "MAX_INCLUSIVE_VIOLATION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positioned diagnostic shared by parsing, schema building and validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    /// Human-readable message
    pub message: String,
    /// Stable code
    pub code: ErrorCode,
}

impl ValidationError {
    /// Create a new diagnostic positioned at the start of the input
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            line: 1,
            column: 1,
            message: message.into(),
            code,
        }
    }

    /// Set the position
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line.max(1);
        self.column = column.max(1);
        self
    }

    /// Set the position from a node position
    pub fn at_position(self, position: crate::documents::Position) -> Self {
        self.at(position.line, position.column)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} [{}] {}",
            self.line, self.column, self.code, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Parse(err)
    }
}

/// Value produced by a fail-fast operation, together with its diagnostics
///
/// Parsing and schema building either yield a value with no diagnostics, or
/// no value and exactly one diagnostic.
#[derive(Debug, Clone)]
pub struct ParseOutcome<T> {
    /// Produced value, absent on failure
    pub value: Option<T>,
    /// Diagnostics
    pub errors: Vec<ValidationError>,
}

impl<T> ParseOutcome<T> {
    /// Create a successful outcome
    pub fn success(value: T) -> Self {
        Self {
            value: Some(value),
            errors: Vec::new(),
        }
    }

    /// Create a failed outcome carrying one diagnostic
    pub fn failure(error: ValidationError) -> Self {
        Self {
            value: None,
            errors: vec![error],
        }
    }

    /// Check whether a value was produced without diagnostics
    pub fn is_ok(&self) -> bool {
        self.value.is_some() && self.errors.is_empty()
    }

    /// Split into the value and the diagnostics
    pub fn into_parts(self) -> (Option<T>, Vec<ValidationError>) {
        (self.value, self.errors)
    }

    /// Convert into a `Result`, keeping the diagnostics as the error
    pub fn into_result(self) -> std::result::Result<T, Vec<ValidationError>> {
        match self.value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

impl<T> From<ParseOutcome<T>> for (Option<T>, Vec<ValidationError>) {
    fn from(outcome: ParseOutcome<T>) -> Self {
        outcome.into_parts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::PatternViolation, "Value 'x' does not match")
            .at(3, 14);

        let msg = format!("{}", err);
        assert_eq!(msg, "3:14 [PATTERN_VIOLATION] Value 'x' does not match");
    }

    #[test]
    fn test_position_is_clamped_to_one() {
        let err = ValidationError::new(ErrorCode::ParseError, "boom").at(0, 0);
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_code_serializes_as_token() {
        let err = ValidationError::new(ErrorCode::MinOccursViolation, "missing");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "MIN_OCCURS_VIOLATION");
        assert_eq!(json["line"], 1);
        assert_eq!(
            serde_json::to_value(ErrorCode::ElementNotFound).unwrap(),
            ErrorCode::ElementNotFound.as_str()
        );
    }

    #[test]
    fn test_parse_outcome() {
        let ok: ParseOutcome<u32> = ParseOutcome::success(7);
        assert!(ok.is_ok());
        assert_eq!(ok.into_result().unwrap(), 7);

        let failed: ParseOutcome<u32> =
            ParseOutcome::failure(ValidationError::new(ErrorCode::SchemaError, "bad"));
        let (value, errors) = failed.into_parts();
        assert!(value.is_none());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_io_and_json_errors_convert() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/minixsd/input.xml")?)
        }
        fn decode_garbage() -> Result<serde_json::Value> {
            Ok(serde_json::from_str("{not json")?)
        }

        let io = read_missing().unwrap_err();
        assert!(matches!(io, Error::Io(_)));
        assert!(io.to_string().starts_with("I/O error: "));
        assert!(matches!(decode_garbage(), Err(Error::Json(_))));
    }

    #[test]
    fn test_error_conversion() {
        let diag = ValidationError::new(ErrorCode::ParseError, "test");
        let err: Error = diag.into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
