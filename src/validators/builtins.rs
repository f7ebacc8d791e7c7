//! XSD built-in types
//!
//! The recognized primitive type keywords and their lexical patterns. Any
//! keyword outside this closed set is not a built-in type; callers treat such
//! references as always valid.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::names::local_name;

// =============================================================================
// Type Names
// =============================================================================

/// XSD string type name
pub const XSD_STRING: &str = "string";
/// XSD int type name
pub const XSD_INT: &str = "int";
/// XSD integer type name
pub const XSD_INTEGER: &str = "integer";
/// XSD decimal type name
pub const XSD_DECIMAL: &str = "decimal";
/// XSD float type name
pub const XSD_FLOAT: &str = "float";
/// XSD double type name
pub const XSD_DOUBLE: &str = "double";
/// XSD boolean type name
pub const XSD_BOOLEAN: &str = "boolean";
/// XSD date type name
pub const XSD_DATE: &str = "date";
/// XSD dateTime type name
pub const XSD_DATETIME: &str = "dateTime";
/// XSD time type name
pub const XSD_TIME: &str = "time";

// =============================================================================
// Facet Names
// =============================================================================

/// XSD minLength facet name
pub const XSD_MIN_LENGTH: &str = "minLength";
/// XSD maxLength facet name
pub const XSD_MAX_LENGTH: &str = "maxLength";
/// XSD pattern facet name
pub const XSD_PATTERN: &str = "pattern";
/// XSD enumeration facet name
pub const XSD_ENUMERATION: &str = "enumeration";
/// XSD minInclusive facet name
pub const XSD_MIN_INCLUSIVE: &str = "minInclusive";
/// XSD maxInclusive facet name
pub const XSD_MAX_INCLUSIVE: &str = "maxInclusive";

// =============================================================================
// Lexical Patterns
// =============================================================================

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?([0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap());

static BOOLEAN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(true|false|1|0)$").unwrap());

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

static DATETIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}",
        r"T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})?$"
    ))
    .unwrap()
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})?$").unwrap()
});

/// A recognized built-in type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// xs:string
    String,
    /// xs:int
    Int,
    /// xs:integer
    Integer,
    /// xs:decimal
    Decimal,
    /// xs:float
    Float,
    /// xs:double
    Double,
    /// xs:boolean
    Boolean,
    /// xs:date
    Date,
    /// xs:dateTime
    DateTime,
    /// xs:time
    Time,
}

impl BuiltinType {
    /// All recognized built-in types
    pub const ALL: [BuiltinType; 10] = [
        BuiltinType::String,
        BuiltinType::Int,
        BuiltinType::Integer,
        BuiltinType::Decimal,
        BuiltinType::Float,
        BuiltinType::Double,
        BuiltinType::Boolean,
        BuiltinType::Date,
        BuiltinType::DateTime,
        BuiltinType::Time,
    ];

    /// Look up a type keyword, ignoring any namespace prefix (`xs:int` is `int`)
    pub fn from_name(name: &str) -> Option<Self> {
        let local = local_name(name);
        Self::ALL.into_iter().find(|t| t.name() == local)
    }

    /// Get the type keyword
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::String => XSD_STRING,
            BuiltinType::Int => XSD_INT,
            BuiltinType::Integer => XSD_INTEGER,
            BuiltinType::Decimal => XSD_DECIMAL,
            BuiltinType::Float => XSD_FLOAT,
            BuiltinType::Double => XSD_DOUBLE,
            BuiltinType::Boolean => XSD_BOOLEAN,
            BuiltinType::Date => XSD_DATE,
            BuiltinType::DateTime => XSD_DATETIME,
            BuiltinType::Time => XSD_TIME,
        }
    }

    /// Check a lexical value against the type's pattern
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            BuiltinType::String => true,
            BuiltinType::Int | BuiltinType::Integer => INTEGER_PATTERN.is_match(value),
            BuiltinType::Decimal | BuiltinType::Float | BuiltinType::Double => {
                DECIMAL_PATTERN.is_match(value)
            }
            BuiltinType::Boolean => BOOLEAN_PATTERN.is_match(value),
            BuiltinType::Date => DATE_PATTERN.is_match(value),
            BuiltinType::DateTime => DATETIME_PATTERN.is_match(value),
            BuiltinType::Time => TIME_PATTERN.is_match(value),
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check a value against a type keyword; unrecognized keywords accept anything
pub fn is_valid_lexical(type_name: &str, value: &str) -> bool {
    match BuiltinType::from_name(type_name) {
        Some(builtin) => builtin.is_valid(value),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(BuiltinType::from_name("xs:int"), Some(BuiltinType::Int));
        assert_eq!(BuiltinType::from_name("dateTime"), Some(BuiltinType::DateTime));
        assert_eq!(BuiltinType::from_name("xsd:string"), Some(BuiltinType::String));
        assert_eq!(BuiltinType::from_name("bookType"), None);
        assert_eq!(BuiltinType::from_name("long"), None);
    }

    #[test]
    fn test_integer_types() {
        for t in [BuiltinType::Int, BuiltinType::Integer] {
            assert!(t.is_valid("42"));
            assert!(t.is_valid("-7"));
            assert!(!t.is_valid("+7"));
            assert!(!t.is_valid("4.2"));
            assert!(!t.is_valid(""));
        }
    }

    #[test]
    fn test_decimal_types() {
        for t in [BuiltinType::Decimal, BuiltinType::Float, BuiltinType::Double] {
            assert!(t.is_valid("3.14"));
            assert!(t.is_valid("-0.5"));
            assert!(t.is_valid(".5"));
            assert!(t.is_valid("10"));
            assert!(t.is_valid("10."));
            assert!(!t.is_valid("."));
            assert!(!t.is_valid("-"));
            assert!(!t.is_valid("1e5"));
            assert!(!t.is_valid("abc"));
        }
    }

    #[test]
    fn test_boolean() {
        for v in ["true", "false", "1", "0"] {
            assert!(BuiltinType::Boolean.is_valid(v));
        }
        assert!(!BuiltinType::Boolean.is_valid("yes"));
        assert!(!BuiltinType::Boolean.is_valid("TRUE"));
    }

    #[test]
    fn test_date_and_time() {
        assert!(BuiltinType::Date.is_valid("2024-01-31"));
        assert!(!BuiltinType::Date.is_valid("2024-1-31"));

        assert!(BuiltinType::DateTime.is_valid("2024-01-31T12:30:00"));
        assert!(BuiltinType::DateTime.is_valid("2024-01-31T12:30:00.250Z"));
        assert!(BuiltinType::DateTime.is_valid("2024-01-31T12:30:00+02:00"));
        assert!(!BuiltinType::DateTime.is_valid("2024-01-31 12:30:00"));

        assert!(BuiltinType::Time.is_valid("23:59:59"));
        assert!(BuiltinType::Time.is_valid("23:59:59.5-05:00"));
        assert!(!BuiltinType::Time.is_valid("23:59"));
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        // Arabic-Indic and fullwidth digits
        for t in [BuiltinType::Int, BuiltinType::Integer, BuiltinType::Decimal] {
            assert!(!t.is_valid("\u{661}\u{662}\u{663}"));
            assert!(!t.is_valid("\u{ff11}\u{ff12}"));
        }
        assert!(!BuiltinType::Date.is_valid("\u{662}\u{660}\u{662}\u{664}-01-31"));
        assert!(!BuiltinType::DateTime.is_valid("2024-01-31T\u{661}\u{662}:30:00"));
        assert!(!BuiltinType::Time.is_valid("23:59:\u{665}\u{669}"));
    }

    #[test]
    fn test_unknown_types_accept_anything() {
        assert!(is_valid_lexical("xs:anyURI", "not a uri at all"));
        assert!(is_valid_lexical("string", ""));
        assert!(!is_valid_lexical("xs:boolean", "maybe"));
    }
}
