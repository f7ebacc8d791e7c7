//! # minixsd
//!
//! A small XML parser and XML Schema (XSD 1.0 subset) validator that reports
//! every problem as a positioned diagnostic with a stable code.
//!
//! ## Features
//!
//! - Hand-written, stack-based parser with line and column tracking
//! - Schema builder for global elements, named complex and simple types
//! - Validation of attributes, occurrence bounds, built-in types and facets
//! - JSON conversion of document trees
//! - Protection against oversized or deeply nested input
//!
//! ## Example
//!
//! ```rust
//! use minixsd::{compile_validator, parse_document, parse_schema_document};
//!
//! let schema = parse_schema_document(
//!     r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
//!          <xs:element name="year" type="xs:int"/>
//!        </xs:schema>"#,
//! )
//! .into_result()
//! .unwrap();
//!
//! let document = parse_document("<year>soon</year>").into_result().unwrap();
//! let errors = compile_validator(schema).validate(&document);
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].code.as_str(), "INVALID_ELEMENT_VALUE");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Names and documents
pub mod documents;
pub mod names;
pub mod namespaces;
pub mod parser;

// Schemas and validation
pub mod validators;

// Data conversion
pub mod converters;

// Re-exports for convenience
pub use documents::{Node, Position};
pub use error::{Error, ErrorCode, ParseOutcome, Result, ValidationError};
pub use limits::Limits;
pub use parser::XmlParser;
pub use validators::{Schema, SchemaBuilder, SchemaValidator};

/// Version of the minixsd library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = validators::XSD_NAMESPACE;

/// XML Schema Instance namespace
pub const XSI_NAMESPACE: &str = validators::XSI_NAMESPACE;

/// Parse document text with default limits
pub fn parse_document(text: &str) -> ParseOutcome<Node> {
    XmlParser::new().parse(text)
}

/// Parse and build a schema with default limits
pub fn parse_schema_document(text: &str) -> ParseOutcome<Schema> {
    validators::parse_schema(text)
}

/// Build a validator for a schema
pub fn compile_validator(schema: Schema) -> SchemaValidator {
    SchemaValidator::new(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_facade_round() {
        let schema = parse_schema_document(r#"<schema><element name="a" type="int"/></schema>"#)
            .into_result()
            .unwrap();
        let validator = compile_validator(schema);

        let doc = parse_document("<a>12</a>").into_result().unwrap();
        assert!(validator.is_valid(&doc));

        let doc = parse_document("<a>twelve</a>").into_result().unwrap();
        assert_eq!(validator.validate(&doc)[0].code, ErrorCode::InvalidElementValue);

        let errors = parse_schema_document("<schema><element/></schema>").errors;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::SchemaError);
    }
}
