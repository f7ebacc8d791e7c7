//! XML Schema validators
//!
//! This module contains the schema model, the schema builder and the
//! document validator.

// Type system
pub mod builtins;
pub mod facets;

// Schema model and construction
pub mod builders;
pub mod schemas;

// Document validation
pub mod document_validation;
pub mod validation;

// Re-exports
pub use builders::{parse_schema, SchemaBuilder};
pub use builtins::{is_valid_lexical, BuiltinType};
pub use document_validation::{validate_document, validate_element, SchemaValidator};
pub use facets::{Facet, FacetKind, FacetValue, Number};
pub use schemas::{
    AttributeDef, AttributeUse, ComplexTypeDef, ElementDef, MaxOccurs, Occurs, ResolvedType,
    Schema, SimpleTypeDef, TypeRef, XSD_NAMESPACE, XSI_NAMESPACE,
};
pub use validation::ValidationContext;
