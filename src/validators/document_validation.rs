//! Document Validation
//!
//! This module validates a parsed document tree against a built [`Schema`].
//! Validation never stops at the first problem: every diagnostic found is
//! collected, in document order, into the [`ValidationContext`].

use std::sync::Arc;

use crate::documents::Node;
use crate::error::{ErrorCode, ValidationError};
use crate::names::{is_xmlns_attribute, local_name};

use super::builtins::{is_valid_lexical, BuiltinType};
use super::facets::Facet;
use super::schemas::{ComplexTypeDef, ElementDef, ResolvedType, Schema, SimpleTypeDef};
use super::validation::ValidationContext;

/// Prefix of schema-instance attributes, which are never declared
const XSI_PREFIX: &str = "xsi:";

/// Validates documents against one schema
///
/// The schema is shared and never modified, so a validator can be cloned
/// freely and used from several threads at once.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: Arc<Schema>,
    max_depth: Option<usize>,
}

impl SchemaValidator {
    /// Create a validator for a schema
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            schema: schema.into(),
            max_depth: None,
        }
    }

    /// Skip elements nested deeper than `depth`
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Get the schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a document tree and return every diagnostic found
    pub fn validate(&self, document: &Node) -> Vec<ValidationError> {
        let mut context = ValidationContext::new();
        if let Some(depth) = self.max_depth {
            context = context.with_max_depth(depth);
        }

        validate_document(&self.schema, document, &mut context);

        tracing::debug!(
            root = %document.name,
            errors = context.error_count(),
            "validated document"
        );
        context.into_errors()
    }

    /// Check whether a document tree is valid
    pub fn is_valid(&self, document: &Node) -> bool {
        self.validate(document).is_empty()
    }
}

/// Validate a document tree, starting from its root element
pub fn validate_document(schema: &Schema, root: &Node, context: &mut ValidationContext) {
    match schema.element(&root.name) {
        Some(decl) => validate_element(schema, root, decl, context),
        None => context.add_error(ValidationError::new(
            ErrorCode::ElementNotFound,
            format!("No global element declaration found for '{}'", root.name),
        )),
    }
}

/// Validate an element against its declaration
pub fn validate_element(
    schema: &Schema,
    node: &Node,
    decl: &ElementDef,
    context: &mut ValidationContext,
) {
    if node.name != decl.name {
        context.report(
            node,
            ErrorCode::ElementMismatch,
            format!("Expected element '{}' but found '{}'", decl.name, node.name),
        );
        return;
    }

    context.enter_level();
    if context.is_max_depth_exceeded() {
        context.exit_level();
        return;
    }

    let decl = referenced_declaration(schema, decl);

    match schema.resolve_type(&decl.type_ref) {
        ResolvedType::Builtin(builtin) => validate_builtin_element(node, builtin, decl, context),
        ResolvedType::Complex(complex_type) => {
            validate_attributes(node, complex_type, context);
            validate_element_content(schema, node, complex_type, context);
        }
        ResolvedType::Simple(simple_type) => {
            let text = node.text_content().unwrap_or("");
            validate_simple_value(schema, node, text, simple_type, &mut Vec::new(), context);
        }
        ResolvedType::Inline => {
            let text = node.text_content().unwrap_or("");
            validate_facets(node, text, &decl.facets, context);
        }
        ResolvedType::Unknown => {}
    }

    context.exit_level();
}

/// A particle written as `ref="..."` takes its type from the global element
fn referenced_declaration<'s>(schema: &'s Schema, decl: &'s ElementDef) -> &'s ElementDef {
    match &decl.reference {
        Some(reference) => match schema.element(local_name(reference)) {
            Some(global) => global,
            None => {
                tracing::trace!(reference = %reference, "unresolved element reference");
                decl
            }
        },
        None => decl,
    }
}

/// Validate an element whose type is a built-in keyword
fn validate_builtin_element(
    node: &Node,
    builtin: BuiltinType,
    decl: &ElementDef,
    context: &mut ValidationContext,
) {
    if node.element_children().next().is_some() {
        context.report(
            node,
            ErrorCode::InvalidContent,
            format!(
                "Element '{}' has simple type '{}' but contains child elements",
                node.name, builtin
            ),
        );
        return;
    }

    let text = node.text_content().unwrap_or("");
    if !builtin.is_valid(text) {
        context.report(
            node,
            ErrorCode::InvalidElementValue,
            format!(
                "Invalid value '{}' for element '{}': expected {}",
                text, node.name, builtin
            ),
        );
    }

    validate_facets(node, text, &decl.facets, context);
}

/// Validate text against a named simple type, following its chain of bases
///
/// Base facets are checked before the derived type's own facets. `visited`
/// holds the types already on the chain so a cyclic base stops the walk.
fn validate_simple_value<'s>(
    schema: &'s Schema,
    node: &Node,
    text: &str,
    simple_type: &'s SimpleTypeDef,
    visited: &mut Vec<&'s str>,
    context: &mut ValidationContext,
) {
    visited.push(simple_type.name.as_str());

    if let Some(builtin) = BuiltinType::from_name(&simple_type.base_type) {
        if !builtin.is_valid(text) {
            context.report(
                node,
                ErrorCode::InvalidElementValue,
                format!(
                    "Invalid value '{}' for element '{}': expected {}",
                    text, node.name, builtin
                ),
            );
        }
    } else if let Some(base) = schema.simple_type(&simple_type.base_type) {
        if !visited.contains(&base.name.as_str()) {
            validate_simple_value(schema, node, text, base, visited, context);
        }
    }

    validate_facets(node, text, &simple_type.facets, context);
}

/// Check text against a list of facets, reporting each failure at `node`
fn validate_facets(node: &Node, text: &str, facets: &[Facet], context: &mut ValidationContext) {
    for facet in facets {
        if let Err(err) = facet.validate(text) {
            context.report_at(node, err);
        }
    }
}

/// Validate the attributes of an element with a named complex type
fn validate_attributes(node: &Node, complex_type: &ComplexTypeDef, context: &mut ValidationContext) {
    for attr in complex_type.attributes.iter().filter(|a| a.is_required()) {
        if node.get_attribute(&attr.name).is_none() {
            context.report(
                node,
                ErrorCode::MissingRequiredAttribute,
                format!(
                    "Missing required attribute '{}' on element '{}'",
                    attr.name, node.name
                ),
            );
        }
    }

    for (name, value) in &node.attributes {
        if is_xmlns_attribute(name) || name.starts_with(XSI_PREFIX) {
            continue;
        }

        let decl = match complex_type.attribute(name) {
            Some(decl) => decl,
            None => {
                context.report(
                    node,
                    ErrorCode::UnexpectedAttribute,
                    format!("Unexpected attribute '{}' on element '{}'", name, node.name),
                );
                continue;
            }
        };

        if decl.is_prohibited() {
            context.report(
                node,
                ErrorCode::ProhibitedAttribute,
                format!("Attribute '{}' is prohibited on element '{}'", name, node.name),
            );
        } else if let Some(fixed) = decl.fixed.as_deref().filter(|fixed| *fixed != value.as_str()) {
            context.report(
                node,
                ErrorCode::FixedValueViolation,
                format!(
                    "Attribute '{}' must have fixed value '{}', found '{}'",
                    name, fixed, value
                ),
            );
        } else if !is_valid_lexical(&decl.type_name, value) {
            context.report(
                node,
                ErrorCode::InvalidAttributeValue,
                format!(
                    "Invalid value '{}' for attribute '{}': expected {}",
                    value,
                    name,
                    local_name(&decl.type_name)
                ),
            );
        }
    }
}

/// Validate the children of an element against the flattened particles
fn validate_element_content(
    schema: &Schema,
    node: &Node,
    complex_type: &ComplexTypeDef,
    context: &mut ValidationContext,
) {
    for particle in &complex_type.elements {
        let matches: Vec<&Node> = node.find_children(&particle.name).collect();
        let count = matches.len();

        if count < particle.occurs.min as usize {
            context.report(
                node,
                ErrorCode::MinOccursViolation,
                format!(
                    "Element '{}' occurs {} times in '{}', but minOccurs is {}",
                    particle.name, count, node.name, particle.occurs.min
                ),
            );
        }
        if particle.occurs.max.is_exceeded_by(count) {
            context.report(
                node,
                ErrorCode::MaxOccursViolation,
                format!(
                    "Element '{}' occurs {} times in '{}', but maxOccurs is {}",
                    particle.name, count, node.name, particle.occurs.max
                ),
            );
        }

        for child in matches {
            validate_element(schema, child, particle, context);
        }
    }

    for child in node.element_children() {
        if !complex_type.elements.iter().any(|p| p.name == child.name) {
            context.report(
                child,
                ErrorCode::UnexpectedElement,
                format!("Unexpected element '{}' in '{}'", child.name, node.name),
            );
        }
    }
}
