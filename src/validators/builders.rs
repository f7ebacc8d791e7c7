//! Schema builder
//!
//! Turns a parsed schema document into [`Schema`] definitions. Building is
//! fail-fast: a parse failure is returned unchanged, and any problem with the
//! schema itself becomes a single `SCHEMA_ERROR` at `(1,1)`.

use super::facets::Facet;
use super::schemas::{
    AttributeDef, AttributeUse, ComplexTypeDef, ElementDef, MaxOccurs, Occurs, Schema,
    SimpleTypeDef, TypeRef,
};
use crate::documents::Node;
use crate::error::{Error, ErrorCode, ParseOutcome, Result, ValidationError};
use crate::names::local_name;
use crate::namespaces::NamespaceContext;
use crate::parser::XmlParser;

/// Type keyword assumed for attributes declared without `type`
const DEFAULT_ATTRIBUTE_TYPE: &str = "string";

/// Base keyword recorded for simple types without a `restriction`
const ANY_SIMPLE_TYPE: &str = "anySimpleType";

/// Parse schema text and build it with a default parser
pub fn parse_schema(text: &str) -> ParseOutcome<Schema> {
    SchemaBuilder::new().parse(text)
}

/// Builds [`Schema`] values from schema text or from an already parsed tree
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    parser: XmlParser,
}

impl SchemaBuilder {
    /// Create a builder with a default parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder using a configured parser
    pub fn with_parser(parser: XmlParser) -> Self {
        Self { parser }
    }

    /// Parse schema text and build it
    pub fn parse(&self, text: &str) -> ParseOutcome<Schema> {
        let parsed = self.parser.parse(text);
        match parsed.value {
            Some(root) if parsed.errors.is_empty() => self.build(&root),
            _ => ParseOutcome {
                value: None,
                errors: parsed.errors,
            },
        }
    }

    /// Build a schema from a parsed schema tree
    pub fn build(&self, root: &Node) -> ParseOutcome<Schema> {
        match build_schema(root) {
            Ok(schema) => {
                tracing::debug!(
                    elements = schema.elements.len(),
                    complex_types = schema.complex_types.len(),
                    simple_types = schema.simple_types.len(),
                    "built schema"
                );
                ParseOutcome::success(schema)
            }
            Err(err) => {
                let message = match err {
                    Error::Schema(message) => message,
                    other => other.to_string(),
                };
                tracing::debug!(%message, "schema rejected");
                ParseOutcome::failure(ValidationError::new(ErrorCode::SchemaError, message).at(1, 1))
            }
        }
    }
}

fn build_schema(root: &Node) -> Result<Schema> {
    if root.local_name() != "schema" {
        return Err(Error::Schema(format!(
            "Root element must be 'schema', found '{}'",
            root.name
        )));
    }

    let mut namespaces = NamespaceContext::new();
    for (name, value) in &root.attributes {
        namespaces.declare(name, value);
    }

    let mut schema = Schema {
        target_namespace: root.get_attribute("targetNamespace").map(str::to_string),
        namespaces: namespaces.to_map(),
        ..Schema::default()
    };

    for child in root.element_children() {
        match child.local_name() {
            "element" => {
                let def = build_element(child)?;
                schema.elements.insert(def.name.clone(), def);
            }
            "complexType" => {
                let def = build_complex_type(child)?;
                schema.complex_types.insert(def.name.clone(), def);
            }
            "simpleType" => {
                let def = build_simple_type(child)?;
                schema.simple_types.insert(def.name.clone(), def);
            }
            other => tracing::trace!(component = other, "skipping schema component"),
        }
    }

    Ok(schema)
}

fn required_name<'a>(node: &'a Node, what: &str) -> Result<&'a str> {
    node.get_attribute("name")
        .ok_or_else(|| Error::Schema(format!("{} declaration without a name", what)))
}

fn build_element(node: &Node) -> Result<ElementDef> {
    let reference = node.get_attribute("ref").map(str::to_string);
    let name = match (node.get_attribute("name"), reference.as_deref()) {
        (Some(name), _) => name.to_string(),
        (None, Some(reference)) => local_name(reference).to_string(),
        (None, None) => return Err(Error::Schema("element declaration without a name".into())),
    };

    let mut def = ElementDef::new(name);
    def.reference = reference;
    def.occurs = parse_occurs(node)?;
    if let Some(type_name) = node.get_attribute("type") {
        def.type_ref = TypeRef::Named(type_name.to_string());
    }

    for child in node.element_children() {
        match child.local_name() {
            "complexType" => {
                // only the attributes survive; particles of anonymous types are dropped
                def.type_ref = TypeRef::InlineComplex;
                def.attributes = child
                    .element_children()
                    .filter(|c| c.local_name() == "attribute")
                    .map(build_attribute)
                    .collect::<Result<_>>()?;
            }
            "simpleType" => {
                def.type_ref = TypeRef::InlineSimple;
                def.facets = build_restriction(child)?.1;
            }
            _ => {}
        }
    }

    Ok(def)
}

fn parse_occurs(node: &Node) -> Result<Occurs> {
    let min = match node.get_attribute("minOccurs") {
        Some(v) => v
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::Schema(format!("Invalid minOccurs value '{}'", v)))?,
        None => 1,
    };

    let max = match node.get_attribute("maxOccurs").map(str::trim) {
        Some("unbounded") => MaxOccurs::Unbounded,
        Some(v) => MaxOccurs::Bounded(
            v.parse::<u32>()
                .map_err(|_| Error::Schema(format!("Invalid maxOccurs value '{}'", v)))?,
        ),
        None => MaxOccurs::Bounded(1),
    };

    if let MaxOccurs::Bounded(max) = max {
        if max < min {
            return Err(Error::Schema(format!(
                "maxOccurs {} is less than minOccurs {}",
                max, min
            )));
        }
    }

    Ok(Occurs { min, max })
}

fn build_complex_type(node: &Node) -> Result<ComplexTypeDef> {
    let mut def = ComplexTypeDef {
        name: required_name(node, "complexType")?.to_string(),
        elements: Vec::new(),
        attributes: Vec::new(),
    };

    for child in node.element_children() {
        match child.local_name() {
            "sequence" | "choice" | "all" => collect_particles(child, &mut def.elements)?,
            "attribute" => def.attributes.push(build_attribute(child)?),
            _ => {}
        }
    }

    Ok(def)
}

/// Flatten a model group (and any nested groups) into element particles
fn collect_particles(group: &Node, particles: &mut Vec<ElementDef>) -> Result<()> {
    for child in group.element_children() {
        match child.local_name() {
            "element" => particles.push(build_element(child)?),
            "sequence" | "choice" | "all" => collect_particles(child, particles)?,
            _ => {}
        }
    }
    Ok(())
}

fn build_attribute(node: &Node) -> Result<AttributeDef> {
    let name = match (node.get_attribute("name"), node.get_attribute("ref")) {
        (Some(name), _) => name.to_string(),
        (None, Some(reference)) => reference.to_string(),
        (None, None) => return Err(Error::Schema("attribute declaration without a name".into())),
    };

    let use_mode = match node.get_attribute("use") {
        Some(v) => AttributeUse::from_str(v)
            .ok_or_else(|| Error::Schema(format!("Invalid use value '{}' on attribute '{}'", v, name)))?,
        None => AttributeUse::Optional,
    };

    Ok(AttributeDef {
        type_name: node
            .get_attribute("type")
            .unwrap_or(DEFAULT_ATTRIBUTE_TYPE)
            .to_string(),
        use_mode,
        default: node.get_attribute("default").map(str::to_string),
        fixed: node.get_attribute("fixed").map(str::to_string),
        name,
    })
}

fn build_simple_type(node: &Node) -> Result<SimpleTypeDef> {
    let name = required_name(node, "simpleType")?.to_string();
    let (base_type, facets) = build_restriction(node)?;
    Ok(SimpleTypeDef {
        name,
        base_type,
        facets,
    })
}

/// Read the `restriction` child of a simple type: its base and its facets
fn build_restriction(simple_type: &Node) -> Result<(String, Vec<Facet>)> {
    let restriction = match simple_type
        .element_children()
        .find(|c| c.local_name() == "restriction")
    {
        Some(r) => r,
        None => return Ok((ANY_SIMPLE_TYPE.to_string(), Vec::new())),
    };

    let base = restriction
        .get_attribute("base")
        .unwrap_or(ANY_SIMPLE_TYPE)
        .to_string();

    let facets = restriction
        .element_children()
        .filter_map(|facet| {
            facet
                .get_attribute("value")
                .map(|value| Facet::new(facet.local_name(), value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((base, facets))
}
