//! Schema definitions
//!
//! The typed model produced by the schema builder. A [`Schema`] is built
//! once and only read afterwards; validators share it behind an `Arc`.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use super::builtins::BuiltinType;
use super::facets::Facet;
use crate::names::local_name;

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML Schema Instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Upper occurrence bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxOccurs {
    /// Finite bound
    Bounded(u32),
    /// `maxOccurs="unbounded"`
    Unbounded,
}

impl MaxOccurs {
    /// Check whether `count` exceeds the bound
    pub fn is_exceeded_by(&self, count: usize) -> bool {
        match self {
            MaxOccurs::Bounded(max) => count > *max as usize,
            MaxOccurs::Unbounded => false,
        }
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(n) => write!(f, "{}", n),
            MaxOccurs::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Occurrence bounds of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurs {
    /// Lower bound
    pub min: u32,
    /// Upper bound
    pub max: MaxOccurs,
}

impl Default for Occurs {
    fn default() -> Self {
        Self {
            min: 1,
            max: MaxOccurs::Bounded(1),
        }
    }
}

/// How an element declaration refers to its type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum TypeRef {
    /// `type="..."` as written, prefix included
    Named(String),
    /// Anonymous `complexType` child
    InlineComplex,
    /// Anonymous `simpleType` child
    InlineSimple,
    /// No type given
    Absent,
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::InlineComplex => f.write_str("#inline-complex"),
            TypeRef::InlineSimple => f.write_str("#inline-simple"),
            TypeRef::Absent => f.write_str("#none"),
        }
    }
}

/// Attribute use mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeUse {
    /// Must be present
    Required,
    /// May be present
    #[default]
    Optional,
    /// Must not be present
    Prohibited,
}

impl AttributeUse {
    /// Parse from the `use` attribute value
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "required" => Some(Self::Required),
            "optional" => Some(Self::Optional),
            "prohibited" => Some(Self::Prohibited),
            _ => None,
        }
    }
}

/// Attribute declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    /// Attribute name
    pub name: String,
    /// Type keyword as written
    pub type_name: String,
    /// Use mode
    #[serde(rename = "use")]
    pub use_mode: AttributeUse,
    /// Default value
    pub default: Option<String>,
    /// Fixed value
    pub fixed: Option<String>,
}

impl AttributeDef {
    /// Check if the attribute is required
    pub fn is_required(&self) -> bool {
        self.use_mode == AttributeUse::Required
    }

    /// Check if the attribute is prohibited
    pub fn is_prohibited(&self) -> bool {
        self.use_mode == AttributeUse::Prohibited
    }
}

/// Element declaration, global or as a particle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDef {
    /// Element name
    pub name: String,
    /// Type reference
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Occurrence bounds
    pub occurs: Occurs,
    /// Attributes of an inline complex type
    pub attributes: Vec<AttributeDef>,
    /// Facets of an inline simple type
    pub facets: Vec<Facet>,
    /// Global element named by `ref="..."`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ElementDef {
    /// Create a declaration with default bounds and no type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: TypeRef::Absent,
            occurs: Occurs::default(),
            attributes: Vec::new(),
            facets: Vec::new(),
            reference: None,
        }
    }
}

/// Named complex type with its flattened particles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexTypeDef {
    /// Type name
    pub name: String,
    /// Element particles in declaration order
    pub elements: Vec<ElementDef>,
    /// Attribute declarations
    pub attributes: Vec<AttributeDef>,
}

impl ComplexTypeDef {
    /// Find a declared attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Named simple type restricting a base type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleTypeDef {
    /// Type name
    pub name: String,
    /// Base type keyword as written
    pub base_type: String,
    /// Restriction facets
    pub facets: Vec<Facet>,
}

/// A built schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Target namespace
    pub target_namespace: Option<String>,
    /// Global element declarations
    pub elements: IndexMap<String, ElementDef>,
    /// Named complex types
    pub complex_types: IndexMap<String, ComplexTypeDef>,
    /// Named simple types
    pub simple_types: IndexMap<String, SimpleTypeDef>,
    /// Namespace prefixes declared on the schema root (`""` is the default namespace)
    pub namespaces: IndexMap<String, String>,
}

/// What a type reference resolves to against a schema
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedType<'s> {
    /// One of the recognized built-in types
    Builtin(BuiltinType),
    /// A named complex type
    Complex(&'s ComplexTypeDef),
    /// A named simple type
    Simple(&'s SimpleTypeDef),
    /// An anonymous type declared on the element
    Inline,
    /// No type, or a name the schema does not know: content is not checked
    Unknown,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a global element declaration by exact name
    pub fn element(&self, name: &str) -> Option<&ElementDef> {
        self.elements.get(name)
    }

    /// Look up a named complex type, ignoring a namespace prefix
    pub fn complex_type(&self, name: &str) -> Option<&ComplexTypeDef> {
        self.complex_types.get(local_name(name))
    }

    /// Look up a named simple type, ignoring a namespace prefix
    pub fn simple_type(&self, name: &str) -> Option<&SimpleTypeDef> {
        self.simple_types.get(local_name(name))
    }

    /// Resolve a type reference: built-ins first, then complex, then simple types
    pub fn resolve_type(&self, type_ref: &TypeRef) -> ResolvedType<'_> {
        match type_ref {
            TypeRef::Named(name) => {
                if let Some(builtin) = BuiltinType::from_name(name) {
                    ResolvedType::Builtin(builtin)
                } else if let Some(complex) = self.complex_type(name) {
                    ResolvedType::Complex(complex)
                } else if let Some(simple) = self.simple_type(name) {
                    ResolvedType::Simple(simple)
                } else {
                    ResolvedType::Unknown
                }
            }
            TypeRef::InlineComplex | TypeRef::InlineSimple => ResolvedType::Inline,
            TypeRef::Absent => ResolvedType::Unknown,
        }
    }
}
