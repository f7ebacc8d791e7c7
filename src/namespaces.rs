//! XML namespace handling
//!
//! Namespaces are informational only: the parser records, for each element,
//! the URI its prefix (or the default namespace) is bound to by in-scope
//! `xmlns` declarations. No validation logic acts on the result.

use crate::names::split_qname;
use indexmap::IndexMap;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Namespace context for resolving prefixes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: IndexMap<Prefix, NamespaceUri>,
    /// Default namespace (no prefix)
    default_namespace: Option<NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Record an `xmlns` or `xmlns:prefix` attribute; returns false for other names
    pub fn declare(&mut self, attr_name: &str, value: &str) -> bool {
        if attr_name == "xmlns" {
            self.set_default_namespace(value);
            true
        } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
            self.add_prefix(prefix, value);
            true
        } else {
            false
        }
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Look up the namespace a (possibly prefixed) name is bound to
    pub fn lookup(&self, name: &str) -> Option<&str> {
        match split_qname(name) {
            (Some(prefix), _) => self.get_namespace(prefix),
            (None, _) => self.get_default_namespace(),
        }
    }

    /// Check whether no declarations are in scope
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.default_namespace.is_none()
    }

    /// Flatten into a prefix to URI map, using `""` for the default namespace
    pub fn to_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        if let Some(default) = &self.default_namespace {
            map.insert(String::new(), default.clone());
        }
        for (prefix, uri) in &self.prefixes {
            map.insert(prefix.clone(), uri.clone());
        }
        map
    }
}
