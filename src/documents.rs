//! Document tree model
//!
//! A parsed document is a plain owning tree of [`Node`] values. Element
//! children are owned exclusively, so the tree is acyclic by construction.
//! Mixed content is represented by synthetic `#text` children; the `text`
//! field is only populated on nodes without element children.

use crate::names::{local_name, TEXT_NODE_NAME};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 1-based source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number
    pub line: usize,
    /// Column number
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// An element or a synthetic text run in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Tag name as written (prefix included), or `#text`
    pub name: String,
    /// Attributes in document order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<Node>,
    /// Text content of a node without element children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Namespace URI bound to the tag's prefix, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Position of the start tag
    #[serde(default)]
    pub position: Position,
}

impl Node {
    /// Create a new element node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            text: None,
            namespace: None,
            position: Position::default(),
        }
    }

    /// Create a synthetic `#text` node
    pub fn text_node(text: impl Into<String>) -> Self {
        let mut node = Self::new(TEXT_NODE_NAME);
        node.text = Some(text.into());
        node
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a child node
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set the source position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Check if this is a synthetic text node
    pub fn is_text(&self) -> bool {
        self.name == TEXT_NODE_NAME
    }

    /// Get the local name (namespace prefix stripped)
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Get an attribute value by exact name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Iterate over element children, skipping `#text` runs
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|c| !c.is_text())
    }

    /// Find element children by exact name
    pub fn find_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text content: the own `text` field, or the text of the first `#text` child
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref().or_else(|| {
            self.children
                .iter()
                .find(|c| c.is_text())
                .and_then(|c| c.text.as_deref())
        })
    }
}
