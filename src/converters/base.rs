//! Base converter types
//!
//! This module provides the configuration shared by the JSON converters.

/// Configuration for converters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Key used for text content in decoded output
    text_key: String,
    /// Prefix for attribute names in decoded output
    attr_prefix: String,
    /// Whether to drop namespace prefixes from element names
    strip_namespaces: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            text_key: "$".to_string(),
            attr_prefix: "@".to_string(),
            strip_namespaces: false,
        }
    }
}

impl ConverterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text key
    pub fn text_key(&self) -> &str {
        &self.text_key
    }

    /// Get the attribute prefix
    pub fn attr_prefix(&self) -> &str {
        &self.attr_prefix
    }

    /// Check if namespace prefixes are dropped
    pub fn strip_namespaces(&self) -> bool {
        self.strip_namespaces
    }

    /// Set text key
    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = key.into();
        self
    }

    /// Set attribute prefix
    ///
    /// An empty prefix turns attribute detection off when reading JSON.
    pub fn with_attr_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attr_prefix = prefix.into();
        self
    }

    /// Set namespace stripping
    pub fn with_strip_namespaces(mut self, strip: bool) -> Self {
        self.strip_namespaces = strip;
        self
    }

    /// Build the JSON key of an attribute
    pub(crate) fn attribute_key(&self, name: &str) -> String {
        format!("{}{}", self.attr_prefix, name)
    }

    /// Recover an attribute name from a JSON key
    pub(crate) fn attribute_name<'k>(&self, key: &'k str) -> Option<&'k str> {
        if self.attr_prefix.is_empty() {
            return None;
        }
        key.strip_prefix(self.attr_prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::new();
        assert_eq!(config.text_key(), "$");
        assert_eq!(config.attr_prefix(), "@");
        assert!(!config.strip_namespaces());
    }

    #[test]
    fn test_attribute_keys() {
        let config = ConverterConfig::new();
        assert_eq!(config.attribute_key("id"), "@id");
        assert_eq!(config.attribute_name("@id"), Some("id"));
        assert_eq!(config.attribute_name("title"), None);

        let bare = ConverterConfig::new().with_attr_prefix("");
        assert_eq!(bare.attribute_name("id"), None);
    }
}
