//! Validation context
//!
//! Holds the state of one validation pass. A fresh context is created for
//! every call, so validating the same document twice yields the same result.

use crate::documents::Node;
use crate::error::{ErrorCode, ValidationError};

/// State of a single validation pass
#[derive(Debug, Default)]
pub struct ValidationContext {
    /// Collected diagnostics, in discovery order
    pub errors: Vec<ValidationError>,
    /// Current nesting level
    pub level: usize,
    /// Maximum depth for validation (None = unlimited)
    pub max_depth: Option<usize>,
}

impl ValidationContext {
    /// Create a new validation context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Check if we've exceeded max depth
    pub fn is_max_depth_exceeded(&self) -> bool {
        match self.max_depth {
            Some(max) => self.level > max,
            None => false,
        }
    }

    /// Enter a new level
    pub fn enter_level(&mut self) {
        self.level += 1;
    }

    /// Exit current level
    pub fn exit_level(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Get the error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Add a diagnostic as is
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a diagnostic positioned at `node`
    pub fn report(&mut self, node: &Node, code: ErrorCode, message: impl Into<String>) {
        self.add_error(ValidationError::new(code, message).at_position(node.position));
    }

    /// Place an unpositioned diagnostic at `node` and add it
    pub fn report_at(&mut self, node: &Node, error: ValidationError) {
        self.add_error(error.at_position(node.position));
    }

    /// Take the collected diagnostics
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}
