//! Limits and constraints for document parsing
//!
//! This module defines various limits to prevent resource exhaustion
//! (deeply nested trees, oversized inputs, attribute floods).

use crate::error::{Error, Result};

/// Parser limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Maximum input size in bytes
    pub max_input_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum length in bytes of a single text run
    pub max_text_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_input_size: 100 * 1024 * 1024, // 100 MB
            max_attributes: 1000,
            max_text_length: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_depth: 100,
            max_input_size: 10 * 1024 * 1024, // 10 MB
            max_attributes: 100,
            max_text_length: 1024 * 1024, // 1 MB
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_depth: 10000,
            max_input_size: 1024 * 1024 * 1024, // 1 GB
            max_attributes: 10000,
            max_text_length: 100 * 1024 * 1024, // 100 MB
        }
    }

    /// Check if nesting depth is within limits
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            Err(Error::LimitExceeded(format!(
                "nesting depth {} exceeds maximum {}",
                depth, self.max_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if input size is within limits
    pub fn check_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_input_size {
            Err(Error::LimitExceeded(format!(
                "input size {} bytes exceeds maximum {} bytes",
                size, self.max_input_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            Err(Error::LimitExceeded(format!(
                "attribute count {} exceeds maximum {}",
                count, self.max_attributes
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a text run is within limits
    pub fn check_text_length(&self, len: usize) -> Result<()> {
        if len > self.max_text_length {
            Err(Error::LimitExceeded(format!(
                "text length {} bytes exceeds maximum {} bytes",
                len, self.max_text_length
            )))
        } else {
            Ok(())
        }
    }
}
