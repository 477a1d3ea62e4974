/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Options for a load.

use crate::markers::{DEFAULT_INCLUDE_ATTRIBUTE, DEFAULT_ROOT_ATTRIBUTE};
use serde::{Deserialize, Serialize};

/// Default limit on include nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling how [`ConfigLoader`](crate::ConfigLoader) expands a document.
///
/// Missing fields deserialize to their defaults, so an embedding application
/// can keep a partial `LoadOptions` table in its own configuration:
///
/// ```
/// use confmerge_core::LoadOptions;
///
/// let options: LoadOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
/// assert_eq!(options.max_depth, 8);
/// assert_eq!(options.include_attribute, "include");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Root attribute whose value renames the container element.
    pub root_attribute: String,

    /// Root attribute whose value renames the include marker element.
    pub include_attribute: String,

    /// Maximum include nesting. Exceeding it aborts the load.
    pub max_depth: usize,

    /// Carry the text content of ordinary elements into the output.
    pub keep_text: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            root_attribute: DEFAULT_ROOT_ATTRIBUTE.to_string(),
            include_attribute: DEFAULT_INCLUDE_ATTRIBUTE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            keep_text: false,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_attribute(mut self, name: impl Into<String>) -> Self {
        self.root_attribute = name.into();
        self
    }

    pub fn with_include_attribute(mut self, name: impl Into<String>) -> Self {
        self.include_attribute = name.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_keep_text(mut self, keep_text: bool) -> Self {
        self.keep_text = keep_text;
        self
    }
}
