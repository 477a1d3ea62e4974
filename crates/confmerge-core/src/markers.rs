/*
 * markers.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Marker configuration: which element names carry special meaning.
//!
//! A document may rename its container and include elements by putting two
//! attributes on its root element:
//!
//! ```xml
//! <settings root="settings" include="import">
//!   <import>shared/logging.xml</import>
//! </settings>
//! ```
//!
//! The attribute names themselves (`root` and `include` above) come from
//! [`LoadOptions`](crate::LoadOptions).

use confmerge_xml::Element;
use serde::Serialize;

/// Default name of the container element.
pub const DEFAULT_ROOT_TAG: &str = "configuration";

/// Default name of the include marker element.
pub const DEFAULT_INCLUDE_TAG: &str = "include";

/// Default name of the root attribute that renames the container element.
pub const DEFAULT_ROOT_ATTRIBUTE: &str = "root";

/// Default name of the root attribute that renames the include marker element.
pub const DEFAULT_INCLUDE_ATTRIBUTE: &str = "include";

/// The element names active for one load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerNames {
    /// Elements with this name are containers; including one splices its children.
    pub root_tag: String,

    /// Elements with this name are include markers.
    pub include_tag: String,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            include_tag: DEFAULT_INCLUDE_TAG.to_string(),
        }
    }
}

impl MarkerNames {
    pub fn is_container(&self, element: &Element) -> bool {
        element.name == self.root_tag
    }

    pub fn is_include(&self, element: &Element) -> bool {
        element.name == self.include_tag
    }
}

/// Read the marker names off a raw root element.
///
/// The values of `root_attribute` and `include_attribute`, trimmed, become
/// the active tag names. A missing or blank attribute falls back to the
/// default tag name. Never fails.
pub fn resolve_marker_names(
    raw_root: &Element,
    root_attribute: &str,
    include_attribute: &str,
) -> MarkerNames {
    MarkerNames {
        root_tag: attribute_or(raw_root, root_attribute, DEFAULT_ROOT_TAG),
        include_tag: attribute_or(raw_root, include_attribute, DEFAULT_INCLUDE_TAG),
    }
}

fn attribute_or(element: &Element, attribute: &str, default: &str) -> String {
    element
        .get_attribute(attribute)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(root: &Element) -> MarkerNames {
        resolve_marker_names(root, DEFAULT_ROOT_ATTRIBUTE, DEFAULT_INCLUDE_ATTRIBUTE)
    }

    #[test]
    fn test_defaults_when_attributes_absent() {
        assert_eq!(resolve(&Element::new("configuration")), MarkerNames::default());
    }

    #[test]
    fn test_attribute_values_are_trimmed() {
        let root = Element::new("settings")
            .with_attribute("root", "  settings ")
            .with_attribute("include", "\timport\n");
        let names = resolve(&root);
        assert_eq!(names.root_tag, "settings");
        assert_eq!(names.include_tag, "import");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let root = Element::new("configuration")
            .with_attribute("root", "   ")
            .with_attribute("include", "");
        assert_eq!(resolve(&root), MarkerNames::default());
    }

    #[test]
    fn test_custom_attribute_slots() {
        let root = Element::new("settings")
            .with_attribute("root", "ignored")
            .with_attribute("data-root", "settings")
            .with_attribute("data-include", "pull");
        let names = resolve_marker_names(&root, "data-root", "data-include");
        assert_eq!(names.root_tag, "settings");
        assert_eq!(names.include_tag, "pull");
    }

    #[test]
    fn test_predicates() {
        let names = MarkerNames::default();
        assert!(names.is_container(&Element::new("configuration")));
        assert!(names.is_include(&Element::new("include")));
        assert!(!names.is_include(&Element::new("Include")));
    }
}
