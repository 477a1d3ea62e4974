//! Error code catalog and lookup.
//!
//! Maps error codes (like "C-2-2") to their metadata: subsystem, title,
//! default message and documentation anchor.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for an error code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Subsystem name (e.g., "xml", "include")
    pub subsystem: String,

    /// Short title for the error
    pub title: String,

    /// Default message template
    pub message_template: String,

    /// Documentation URL (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,

    /// When this error was introduced (version)
    pub since_version: String,
}

/// Global error catalog, embedded at compile time and parsed on first use.
///
/// # Panics
///
/// Panics if the embedded JSON is invalid; `test_catalog_loads` guards against that.
pub static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    serde_json::from_str(json_data).expect("Invalid error catalog JSON - this is a bug in confmerge")
});

/// Look up error code information.
pub fn get_error_info(code: &str) -> Option<&ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}

/// Get documentation URL for an error code.
pub fn get_docs_url(code: &str) -> Option<&str> {
    ERROR_CATALOG
        .get(code)
        .and_then(|info| info.docs_url.as_deref())
}

/// Get the subsystem name for an error code.
///
/// # Example
///
/// ```
/// use confmerge_error_reporting::catalog::get_subsystem;
///
/// assert_eq!(get_subsystem("C-2-3"), Some("include"));
/// ```
pub fn get_subsystem(code: &str) -> Option<&str> {
    ERROR_CATALOG.get(code).map(|info| info.subsystem.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        assert!(!ERROR_CATALOG.is_empty());
    }

    #[test]
    fn test_include_codes_exist() {
        for code in ["C-2-1", "C-2-2", "C-2-3", "C-2-4", "C-2-5"] {
            let info = get_error_info(code).unwrap_or_else(|| panic!("missing {code}"));
            assert_eq!(info.subsystem, "include");
        }
    }

    #[test]
    fn test_xml_codes_exist() {
        for code in ["C-1-1", "C-1-2", "C-1-3", "C-1-4", "C-1-5", "C-1-6"] {
            assert_eq!(get_subsystem(code), Some("xml"), "{code}");
        }
    }

    #[test]
    fn test_nonexistent_code() {
        assert!(get_error_info("C-999-999").is_none());
        assert!(get_docs_url("C-999-999").is_none());
    }
}
