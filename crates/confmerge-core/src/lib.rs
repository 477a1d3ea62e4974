/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Hierarchical configuration loading with include resolution.
//!
//! A configuration document can pull in other documents with include
//! markers:
//!
//! ```xml
//! <configuration>
//!   <add key="name" value="app"/>
//!   <include>../shared/logging.xml</include>
//! </configuration>
//! ```
//!
//! [`ConfigLoader`] loads a document from a [`ConfigSource`], replaces every
//! marker with the content it refers to (recursively, each reference resolved
//! against the document that contains it) and returns one self-contained
//! tree in a [`LoadedConfig`].
//!
//! - If the included document's root is a container (`<configuration>` by
//!   default), its children take the marker's place.
//! - Otherwise the included root element itself takes the marker's place.
//!
//! A marker with a blank reference, or one whose target cannot be fetched,
//! is dropped and reported as a warning in [`LoadedConfig::diagnostics`].
//! Include cycles and runaway nesting abort the load with a [`LoadError`].
//!
//! The container and include element names can be changed per document with
//! the `root` and `include` attributes of its root element; see
//! [`resolve_marker_names`].

pub mod diagnostics;
pub mod document;
pub mod error;
pub mod loader;
pub mod markers;
pub mod options;
pub mod source;

pub use confmerge_xml::{Attribute, Element};
pub use diagnostics::DiagnosticCollector;
pub use document::{Document, LoadedConfig};
pub use error::LoadError;
pub use loader::{ConfigLoader, load_file};
pub use markers::{
    DEFAULT_INCLUDE_ATTRIBUTE, DEFAULT_INCLUDE_TAG, DEFAULT_ROOT_ATTRIBUTE, DEFAULT_ROOT_TAG,
    MarkerNames, resolve_marker_names,
};
pub use options::{DEFAULT_MAX_DEPTH, LoadOptions};
pub use source::{
    CachingSource, ConfigSource, FetchError, FileSystemSource, MemorySource, normalize_path,
    resolve_relative_location,
};
