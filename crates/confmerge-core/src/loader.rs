/*
 * loader.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The include-expanding loader.
//!
//! [`ConfigLoader::load`] fetches a document, reads its marker names and
//! expands it into a fresh, include-free tree:
//!
//! - An ordinary element is copied (name, attributes, and the expansion of
//!   each child in order).
//! - An include marker is replaced by the document its text refers to. When
//!   that document's root is a container, its children are spliced in;
//!   otherwise the root itself is expanded in place. Either way the included
//!   content is expanded relative to its own location.
//! - A blank reference or a target that cannot be fetched drops the marker
//!   and records a warning.

use crate::diagnostics::DiagnosticCollector;
use crate::document::{Document, LoadedConfig};
use crate::error::LoadError;
use crate::markers::{MarkerNames, resolve_marker_names};
use crate::options::LoadOptions;
use crate::source::{ConfigSource, FileSystemSource};
use confmerge_xml::Element;
use std::path::Path;

/// Loads configuration documents and expands their include markers.
///
/// The loader holds no per-load state, so one loader can serve any number
/// of loads, concurrently if its source allows.
///
/// # Example
///
/// ```
/// use confmerge_core::{ConfigLoader, MemorySource};
///
/// let mut source = MemorySource::new();
/// source
///     .insert_xml("app.xml", "<configuration><a/><include>child.xml</include><b/></configuration>")
///     .unwrap();
/// source
///     .insert_xml("child.xml", "<configuration><x/><y/></configuration>")
///     .unwrap();
///
/// let loaded = ConfigLoader::new(source).load("app.xml").unwrap();
/// let names: Vec<_> = loaded.root().children.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["a", "x", "y", "b"]);
/// assert!(!loaded.has_warnings());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader<S> {
    source: S,
    options: LoadOptions,
}

/// State threaded through one load.
struct LoadContext<'a> {
    markers: &'a MarkerNames,

    diagnostics: DiagnosticCollector,

    /// Locations currently being expanded, outermost first.
    in_flight: Vec<String>,
}

impl<S: ConfigSource> ConfigLoader<S> {
    /// Create a loader with default options.
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: LoadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the document at `location` and expand every include marker in it.
    ///
    /// # Errors
    ///
    /// - [`LoadError::NotFound`] if the document at `location` cannot be fetched.
    /// - [`LoadError::IncludeCycle`] if an include leads back to a document
    ///   that is still being expanded.
    /// - [`LoadError::DepthExceeded`] if includes nest deeper than
    ///   [`LoadOptions::max_depth`].
    ///
    /// Missing include targets and blank include references are not errors;
    /// they are reported in [`LoadedConfig::diagnostics`].
    pub fn load(&self, location: &str) -> Result<LoadedConfig, LoadError> {
        let raw_root = self
            .source
            .fetch_raw(location)
            .map_err(|err| LoadError::NotFound {
                location: location.to_string(),
                reason: err.to_string(),
            })?;

        let markers = resolve_marker_names(
            &raw_root,
            &self.options.root_attribute,
            &self.options.include_attribute,
        );
        tracing::debug!(
            location,
            root_tag = %markers.root_tag,
            include_tag = %markers.include_tag,
            "resolved marker names"
        );

        let mut ctx = LoadContext {
            markers: &markers,
            diagnostics: DiagnosticCollector::new(),
            in_flight: vec![location.to_string()],
        };

        // A raw root that is itself an include marker always becomes a fresh
        // container element carrying the marker's attributes.
        let root = if markers.is_include(&raw_root) {
            let children = self.expand_include(&raw_root, location, &mut ctx)?;
            Element {
                attributes: raw_root.attributes.clone(),
                children,
                ..Element::new(markers.root_tag.as_str())
            }
        } else {
            self.copy_element(&raw_root, location, &mut ctx)?
        };

        let diagnostics = ctx.diagnostics.into_diagnostics();
        tracing::info!(
            location,
            elements = root.element_count(),
            warnings = diagnostics.len(),
            "configuration loaded"
        );

        Ok(LoadedConfig {
            document: Document {
                location: location.to_string(),
                root,
            },
            markers,
            diagnostics,
        })
    }

    /// Expand one raw element found in the document at `location`.
    fn expand(
        &self,
        element: &Element,
        location: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Vec<Element>, LoadError> {
        if ctx.markers.is_include(element) {
            return self.expand_include(element, location, ctx);
        }
        Ok(vec![self.copy_element(element, location, ctx)?])
    }

    /// Copy an ordinary element, expanding its children.
    fn copy_element(
        &self,
        element: &Element,
        location: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Element, LoadError> {
        let mut output = Element::new(element.name.as_str());
        output.attributes = element.attributes.clone();
        if self.options.keep_text {
            output.text = element.text.clone();
        }

        for child in &element.children {
            let expanded = self.expand(child, location, ctx)?;
            output.children.extend(expanded);
        }

        Ok(output)
    }

    fn expand_include(
        &self,
        marker: &Element,
        location: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Vec<Element>, LoadError> {
        let Some(reference) = marker.text_payload() else {
            tracing::debug!(location, "include marker has no target reference");
            let include_tag = ctx.markers.include_tag.as_str();
            ctx.diagnostics
                .dropped_include("C-2-1", "Blank include reference", location, |builder| {
                    builder
                        .problem(format!(
                            "An `<{}>` marker must name the document to include",
                            include_tag
                        ))
                        .add_hint("Put a location relative to this document inside the marker?")
                });
            return Ok(Vec::new());
        };

        let target = self.source.resolve_location(location, reference);
        tracing::debug!(location, reference, target = %target, "resolving include");

        if let Some(start) = ctx.in_flight.iter().position(|l| *l == target) {
            let mut chain = ctx.in_flight[start..].to_vec();
            chain.push(target);
            return Err(LoadError::IncludeCycle { chain });
        }

        if ctx.in_flight.len() > self.options.max_depth {
            return Err(LoadError::DepthExceeded {
                location: target,
                max_depth: self.options.max_depth,
            });
        }

        let fetched = match self.source.fetch_raw(&target) {
            Ok(root) => root,
            Err(err) => {
                tracing::debug!(location, target = %target, error = %err, "include target not fetched");
                ctx.diagnostics
                    .dropped_include("C-2-2", "Include target not found", location, |builder| {
                        builder
                            .problem(format!("`{}` could not be loaded", reference))
                            .add_detail(format!("Resolved to `{}`", target))
                            .add_detail(err.to_string())
                    });
                return Ok(Vec::new());
            }
        };

        ctx.in_flight.push(target.clone());
        let result = self.expand_fetched(&fetched, &target, ctx);
        ctx.in_flight.pop();
        result
    }

    /// Expand the root of an included document fetched from `location`.
    fn expand_fetched(
        &self,
        fetched: &Element,
        location: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Vec<Element>, LoadError> {
        if !ctx.markers.is_container(fetched) {
            return self.expand(fetched, location, ctx);
        }

        let mut spliced = Vec::new();
        for child in &fetched.children {
            spliced.extend(self.expand(child, location, ctx)?);
        }
        Ok(spliced)
    }
}

/// Load an XML file from disk and expand its includes with default options.
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadedConfig, LoadError> {
    let location = path.as_ref().to_string_lossy().into_owned();
    ConfigLoader::new(FileSystemSource::new()).load(&location)
}
