/*
 * source.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Where configuration documents come from.
//!
//! The loader never touches storage itself. It asks a [`ConfigSource`] for
//! the raw tree at a location and for the location an include reference
//! points to. This module provides sources backed by the filesystem
//! ([`FileSystemSource`]) and by an in-memory map ([`MemorySource`]), plus a
//! memoizing wrapper ([`CachingSource`]).

use confmerge_xml::Element;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Trait for fetching raw configuration trees and resolving include references.
///
/// Locations are opaque strings to the loader. Two equal location strings
/// must denote the same document.
pub trait ConfigSource {
    /// Fetch the raw tree stored at `location`.
    fn fetch_raw(&self, location: &str) -> Result<Element, FetchError>;

    /// Compute the location that `relative` refers to when it appears in the
    /// document at `current`.
    ///
    /// References are relative to the referencing document, not to the
    /// document the load started from.
    fn resolve_location(&self, current: &str, relative: &str) -> String;
}

/// Why a fetch produced no tree.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no document at '{location}'")]
    NotFound { location: String },

    #[error("failed to read '{location}': {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{location}': {source}")]
    Parse {
        location: String,
        #[source]
        source: confmerge_xml::Error,
    },
}

impl FetchError {
    pub fn location(&self) -> &str {
        match self {
            FetchError::NotFound { location }
            | FetchError::Io { location, .. }
            | FetchError::Parse { location, .. } => location,
        }
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn fetch_raw(&self, location: &str) -> Result<Element, FetchError> {
        (**self).fetch_raw(location)
    }

    fn resolve_location(&self, current: &str, relative: &str) -> String {
        (**self).resolve_location(current, relative)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn fetch_raw(&self, location: &str) -> Result<Element, FetchError> {
        (**self).fetch_raw(location)
    }

    fn resolve_location(&self, current: &str, relative: &str) -> String {
        (**self).resolve_location(current, relative)
    }
}

/// Source that reads XML files.
///
/// Include references are resolved against the directory of the referencing
/// file and normalized lexically, so `..` walks up from that directory. An
/// absolute reference replaces the base path entirely.
#[derive(Debug, Clone, Default)]
pub struct FileSystemSource {
    base_dir: Option<PathBuf>,
}

impl FileSystemSource {
    /// Create a source that reads relative locations from the working directory.
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Create a source that reads relative locations from `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// The filesystem path a location is read from.
    pub fn path_for(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ConfigSource for FileSystemSource {
    fn fetch_raw(&self, location: &str) -> Result<Element, FetchError> {
        let path = self.path_for(location);
        tracing::debug!(location, path = %path.display(), "reading configuration file");

        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound {
                    location: location.to_string(),
                }
            } else {
                FetchError::Io {
                    location: location.to_string(),
                    source,
                }
            }
        })?;

        confmerge_xml::parse(&content).map_err(|source| FetchError::Parse {
            location: location.to_string(),
            source,
        })
    }

    fn resolve_location(&self, current: &str, relative: &str) -> String {
        let relative_path = Path::new(relative);
        let joined = if relative_path.is_absolute() {
            relative_path.to_path_buf()
        } else {
            let base_dir = Path::new(current).parent().unwrap_or(Path::new(""));
            base_dir.join(relative_path)
        };
        normalize_path(&joined).to_string_lossy().into_owned()
    }
}

/// Lexically normalize a path: drop `.` segments and fold `name/..` pairs.
///
/// `..` above the root of an absolute path is dropped; leading `..` segments
/// of a relative path are kept. The filesystem is never consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    normalized.pop();
                    depth -= 1;
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(segment) => {
                normalized.push(segment);
                depth += 1;
            }
        }
    }

    normalized
}

/// Source that serves trees from an in-memory map.
///
/// Useful for testing and for applications that bundle their configuration.
/// Locations are `/`-separated paths resolved with
/// [`resolve_relative_location`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Element>,
}

impl MemorySource {
    /// Create a new empty memory source.
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Store a tree at a location, replacing any previous one.
    pub fn insert(&mut self, location: impl Into<String>, root: Element) -> &mut Self {
        self.documents.insert(location.into(), root);
        self
    }

    /// Parse XML text and store the tree at a location.
    pub fn insert_xml(
        &mut self,
        location: impl Into<String>,
        xml: &str,
    ) -> confmerge_xml::Result<&mut Self> {
        let root = confmerge_xml::parse(xml)?;
        Ok(self.insert(location, root))
    }

    /// Create a source holding the given trees.
    pub fn with_documents(
        documents: impl IntoIterator<Item = (impl Into<String>, Element)>,
    ) -> Self {
        let mut source = Self::new();
        for (location, root) in documents {
            source.insert(location, root);
        }
        source
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ConfigSource for MemorySource {
    fn fetch_raw(&self, location: &str) -> Result<Element, FetchError> {
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                location: location.to_string(),
            })
    }

    fn resolve_location(&self, current: &str, relative: &str) -> String {
        resolve_relative_location(current, relative)
    }
}

/// Resolve a `/`-separated reference against the directory of `current`.
///
/// # Examples
///
/// ```
/// use confmerge_core::resolve_relative_location;
///
/// assert_eq!(
///     resolve_relative_location("/a/b/config.xml", "../shared/common.xml"),
///     "/a/shared/common.xml"
/// );
/// assert_eq!(resolve_relative_location("app.xml", "./db.xml"), "db.xml");
/// assert_eq!(resolve_relative_location("conf/app.xml", "/etc/x.xml"), "/etc/x.xml");
/// ```
pub fn resolve_relative_location(current: &str, relative: &str) -> String {
    let joined = if relative.starts_with('/') {
        relative.to_string()
    } else {
        match current.rfind('/') {
            Some(index) => format!("{}/{}", &current[..index], relative),
            None => relative.to_string(),
        }
    };

    let absolute = joined.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let path = segments.join("/");
    if absolute { format!("/{}", path) } else { path }
}

/// Source wrapper that remembers every successfully fetched tree.
///
/// Failed fetches are not cached. Location resolution is delegated unchanged.
#[derive(Debug, Default)]
pub struct CachingSource<S> {
    inner: S,
    cache: Mutex<HashMap<String, Element>>,
}

impl<S: ConfigSource> CachingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached trees.
    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Forget every cached tree.
    pub fn clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ConfigSource> ConfigSource for CachingSource<S> {
    fn fetch_raw(&self, location: &str) -> Result<Element, FetchError> {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
        {
            tracing::debug!(location, "configuration cache hit");
            return Ok(hit.clone());
        }

        // The lock is not held across the fetch; two threads may both miss and
        // fetch the same location, and the later insert wins.
        let root = self.inner.fetch_raw(location)?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.to_string(), root.clone());
        Ok(root)
    }

    fn resolve_location(&self, current: &str, relative: &str) -> String {
        self.inner.resolve_location(current, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_resolve_relative_location() {
        assert_eq!(
            resolve_relative_location("/a/b/config.xml", "../shared/common.xml"),
            "/a/shared/common.xml"
        );
        assert_eq!(
            resolve_relative_location("/a/b/config.xml", "child.xml"),
            "/a/b/child.xml"
        );
        assert_eq!(
            resolve_relative_location("conf/app.xml", "../../up.xml"),
            "../up.xml"
        );
        assert_eq!(resolve_relative_location("/app.xml", "../../x.xml"), "/x.xml");
        assert_eq!(
            resolve_relative_location("a/b/c.xml", "/etc/./conf//x.xml"),
            "/etc/conf/x.xml"
        );
    }

    #[test]
    fn test_filesystem_resolve_location() {
        let source = FileSystemSource::new();
        let resolved = source.resolve_location("/a/b/config.xml", "../shared/common.xml");
        assert_eq!(Path::new(&resolved), Path::new("/a/shared/common.xml"));

        let resolved = source.resolve_location("config.xml", "./db.xml");
        assert_eq!(Path::new(&resolved), Path::new("db.xml"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("a/./b/../c.xml")),
            PathBuf::from("a/c.xml")
        );
        assert_eq!(normalize_path(Path::new("../x/../y")), PathBuf::from("../y"));
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_path_for_uses_base_dir() {
        let source = FileSystemSource::with_base_dir("/srv/conf");
        assert_eq!(source.path_for("app.xml"), PathBuf::from("/srv/conf/app.xml"));
        assert_eq!(source.path_for("/etc/app.xml"), PathBuf::from("/etc/app.xml"));
    }

    #[test]
    fn test_filesystem_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSystemSource::with_base_dir(dir.path());
        assert!(matches!(
            source.fetch_raw("missing.xml"),
            Err(FetchError::NotFound { .. })
        ));
    }

    #[test]
    fn test_filesystem_bad_xml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.xml"), "<configuration>").unwrap();
        let source = FileSystemSource::with_base_dir(dir.path());
        let err = source.fetch_raw("bad.xml").unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }), "{err:?}");
        assert_eq!(err.location(), "bad.xml");
    }

    #[test]
    fn test_memory_source() {
        let mut source = MemorySource::new();
        source
            .insert_xml("conf/app.xml", "<configuration><a/></configuration>")
            .unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.fetch_raw("conf/app.xml").unwrap().children.len(), 1);
        assert!(matches!(
            source.fetch_raw("conf/other.xml"),
            Err(FetchError::NotFound { .. })
        ));
        assert_eq!(
            source.resolve_location("conf/app.xml", "../shared.xml"),
            "shared.xml"
        );
    }

    struct CountingSource {
        inner: MemorySource,
        fetches: Cell<usize>,
    }

    impl ConfigSource for CountingSource {
        fn fetch_raw(&self, location: &str) -> Result<Element, FetchError> {
            self.fetches.set(self.fetches.get() + 1);
            self.inner.fetch_raw(location)
        }

        fn resolve_location(&self, current: &str, relative: &str) -> String {
            self.inner.resolve_location(current, relative)
        }
    }

    #[test]
    fn test_caching_source_fetches_once() {
        let counting = CountingSource {
            inner: MemorySource::with_documents([("a.xml", Element::new("configuration"))]),
            fetches: Cell::new(0),
        };
        let source = CachingSource::new(counting);

        assert!(source.fetch_raw("a.xml").is_ok());
        assert!(source.fetch_raw("a.xml").is_ok());
        assert!(source.fetch_raw("missing.xml").is_err());
        assert!(source.fetch_raw("missing.xml").is_err());

        assert_eq!(source.cached_len(), 1);
        assert_eq!(source.into_inner().fetches.get(), 3);
    }

    #[test]
    fn test_boxed_and_borrowed_sources() {
        let memory = MemorySource::with_documents([("a.xml", Element::new("configuration"))]);
        let borrowed: &MemorySource = &memory;
        assert!(borrowed.fetch_raw("a.xml").is_ok());

        let boxed: Box<dyn ConfigSource> = Box::new(memory.clone());
        assert!(boxed.fetch_raw("a.xml").is_ok());
        assert_eq!(boxed.resolve_location("x/a.xml", "b.xml"), "x/b.xml");
    }
}
