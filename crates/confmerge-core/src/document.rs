/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Results of a load.

use crate::markers::MarkerNames;
use confmerge_error_reporting::{DiagnosticKind, DiagnosticMessage};
use confmerge_xml::Element;
use serde::Serialize;

/// A root element together with the location it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub location: String,
    pub root: Element,
}

/// The outcome of a successful load.
///
/// `document` is include-free. `diagnostics` holds a warning for every
/// include marker that was dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedConfig {
    pub document: Document,

    /// The marker names that were active for this load.
    pub markers: MarkerNames,

    pub diagnostics: Vec<DiagnosticMessage>,
}

impl LoadedConfig {
    /// The merged root element.
    pub fn root(&self) -> &Element {
        &self.document.root
    }

    pub fn into_root(self) -> Element {
        self.document.root
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}
