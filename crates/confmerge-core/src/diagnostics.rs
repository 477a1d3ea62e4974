/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Collection of recoverable problems found during a load.

use confmerge_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};

/// Collector for the warnings of one load.
///
/// Messages are kept in the order they were reported, which is document
/// order of the include markers that caused them.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<DiagnosticMessage>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Add a diagnostic message.
    pub fn add(&mut self, diagnostic: DiagnosticMessage) {
        self.diagnostics.push(diagnostic);
    }

    /// Record a warning for an include marker that was dropped from the
    /// document at `location`.
    ///
    /// `describe` fills in the problem statement, details and hints; every
    /// such warning ends with an info line saying the marker was dropped.
    pub fn dropped_include(
        &mut self,
        code: &str,
        title: &str,
        location: &str,
        describe: impl FnOnce(DiagnosticMessageBuilder) -> DiagnosticMessageBuilder,
    ) {
        let builder = DiagnosticMessageBuilder::warning(title)
            .with_code(code)
            .with_location(location);
        self.add(describe(builder).add_info("The marker was dropped").build());
    }

    pub fn into_diagnostics(self) -> Vec<DiagnosticMessage> {
        self.diagnostics
    }
}
