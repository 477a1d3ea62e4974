//! Builder API for diagnostic messages.
//!
//! The builder encodes the tidyverse message structure in its method names:
//! a title (`error`/`warning`/`info`), a `problem` statement, bulleted
//! details (`add_detail`, `add_info`, `add_note`) and `add_hint`s.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};

/// Builder for creating diagnostic messages following tidyverse guidelines.
///
/// # Example
///
/// ```
/// use confmerge_error_reporting::DiagnosticMessageBuilder;
///
/// let warning = DiagnosticMessageBuilder::warning("Include target not found")
///     .with_code("C-2-2")
///     .with_location("conf/app.xml")
///     .problem("`shared/db.xml` could not be loaded")
///     .add_detail("resolved to `conf/shared/db.xml`")
///     .add_hint("Check the path in the include marker?")
///     .build();
///
/// assert_eq!(warning.title, "Include target not found");
/// assert_eq!(warning.code.as_deref(), Some("C-2-2"));
/// assert_eq!(warning.details.len(), 1);
/// assert_eq!(warning.hints.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    kind: DiagnosticKind,
    title: String,
    code: Option<String>,
    problem: Option<String>,
    details: Vec<DetailItem>,
    hints: Vec<String>,
    location: Option<String>,
}

impl DiagnosticMessageBuilder {
    /// Create a new builder with the specified kind and title.
    ///
    /// Most code should use [`error`](Self::error), [`warning`](Self::warning)
    /// or [`info`](Self::info) instead.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            code: None,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    /// Create an error diagnostic builder.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    /// Create a warning diagnostic builder.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Create an info diagnostic builder.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    /// Set the error code (`C-<subsystem>-<number>`).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the location of the document the message is about.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the problem statement.
    ///
    /// Use "must" for requirements or "can't" for impossibilities.
    pub fn problem(mut self, stmt: impl Into<String>) -> Self {
        self.problem = Some(stmt.into());
        self
    }

    /// Add an error detail (displayed with a cross bullet).
    pub fn add_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Error,
            content: detail.into(),
        });
        self
    }

    /// Add an info detail (displayed with an info bullet).
    pub fn add_info(mut self, info: impl Into<String>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Info,
            content: info.into(),
        });
        self
    }

    /// Add a note detail (displayed with a plain bullet).
    pub fn add_note(mut self, note: impl Into<String>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Note,
            content: note.into(),
        });
        self
    }

    /// Add a hint for fixing the problem. Hints that suggest an action end with `?`.
    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Build the diagnostic message.
    pub fn build(self) -> DiagnosticMessage {
        DiagnosticMessage {
            code: self.code,
            title: self.title,
            kind: self.kind,
            problem: self.problem,
            details: self.details,
            hints: self.hints,
            location: self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_kinds() {
        assert_eq!(
            DiagnosticMessageBuilder::error("e").build().kind,
            DiagnosticKind::Error
        );
        assert_eq!(
            DiagnosticMessageBuilder::warning("w").build().kind,
            DiagnosticKind::Warning
        );
        assert_eq!(
            DiagnosticMessageBuilder::info("i").build().kind,
            DiagnosticKind::Info
        );
    }

    #[test]
    fn test_builder_details_keep_order() {
        let msg = DiagnosticMessageBuilder::error("Test")
            .add_detail("Detail 1")
            .add_info("Info 1")
            .add_note("Note 1")
            .build();

        assert_eq!(msg.details.len(), 3);
        assert_eq!(msg.details[0].kind, DetailKind::Error);
        assert_eq!(msg.details[1].kind, DetailKind::Info);
        assert_eq!(msg.details[2].kind, DetailKind::Note);
    }

    #[test]
    fn test_builder_complete_message() {
        let msg = DiagnosticMessageBuilder::warning("Blank include reference")
            .with_code("C-2-1")
            .with_location("app.xml")
            .problem("An include marker must name the document to include")
            .add_hint("Put a relative location inside the marker?")
            .build();

        assert_eq!(msg.title, "Blank include reference");
        assert_eq!(msg.code.as_deref(), Some("C-2-1"));
        assert_eq!(msg.location.as_deref(), Some("app.xml"));
        assert!(msg.problem.is_some());
        assert!(msg.details.is_empty());
        assert_eq!(msg.hints.len(), 1);
    }
}
