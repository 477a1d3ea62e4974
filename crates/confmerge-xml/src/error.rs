//! Error types for XML reading and writing.

use confmerge_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use thiserror::Error;

/// Result type alias for confmerge-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or writing XML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// XML syntax error from quick-xml (includes duplicate attributes).
    #[error("XML syntax error: {message}{}", position_suffix(.position))]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// Mismatched end tag.
    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    /// Invalid XML structure.
    #[error("Invalid XML structure: {message}")]
    InvalidStructure { message: String },

    /// Empty document (no root element).
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// Multiple root elements.
    #[error("Invalid XML: multiple root elements")]
    MultipleRoots,

    /// Failure while serializing a tree.
    #[error("Failed to write XML: {message}")]
    Write { message: String },
}

fn position_suffix(position: &Option<u64>) -> String {
    match position {
        Some(p) => format!(" at byte {}", p),
        None => String::new(),
    }
}

impl Error {
    /// Convert this error to a DiagnosticMessage with the matching C-1-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            Error::XmlSyntax { message, position } => {
                let mut builder = DiagnosticMessageBuilder::error("XML Syntax Error")
                    .with_code("C-1-1")
                    .problem(message.clone());

                if let Some(pos) = position {
                    builder = builder.add_detail(format!("Error at byte offset {}", pos));
                }

                builder.build()
            }

            Error::UnexpectedEof { expected } => {
                DiagnosticMessageBuilder::error("Unexpected End of XML Input")
                    .with_code("C-1-2")
                    .problem(format!(
                        "The XML document ended unexpectedly; expected {}",
                        expected
                    ))
                    .build()
            }

            Error::MismatchedEndTag { expected, found } => {
                DiagnosticMessageBuilder::error("Mismatched XML End Tag")
                    .with_code("C-1-3")
                    .problem(format!(
                        "End tag </{}> does not match start tag <{}>",
                        found, expected
                    ))
                    .add_hint("Check that all opening tags have matching closing tags?")
                    .build()
            }

            Error::InvalidStructure { message } => {
                DiagnosticMessageBuilder::error("Invalid XML Structure")
                    .with_code("C-1-4")
                    .problem(message.clone())
                    .build()
            }

            Error::EmptyDocument => DiagnosticMessageBuilder::error("Empty XML Document")
                .with_code("C-1-5")
                .problem("The XML document contains no root element")
                .add_hint("Add a root element to the document?")
                .build(),

            Error::MultipleRoots => DiagnosticMessageBuilder::error("Multiple XML Root Elements")
                .with_code("C-1-6")
                .problem("The XML document contains multiple root elements")
                .add_detail("XML documents must have exactly one root element")
                .add_hint("Wrap multiple elements in a single container element?")
                .build(),

            Error::Write { message } => DiagnosticMessageBuilder::error("XML Write Error")
                .with_code("C-1-7")
                .problem(message.clone())
                .build(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}
