//! Error reporting and diagnostic messages for confmerge.
//!
//! Every problem the loader runs into is described by a [`DiagnosticMessage`]:
//! a coded, titled message with an optional problem statement, bulleted
//! details and hints, modelled on the tidyverse style guide for error
//! messages. Messages are built with [`DiagnosticMessageBuilder`] and rendered
//! either as text for terminals ([`DiagnosticMessage::to_text`]) or as JSON
//! for tools ([`DiagnosticMessage::to_json`]).
//!
//! Error codes have the form `C-<subsystem>-<number>`:
//!
//! - `C-0-*`: internal errors
//! - `C-1-*`: XML parsing and writing
//! - `C-2-*`: include resolution
//!
//! The full list lives in `error_catalog.json` and is queried through the
//! [`catalog`] module.

pub mod builder;
pub mod catalog;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_docs_url, get_error_info, get_subsystem};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
