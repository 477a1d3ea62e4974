/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fatal load errors.
//!
//! Only three conditions abort a load. Everything else (blank include
//! references, include targets that cannot be fetched) is reported as a
//! warning and the offending marker is dropped.

use confmerge_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use thiserror::Error;

/// Error type for a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The top-level document could not be fetched.
    #[error("configuration not found at '{location}': {reason}")]
    NotFound { location: String, reason: String },

    /// An include chain re-entered a document that was still being expanded.
    ///
    /// `chain` runs from the first occurrence of the repeated location to
    /// the repeat, so its first and last entries are equal.
    #[error("include cycle: {}", chain.join(" -> "))]
    IncludeCycle { chain: Vec<String> },

    /// Includes nested deeper than the configured limit.
    #[error("include depth limit of {max_depth} exceeded at '{location}'")]
    DepthExceeded { location: String, max_depth: usize },
}

impl LoadError {
    /// Convert this error to a DiagnosticMessage with the matching C-2-* code.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        match self {
            LoadError::NotFound { location, reason } => {
                DiagnosticMessageBuilder::error("Configuration not found")
                    .with_code("C-2-4")
                    .with_location(location.clone())
                    .problem(format!("`{}` could not be loaded", location))
                    .add_detail(reason.clone())
                    .add_hint("Check the location passed to the loader?")
                    .build()
            }

            LoadError::IncludeCycle { chain } => {
                let mut builder = DiagnosticMessageBuilder::error("Include cycle")
                    .with_code("C-2-3")
                    .problem("Include markers must not lead back to a document that is still being expanded");

                if let Some(first) = chain.first() {
                    builder = builder.with_location(first.clone());
                }
                for (from, to) in chain.iter().zip(chain.iter().skip(1)) {
                    builder = builder.add_info(format!("`{}` includes `{}`", from, to));
                }

                builder
                    .add_hint("Remove one of the include markers in the chain?")
                    .build()
            }

            LoadError::DepthExceeded {
                location,
                max_depth,
            } => DiagnosticMessageBuilder::error("Include depth exceeded")
                .with_code("C-2-5")
                .with_location(location.clone())
                .problem(format!(
                    "Includes are nested more than {} levels deep",
                    max_depth
                ))
                .add_hint("Flatten the include chain or raise the depth limit?")
                .build(),
        }
    }
}
