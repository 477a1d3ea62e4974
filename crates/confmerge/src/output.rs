/*
 * output.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Rendering a loaded configuration for output.

use anyhow::{Context, Result};
use clap::ValueEnum;
use confmerge_core::LoadedConfig;
use confmerge_xml::{WriteOptions, to_xml_string};

/// Output format for the merged document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The merged tree as XML
    Xml,
    /// The merged tree, marker names and diagnostics as JSON
    Json,
}

/// Render a loaded configuration. `indent` of zero means compact output.
pub fn render(loaded: &LoadedConfig, format: OutputFormat, indent: usize) -> Result<String> {
    let mut rendered = match format {
        OutputFormat::Xml => {
            let options = WriteOptions {
                indent: (indent > 0).then_some(indent),
                declaration: true,
            };
            to_xml_string(loaded.root(), &options).context("Failed to write merged XML")?
        }
        OutputFormat::Json if indent > 0 => {
            serde_json::to_string_pretty(loaded).context("Failed to write merged JSON")?
        }
        OutputFormat::Json => {
            serde_json::to_string(loaded).context("Failed to write merged JSON")?
        }
    };
    rendered.push('\n');
    Ok(rendered)
}
