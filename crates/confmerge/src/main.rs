//! confmerge - expand include markers in XML configuration files

use anyhow::{Context, Result, bail};
use clap::Parser;
use confmerge_core::{
    ConfigLoader, DEFAULT_INCLUDE_ATTRIBUTE, DEFAULT_MAX_DEPTH, DEFAULT_ROOT_ATTRIBUTE,
    FileSystemSource, LoadOptions,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "confmerge")]
#[command(version)]
#[command(about = "Expand include markers in XML configuration files", long_about = None)]
struct Cli {
    /// Configuration file to load
    location: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Xml, env = "CONFMERGE_FORMAT")]
    format: OutputFormat,

    /// Indent width for nested elements (0 for compact output)
    #[arg(long, default_value_t = 2, env = "CONFMERGE_INDENT")]
    indent: usize,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", env = "CONFMERGE_OUTPUT")]
    output: Option<PathBuf>,

    /// Root attribute that renames the container element
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ROOT_ATTRIBUTE, env = "CONFMERGE_ROOT_ATTRIBUTE")]
    root_attribute: String,

    /// Root attribute that renames the include marker element
    #[arg(long, value_name = "NAME", default_value = DEFAULT_INCLUDE_ATTRIBUTE, env = "CONFMERGE_INCLUDE_ATTRIBUTE")]
    include_attribute: String,

    /// Maximum include nesting
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH, env = "CONFMERGE_MAX_DEPTH")]
    max_depth: usize,

    /// Keep the text content of ordinary elements
    #[arg(long, env = "CONFMERGE_KEEP_TEXT")]
    keep_text: bool,

    /// Fail if any include marker had to be dropped
    #[arg(long, env = "CONFMERGE_STRICT")]
    strict: bool,

    /// Do not print warnings
    #[arg(short, long, env = "CONFMERGE_QUIET")]
    quiet: bool,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions::new()
            .with_root_attribute(self.root_attribute.as_str())
            .with_include_attribute(self.include_attribute.as_str())
            .with_max_depth(self.max_depth)
            .with_keep_text(self.keep_text)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the merged document.
    let default_filter = if cli.quiet {
        "confmerge=error"
    } else {
        "confmerge=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let loader = ConfigLoader::new(FileSystemSource::new()).with_options(cli.load_options());

    let loaded = match loader.load(&cli.location) {
        Ok(loaded) => loaded,
        Err(err) => {
            if !cli.quiet {
                eprint!("{}", err.to_diagnostic().to_text());
            }
            return Err(err).with_context(|| format!("Failed to load '{}'", cli.location));
        }
    };

    if !cli.quiet {
        for warning in loaded.warnings() {
            eprint!("{}", warning.to_text());
        }
    }

    if cli.strict && loaded.has_warnings() {
        let count = loaded.warnings().count();
        bail!("{} include warning(s) reported in strict mode", count);
    }

    let rendered = output::render(&loaded, cli.format, cli.indent)?;
    match &cli.output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("Failed to write output to {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}
