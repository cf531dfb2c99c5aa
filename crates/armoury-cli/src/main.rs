//! `armoury` -- compile combat content into Zig tables, or audit it.
//!
//! Reads one document (a file whose extension picks the format, or JSON on
//! stdin). Without audit flags the generated Zig goes to stdout. With
//! `--audit-only` or `--audit-report` the content is audited instead and
//! nothing is generated.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use armoury_data::config::{OracleConfig, ToolConfig};
use armoury_data::drift::CanonicalIdentifierSet;
use armoury_data::{Content, DocumentFormat, load_document, parse_document};
use armoury_emit::EmitError;

#[derive(Parser, Debug)]
#[command(name = "armoury", about = "Combat content compiler and auditor")]
struct Cli {
    /// Input document (.json, .ron or .toml). Reads JSON from stdin when omitted.
    input: Option<PathBuf>,

    /// Write the audit report as markdown to PATH and skip generation.
    #[arg(long, value_name = "PATH")]
    audit_report: Option<PathBuf>,

    /// Print the audit report to stdout and skip generation.
    #[arg(long)]
    audit_only: bool,

    /// Configuration file. Defaults to `armoury.{ron,toml,json}` in the
    /// working directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Committed technique enumeration to check ids against.
    #[arg(long, value_name = "PATH")]
    oracle: Option<PathBuf>,
}

impl Cli {
    fn audit_mode(&self) -> bool {
        self.audit_only || self.audit_report.is_some()
    }
}

fn main() -> Result<ExitCode> {
    // Diagnostics go to stderr; stdout carries the generated file or report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let document = read_input(cli.input.as_deref())?;
    let content = Content::from_tree(&document);

    let mut stdout = io::stdout().lock();
    if cli.audit_mode() {
        audit(&content, cli.audit_report.as_deref(), &mut stdout)
    } else {
        let config = load_config(&cli)?;
        generate(&content, &config.oracle, &mut stdout)
    }
}

// ===========================================================================
// Input
// ===========================================================================

fn read_input(path: Option<&Path>) -> Result<serde_json::Value> {
    match path {
        Some(path) => {
            load_document(path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(parse_document(&text, DocumentFormat::Json, "<stdin>")?)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ToolConfig> {
    let mut config = match &cli.config {
        Some(path) => ToolConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ToolConfig::discover(&std::env::current_dir()?)?,
    };
    if let Some(oracle) = &cli.oracle {
        config.oracle.path = oracle.clone();
    }
    Ok(config)
}

// ===========================================================================
// Modes
// ===========================================================================

/// Write the report to `report_path`, or to `out` when there is none. The
/// report is written whatever the verdict; the exit code carries it.
fn audit(content: &Content, report_path: Option<&Path>, out: &mut impl Write) -> Result<ExitCode> {
    let report = armoury_audit::run_audit(content);
    let markdown = format!("{}\n", report.to_markdown());

    match report_path {
        Some(path) => {
            std::fs::write(path, &markdown)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Audit report written to: {}", path.display());
        }
        None => emit(out, &markdown)?,
    }

    let errors = report.error_count();
    let warnings = report.warning_count();
    if report.has_errors() {
        error!("Audit failed: {errors} error(s), {warnings} warning(s)");
        return Ok(ExitCode::FAILURE);
    }
    if warnings > 0 {
        warn!("Audit passed with {warnings} warning(s)");
    } else {
        info!("Audit passed: all validations succeeded");
    }
    Ok(ExitCode::SUCCESS)
}

/// Render the tables into `out`. Nothing is written when generation is
/// refused.
fn generate(content: &Content, oracle: &OracleConfig, out: &mut impl Write) -> Result<ExitCode> {
    let canonical = CanonicalIdentifierSet::load(oracle).with_context(|| {
        format!("failed to read identifier oracle {}", oracle.path.display())
    })?;

    match armoury_emit::generate(content, canonical.as_ref()) {
        Ok(zig) => {
            emit(out, &zig)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(EmitError::Drift(drift)) => {
            error!(
                oracle = %oracle.path.display(),
                "technique ids drifted from the committed enumeration"
            );
            if !drift.missing.is_empty() {
                error!("  missing from input: {}", drift.missing.join(", "));
            }
            if !drift.extra.is_empty() {
                error!("  unexpected in input: {}", drift.extra.join(", "));
            }
            Ok(ExitCode::FAILURE)
        }
        Err(EmitError::Malformed(_)) => {
            for record in &content.malformed {
                error!("{record}");
            }
            error!(
                "{} record(s) could not be typed; run with --audit-only for the full report",
                content.malformed.len()
            );
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn emit(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
