// crates/oscal-cli/src/main.rs
// ============================================================================
// Module: OSCAL CLI Entry Point
// Description: Command dispatcher for OSCAL parsing, resolution, and diffing.
// Purpose: Expose the toolkit's document operations as JSON-emitting commands.
// Dependencies: clap, oscal-core, oscal-resolver, oscal-config, tokio, tracing-subscriber
// ============================================================================

//! ## Overview
//! The `oscal` binary loads OSCAL documents from disk (JSON or XML), runs one
//! toolkit operation, and prints the result as JSON on stdout. Diagnostics
//! and logs go to stderr.
//! Invariants:
//! - Input files are read with a hard size cap.
//! - stdout carries command output only.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use oscal_config::OscalConfig;
use oscal_core::Document;
use oscal_core::DocumentType;
use oscal_core::ParsedDocument;
use oscal_core::build_param_map;
use oscal_core::count_controls;
use oscal_core::diff_documents;
use oscal_core::model::catalog::Catalog;
use oscal_core::model::common::Part;
use oscal_core::parse_document_text;
use oscal_core::render_prose;
use oscal_core::xml_to_json;
use oscal_resolver::Resolver;
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "oscal", version, about = "OSCAL document toolkit", disable_help_subcommand = true)]
struct Cli {
    /// Configuration file (overrides `OSCAL_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a document and print its summary.
    Parse(DocumentArgs),
    /// Convert an XML document into its JSON tree.
    Convert(DocumentArgs),
    /// Resolve a profile or system security plan into its controls.
    Resolve(ResolveCommand),
    /// Resolve and load a single reference.
    Source(SourceCommand),
    /// Compare two documents of the same type.
    Diff(DiffCommand),
    /// Print a control's prose with parameters substituted.
    Prose(ProseCommand),
}

/// Single input document.
#[derive(Args, Debug)]
struct DocumentArgs {
    /// Path to the OSCAL document.
    #[arg(value_name = "FILE")]
    path: PathBuf,
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Path to the profile or SSP.
    #[arg(value_name = "FILE")]
    path: PathBuf,
    /// Base URL for relative imports (defaults to the file's location).
    #[arg(long, value_name = "URL", value_parser = parse_url)]
    base_url: Option<Url>,
}

/// Arguments for `source`.
#[derive(Args, Debug)]
struct SourceCommand {
    /// Reference to resolve.
    #[arg(value_name = "HREF")]
    href: String,
    /// Base URL for relative references (defaults to the working directory).
    #[arg(long, value_name = "URL", value_parser = parse_url)]
    base_url: Option<Url>,
}

/// Arguments for `diff`.
#[derive(Args, Debug)]
struct DiffCommand {
    /// Left-hand (old) document.
    #[arg(value_name = "LEFT")]
    left: PathBuf,
    /// Right-hand (new) document.
    #[arg(value_name = "RIGHT")]
    right: PathBuf,
}

/// Arguments for `prose`.
#[derive(Args, Debug)]
struct ProseCommand {
    /// Catalog containing the control.
    #[arg(value_name = "CATALOG")]
    path: PathBuf,
    /// Control identifier.
    #[arg(value_name = "CONTROL_ID")]
    control_id: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config =
        OscalConfig::load(cli.config.as_deref()).map_err(|err| CliError::new(err.to_string()))?;
    init_tracing(&config.logging.level);

    match cli.command {
        Commands::Parse(args) => command_parse(&args, &config),
        Commands::Convert(args) => command_convert(&args, &config),
        Commands::Resolve(command) => command_resolve(command, &config).await,
        Commands::Source(command) => command_source(command, &config).await,
        Commands::Diff(command) => command_diff(&command, &config),
        Commands::Prose(command) => command_prose(&command, &config),
    }
}

/// Installs the stderr log subscriber (`RUST_LOG` wins over the config level).
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Identifying fields printed by `parse`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct DocumentSummary {
    /// Document type key.
    document_type: DocumentType,
    /// Detected OSCAL version.
    oscal_version: String,
    /// Document UUID.
    uuid: String,
    /// Document title.
    title: String,
    /// Document version.
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    /// Control count (catalogs only).
    #[serde(skip_serializing_if = "Option::is_none")]
    control_count: Option<usize>,
    /// Import count (profiles only).
    #[serde(skip_serializing_if = "Option::is_none")]
    import_count: Option<usize>,
}

/// Builds the `parse` summary for a document.
fn summarize(parsed: &ParsedDocument) -> DocumentSummary {
    let document = &parsed.document;
    let metadata = document.metadata();
    DocumentSummary {
        document_type: parsed.document_type,
        oscal_version: parsed.oscal_version.clone(),
        uuid: document.uuid().to_string(),
        title: metadata.title.clone(),
        version: metadata.version.clone(),
        control_count: match document {
            Document::Catalog(catalog) => Some(count_controls(catalog)),
            _ => None,
        },
        import_count: match document {
            Document::Profile(profile) => Some(profile.imports.len()),
            _ => None,
        },
    }
}

/// Executes `parse`.
fn command_parse(args: &DocumentArgs, config: &OscalConfig) -> CliResult<ExitCode> {
    let parsed = load_document(&args.path, config.resolver.max_document_bytes)?;
    write_json(&summarize(&parsed))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `convert`.
fn command_convert(args: &DocumentArgs, config: &OscalConfig) -> CliResult<ExitCode> {
    let text = read_text(&args.path, config.resolver.max_document_bytes)?;
    let tree = xml_to_json(&text).map_err(|err| CliError::new(err.to_string()))?;
    write_json(&tree)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `resolve`.
async fn command_resolve(command: ResolveCommand, config: &OscalConfig) -> CliResult<ExitCode> {
    let parsed = load_document(&command.path, config.resolver.max_document_bytes)?;
    let base_url = match command.base_url {
        Some(url) => url,
        None => file_url(&command.path)?,
    };
    let resolver = build_resolver(config)?;
    match &parsed.document {
        Document::Profile(profile) => {
            let resolved = resolver.resolve_profile(profile, Some(&base_url)).await;
            write_json(&resolved)?;
        }
        Document::SystemSecurityPlan(ssp) => {
            let resolved = resolver.resolve_ssp(ssp, Some(&base_url)).await;
            write_json(&resolved)?;
        }
        other => {
            return Err(CliError::new(format!(
                "resolve requires a profile or system-security-plan, got {}",
                other.document_type()
            )));
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `source`.
async fn command_source(command: SourceCommand, config: &OscalConfig) -> CliResult<ExitCode> {
    let base_url = match command.base_url {
        Some(url) => url,
        None => working_directory_url()?,
    };
    let resolver = build_resolver(config)?;
    let summary = resolver
        .resolve_source(&command.href, Some(&base_url), None)
        .await
        .map_err(|err| CliError::new(err.to_string()))?;
    write_json(&summary)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `diff`.
fn command_diff(command: &DiffCommand, config: &OscalConfig) -> CliResult<ExitCode> {
    let max_bytes = config.resolver.max_document_bytes;
    let left = load_document(&command.left, max_bytes)?;
    let right = load_document(&command.right, max_bytes)?;
    ensure_same_type(left.document_type, right.document_type)?;
    let result = diff_documents(&left.document, &right.document).ok_or_else(|| {
        CliError::new(mismatch_message(left.document_type, right.document_type))
    })?;
    write_json(&result)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `prose`.
fn command_prose(command: &ProseCommand, config: &OscalConfig) -> CliResult<ExitCode> {
    let parsed = load_document(&command.path, config.resolver.max_document_bytes)?;
    let Document::Catalog(catalog) = &parsed.document else {
        return Err(CliError::new(format!("prose requires a catalog, got {}", parsed.document_type)));
    };
    let lines = prose_lines(catalog, &command.control_id)
        .ok_or_else(|| CliError::new(format!("control {} not found", command.control_id)))?;
    for line in lines {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Document Helpers
// ============================================================================

/// Rejects a pair of documents of different types.
fn ensure_same_type(left: DocumentType, right: DocumentType) -> CliResult<()> {
    if left == right { Ok(()) } else { Err(CliError::new(mismatch_message(left, right))) }
}

/// Formats the type-mismatch message.
fn mismatch_message(left: DocumentType, right: DocumentType) -> String {
    format!("cannot compare {} with {}", left.label(), right.label())
}

/// Renders a control's prose lines, or `None` when the control is absent.
///
/// Parameters from the catalog and every control (enhancements included)
/// feed the substitution map.
fn prose_lines(catalog: &Catalog, control_id: &str) -> Option<Vec<String>> {
    let control = catalog.find_control(control_id)?;
    let param_map = build_param_map(catalog.all_params());

    let mut lines = vec![format!("{} {}", control.id, control.title)];
    let mut stack: Vec<&Part> = control.parts.iter().rev().collect();
    while let Some(part) = stack.pop() {
        if let Some(prose) = &part.prose {
            let label = part.id.as_deref().unwrap_or(&part.name);
            lines.push(format!("{label}: {}", render_prose(prose, &param_map)));
        }
        stack.extend(part.parts.iter().rev());
    }
    Some(lines)
}

/// Builds the resolver for a command.
fn build_resolver(config: &OscalConfig) -> CliResult<Resolver> {
    Resolver::from_config(&config.resolver).map_err(|err| CliError::new(err.to_string()))
}

/// Reads and parses a document file.
fn load_document(path: &Path, max_bytes: usize) -> CliResult<ParsedDocument> {
    tracing::debug!(path = %path.display(), "loading document");
    let text = read_text(path, max_bytes)?;
    parse_document_text(&text)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))
}

/// Reads a UTF-8 file with a size cap.
fn read_text(path: &Path, max_bytes: usize) -> CliResult<String> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => CliError::new(format!("{}: {err}", path.display())),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(format!(
            "{}: file size {size} exceeds limit {limit}",
            path.display()
        )),
    })?;
    String::from_utf8(bytes)
        .map_err(|_| CliError::new(format!("{}: file must be utf-8", path.display())))
}

/// Converts a file path into an absolute `file://` URL.
fn file_url(path: &Path) -> CliResult<Url> {
    let absolute = std::fs::canonicalize(path)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))?;
    Url::from_file_path(&absolute)
        .map_err(|()| CliError::new(format!("cannot build a file URL for {}", absolute.display())))
}

/// Returns the working directory as a `file://` base URL.
fn working_directory_url() -> CliResult<Url> {
    let cwd = std::env::current_dir()
        .map_err(|err| CliError::new(format!("cannot read working directory: {err}")))?;
    Url::from_directory_path(&cwd)
        .map_err(|()| CliError::new(format!("cannot build a file URL for {}", cwd.display())))
}

/// Parses a `--base-url` argument.
fn parse_url(value: &str) -> Result<Url, String> {
    Url::parse(value).map_err(|err| format!("invalid URL {value}: {err}"))
}

// ============================================================================
// SECTION: File Reads
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes pretty JSON plus a newline to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
