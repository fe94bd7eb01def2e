//! CLI binary for textlens.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalysisConfig`, then either serves the dashboard or prints one report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use textlens::{
    run, run_file, AcquisitionStatus, AnalysisConfig, AnalysisReport, ExtractorBackend, Severity,
};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  textlens serve                              Dashboard on http://127.0.0.1:8080
  textlens serve --bind 0.0.0.0:9000          Listen on all interfaces
  textlens analyze report.pdf                 Top 10 words of a PDF
  textlens analyze --text "to be or not to be" --top-n 3
  textlens analyze survey.pdf --json --charts JSON report with SVG charts

ENVIRONMENT VARIABLES:
  RUST_LOG                Overrides -v / -q (e.g. textlens=debug,tower_http=debug)
  TEXTLENS_TOP_N          Rows in the frequency table
  TEXTLENS_BACKEND        lopdf or pdfium
  TEXTLENS_PDF_PASSWORD   Password for encrypted PDFs
  TEXTLENS_BIND           Dashboard listen address
  TEXTLENS_MAX_UPLOAD_MB  Largest accepted upload
  PDFIUM_LIB_PATH         libpdfium location (pdfium backend only)

EXIT STATUS:
  0  analysis ran, or there was nothing to analyse
  1  usage, configuration or file-system error
  2  the PDF could not be read
"#;

/// Word clouds, pie charts and bar charts from PDFs or pasted text.
#[derive(Parser, Debug)]
#[command(
    name = "textlens",
    version,
    about = "Word clouds, pie charts and bar charts from PDFs or pasted text",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Rows kept in the frequency table (1–100).
    #[arg(long, global = true, env = "TEXTLENS_TOP_N", default_value_t = 10,
          value_parser = clap::value_parser!(u32).range(1..=100))]
    top_n: u32,

    /// PDF text extraction backend.
    #[arg(long, global = true, env = "TEXTLENS_BACKEND", value_enum, default_value = "lopdf")]
    backend: BackendArg,

    /// PDF user password for encrypted documents.
    #[arg(long, global = true, env = "TEXTLENS_PDF_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "TEXTLENS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "TEXTLENS_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the interactive dashboard over HTTP.
    Serve {
        /// Listen address.
        #[arg(long, env = "TEXTLENS_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// Largest accepted upload in MiB.
        #[arg(long, env = "TEXTLENS_MAX_UPLOAD_MB", default_value_t = 20,
              value_parser = clap::value_parser!(u32).range(1..=1024))]
        max_upload_mb: u32,
    },

    /// Analyse one PDF or a literal text and print the ranked table.
    Analyze {
        /// Local PDF file. Takes precedence over --text.
        pdf: Option<PathBuf>,

        /// Text to analyse instead of a PDF.
        #[arg(long)]
        text: Option<String>,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,

        /// Include the rendered SVG charts in the JSON report.
        #[arg(long, requires = "json")]
        charts: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    Lopdf,
    Pdfium,
}

impl From<BackendArg> for ExtractorBackend {
    fn from(v: BackendArg) -> Self {
        match v {
            BackendArg::Lopdf => ExtractorBackend::Lopdf,
            BackendArg::Pdfium => ExtractorBackend::Pdfium,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = AnalysisConfig::builder()
        .top_n(cli.top_n as usize)
        .backend(cli.backend.into());
    if let Some(password) = cli.password {
        builder = builder.password(password);
    }

    match cli.command {
        Command::Serve {
            bind,
            max_upload_mb,
        } => {
            let config = builder
                .max_upload_bytes(max_upload_mb as usize * 1024 * 1024)
                .build()
                .context("Invalid configuration")?;
            textlens::server::serve(bind, config)
                .await
                .context("Dashboard server stopped")?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Analyze {
            pdf,
            text,
            json,
            charts,
        } => {
            let config = builder
                .render_charts(charts)
                .build()
                .context("Invalid configuration")?;

            let report = match pdf {
                Some(path) => run_file(&path, &config)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => run(textlens::pipeline::input::select_source(None, text), &config),
            };

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialize report")?
                );
            } else {
                print_report(&report, cli.quiet);
            }

            if matches!(report.status, AcquisitionStatus::ExtractionError(_)) {
                Ok(ExitCode::from(2))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn print_report(report: &AnalysisReport, quiet: bool) {
    let message = report.notice.message();
    let line = match report.notice.severity() {
        Severity::Info => dim(&message),
        Severity::Success => green(&format!("✓ {message}")),
        Severity::Warning => yellow(&format!("⚠ {message}")),
        Severity::Error => red(&format!("✗ {message}")),
    };
    eprintln!("{line}");

    let Some(table) = report.table.as_ref().filter(|t| !t.is_empty()) else {
        return;
    };

    let width = table
        .iter()
        .map(|r| r.token.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    println!(
        "{}",
        bold(&format!("{:>4}  {:<width$}  {:>6}  {:>6}", "Rank", "Word", "Count", "Share"))
    );
    for (i, row) in table.iter().enumerate() {
        println!(
            "{:>4}  {:<width$}  {:>6}  {:>5.1}%",
            i + 1,
            row.token,
            row.count,
            table.percentage(i).unwrap_or(0.0)
        );
    }

    if !quiet {
        eprintln!(
            "{}",
            dim(&format!(
                "{} words, {} distinct, {} pages, {}ms",
                report.total_tokens, report.distinct_tokens, report.pages, report.stats.total_ms
            ))
        );
    }
}
