//! # textlens
//!
//! Turn a PDF or a block of pasted text into a word-frequency summary: a
//! word cloud, a pie chart and a bar chart of the most frequent tokens.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes / pasted text
//!  │
//!  ├─ 1. Acquire  extract page text (lopdf, or pdfium with the feature) and
//!  │              classify the outcome: Success / EmptyInput / ExtractionError
//!  ├─ 2. Analyze  lower-case, split on whitespace, count, rank top N
//!  │              (ties keep first-seen order)
//!  ├─ 3. Render   word cloud from the full text, pie + bar from the table
//!  └─ 4. Report   notice, table, totals, charts, timings
//! ```
//!
//! Only acquisition can fail, and it never returns `Err`: a broken PDF shows
//! up as a status value with the parser's message, and nothing downstream
//! runs.
//!
//! ## Quick Start
//!
//! ```rust
//! use textlens::{run_text, AnalysisConfig};
//!
//! let report = run_text("to be or not to be", &AnalysisConfig::default());
//! let table = report.table.expect("text was analysed");
//! assert_eq!(table.rows()[0].token, "to");
//! assert_eq!(table.rows()[0].count, 2);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | The `textlens` binary (clap + anyhow + tracing-subscriber) |
//! | `server` | on      | The axum dashboard in [`server`] |
//! | `pdfium` | off     | [`pipeline::extract::PdfiumExtractor`] via pdfium-render |
//!
//! Library-only use:
//! ```toml
//! textlens = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod charts;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod run;
#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{AnalysisConfig, AnalysisConfigBuilder, ExtractorBackend, WordCloudOptions};
pub use error::TextLensError;
pub use output::{AnalysisReport, Notice, RunStats, Severity};
pub use pipeline::acquire::{AcquisitionStatus, SourceKind, TextBlob};
pub use pipeline::analyze::{analyze, FrequencyMap, TokenCount, TokenFrequencyTable};
pub use pipeline::extract::{LopdfExtractor, PageTextExtractor};
pub use pipeline::input::RawTextSource;
pub use pipeline::render::{Chart, ChartKind, RenderedCharts, SvgVisualizer, Visualizer};
pub use run::{run, run_file, run_text, run_with};
