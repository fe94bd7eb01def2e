//! End-to-end entry points: one call runs `acquire → analyze → render`.
//!
//! Every run is a pure function of its input and the configuration. Nothing
//! is cached between runs and no state is shared, so the server can call
//! [`run`] from any number of blocking tasks at once.

use crate::config::AnalysisConfig;
use crate::error::TextLensError;
use crate::output::{AnalysisReport, RunStats};
use crate::pipeline::acquire::{self, Acquisition};
use crate::pipeline::analyze;
use crate::pipeline::extract::PageTextExtractor;
use crate::pipeline::input::{self, RawTextSource};
use crate::pipeline::render::{self, SvgVisualizer, Visualizer};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Run the full pipeline with the backends selected in `config`.
///
/// Never fails: a PDF that cannot be read shows up as
/// [`crate::AcquisitionStatus::ExtractionError`] in the report.
pub fn run(source: Option<RawTextSource>, config: &AnalysisConfig) -> AnalysisReport {
    let visualizer = SvgVisualizer::from_config(config);
    let total_start = Instant::now();

    // ── Step 1: Acquire ──────────────────────────────────────────────────
    let acquire_start = Instant::now();
    let acquisition = acquire::acquire(source, config);
    let acquire_ms = acquire_start.elapsed().as_millis() as u64;

    finish(acquisition, config, &visualizer, total_start, acquire_ms)
}

/// Run the full pipeline with an explicit extractor and visualizer.
pub fn run_with(
    source: Option<RawTextSource>,
    config: &AnalysisConfig,
    extractor: &dyn PageTextExtractor,
    visualizer: &dyn Visualizer,
) -> AnalysisReport {
    let total_start = Instant::now();

    let acquire_start = Instant::now();
    let acquisition = acquire::acquire_with(extractor, source, config.password.as_deref());
    let acquire_ms = acquire_start.elapsed().as_millis() as u64;

    finish(acquisition, config, visualizer, total_start, acquire_ms)
}

/// Read a local PDF and run the pipeline over it.
///
/// # Errors
/// Only file-system problems are errors (missing file, permission denied).
/// Anything wrong with the bytes themselves lands in the report status.
pub fn run_file(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<AnalysisReport, TextLensError> {
    let path = path.as_ref();
    info!("Analysing {}", path.display());
    let bytes = input::read_pdf_file(path)?;
    Ok(run(input::select_source(Some(bytes), None), config))
}

/// Run the pipeline over literal text.
pub fn run_text(text: impl Into<String>, config: &AnalysisConfig) -> AnalysisReport {
    run(input::select_source(None, Some(text.into())), config)
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn finish(
    acquisition: Acquisition,
    config: &AnalysisConfig,
    visualizer: &dyn Visualizer,
    total_start: Instant,
    acquire_ms: u64,
) -> AnalysisReport {
    let notice = acquisition.notice();
    let mut stats = RunStats {
        acquire_ms,
        ..RunStats::default()
    };

    if !acquisition.is_analyzable() {
        debug!("Nothing to analyse: {}", notice);
        stats.total_ms = total_start.elapsed().as_millis() as u64;
        return AnalysisReport {
            source: acquisition.source,
            status: acquisition.status,
            notice,
            pages: acquisition.pages,
            table: None,
            total_tokens: 0,
            distinct_tokens: 0,
            charts: None,
            stats,
        };
    }

    // ── Step 2: Analyse ──────────────────────────────────────────────────
    let analyze_start = Instant::now();
    let analysis = analyze::analyze(acquisition.blob.as_str(), config.top_n);
    stats.analyze_ms = analyze_start.elapsed().as_millis() as u64;
    debug!(
        "{} tokens, {} distinct, {} ranked",
        analysis.total_tokens,
        analysis.distinct_tokens,
        analysis.table.len()
    );

    // ── Step 3: Render ───────────────────────────────────────────────────
    let charts = if config.render_charts {
        let render_start = Instant::now();
        let charts = render::render_all(visualizer, &acquisition.blob, &analysis.table);
        stats.render_ms = render_start.elapsed().as_millis() as u64;
        charts
    } else {
        None
    };

    stats.total_ms = total_start.elapsed().as_millis() as u64;
    info!(
        "Analysis complete: {} tokens, top {} of {} distinct, {}ms total",
        analysis.total_tokens,
        analysis.table.len(),
        analysis.distinct_tokens,
        stats.total_ms
    );

    AnalysisReport {
        source: acquisition.source,
        status: acquisition.status,
        notice,
        pages: acquisition.pages,
        table: Some(analysis.table),
        total_tokens: analysis.total_tokens,
        distinct_tokens: analysis.distinct_tokens,
        charts,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Notice;
    use crate::pipeline::acquire::AcquisitionStatus;

    #[test]
    fn pasted_text_runs_everything() {
        let report = run_text("b a b a c", &AnalysisConfig::default());
        assert_eq!(report.status, AcquisitionStatus::Success);
        assert_eq!(report.notice, Notice::UsingPastedText);
        let table = report.table.as_ref().unwrap();
        let pairs: Vec<_> = table.pairs().collect();
        assert_eq!(pairs, vec![("b", 2), ("a", 2), ("c", 1)]);
        let charts = report.charts.unwrap();
        assert!(charts.word_cloud.is_some() && charts.pie.is_some() && charts.bar.is_some());
    }

    #[test]
    fn empty_text_skips_analysis() {
        let report = run_text("", &AnalysisConfig::default());
        assert_eq!(report.status, AcquisitionStatus::EmptyInput);
        assert_eq!(report.notice, Notice::Idle);
        assert!(report.table.is_none());
        assert!(report.charts.is_none());
        assert!(!report.has_results());
    }

    #[test]
    fn render_can_be_switched_off() {
        let config = AnalysisConfig::builder().render_charts(false).build().unwrap();
        let report = run_text("one two two", &config);
        assert!(report.has_results());
        assert!(report.charts.is_none());
    }

    #[test]
    fn top_n_is_honoured() {
        let config = AnalysisConfig::builder().top_n(2).build().unwrap();
        let report = run_text("a b c d a b a", &config);
        assert_eq!(report.table.unwrap().len(), 2);
        assert_eq!(report.distinct_tokens, 4);
        assert_eq!(report.total_tokens, 7);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = run_file("/definitely/not/here.pdf", &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, TextLensError::FileNotFound { .. }));
    }

    #[test]
    fn garbage_file_is_a_status_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        let report = run_file(&path, &AnalysisConfig::default()).unwrap();
        assert!(matches!(report.status, AcquisitionStatus::ExtractionError(_)));
        assert!(report.table.is_none());
    }

    #[test]
    fn report_serialises_status_inline() {
        let report = run_text("hi hi", &AnalysisConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["table"][0]["token"], "hi");
        assert_eq!(json["table"][0]["count"], 2);
    }
}
