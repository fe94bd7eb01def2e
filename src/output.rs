//! Result types handed to callers: the status notice and the full run report.

use crate::pipeline::acquire::{AcquisitionStatus, SourceKind};
use crate::pipeline::analyze::TokenFrequencyTable;
use crate::pipeline::render::RenderedCharts;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How loudly a notice should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// The status line shown next to the input controls.
///
/// Exactly one is shown per run. `Idle` is the neutral prompt when nothing
/// was supplied; the other four map one-to-one onto acquisition outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Notice {
    Idle,
    PdfExtracted,
    UsingPastedText,
    NoExtractableText,
    ExtractionFailed(String),
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::Idle => Severity::Info,
            Notice::PdfExtracted | Notice::UsingPastedText => Severity::Success,
            Notice::NoExtractableText => Severity::Warning,
            Notice::ExtractionFailed(_) => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::Idle => {
                "Please upload a PDF or enter some text to begin visualizing.".to_string()
            }
            Notice::PdfExtracted => "PDF text extracted successfully!".to_string(),
            Notice::UsingPastedText => "Using manually entered text.".to_string(),
            Notice::NoExtractableText => "No extractable text found in the PDF.".to_string(),
            Notice::ExtractionFailed(cause) => format!("Error reading PDF: {cause}"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Wall-clock timings of one run, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub acquire_ms: u64,
    pub analyze_ms: u64,
    pub render_ms: u64,
    pub total_ms: u64,
}

/// Everything one `acquire → analyze → render` run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// `None` when no input was given.
    pub source: Option<SourceKind>,
    #[serde(flatten)]
    pub status: AcquisitionStatus,
    pub notice: Notice,
    /// PDF pages read (0 for pasted text).
    pub pages: usize,
    /// Present only when acquisition succeeded and the blob had tokens.
    pub table: Option<TokenFrequencyTable>,
    pub total_tokens: usize,
    pub distinct_tokens: usize,
    /// Present only when a table exists and chart rendering is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<RenderedCharts>,
    pub stats: RunStats,
}

impl AnalysisReport {
    /// Whether there is anything to chart.
    pub fn has_results(&self) -> bool {
        self.table.as_ref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_severities() {
        assert_eq!(Notice::Idle.severity(), Severity::Info);
        assert_eq!(Notice::PdfExtracted.severity(), Severity::Success);
        assert_eq!(Notice::UsingPastedText.severity(), Severity::Success);
        assert_eq!(Notice::NoExtractableText.severity(), Severity::Warning);
        assert_eq!(
            Notice::ExtractionFailed("x".into()).severity(),
            Severity::Error
        );
    }

    #[test]
    fn extraction_failure_message_includes_cause() {
        let n = Notice::ExtractionFailed("invalid file header".into());
        assert_eq!(n.to_string(), "Error reading PDF: invalid file header");
    }

    #[test]
    fn notice_serialises_tagged() {
        let json = serde_json::to_string(&Notice::NoExtractableText).unwrap();
        assert_eq!(json, r#"{"kind":"no_extractable_text"}"#);
    }
}
