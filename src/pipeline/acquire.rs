//! Text acquisition: turn a [`RawTextSource`] into a [`TextBlob`] plus an
//! [`AcquisitionStatus`].
//!
//! This is the only stage that can fail, and it never returns `Err`: every
//! parser fault is converted to [`AcquisitionStatus::ExtractionError`] here,
//! so analysis and rendering only branch on a status value.
//!
//! ```text
//! PdfUpload(bytes) ─▶ magic check ─▶ extractor (per page) ─▶ join non-blank pages
//! PastedText(s)    ─▶ verbatim
//! (nothing)        ─▶ empty blob, EmptyInput
//! ```

use crate::config::AnalysisConfig;
use crate::error::TextLensError;
use crate::output::Notice;
use crate::pipeline::extract::{self, PageTextExtractor};
use crate::pipeline::input::{self, RawTextSource};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// The full text of one run. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextBlob(String);

impl TextBlob {
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Join page texts with single spaces, skipping pages with no text.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut blob = String::new();
        for page in pages {
            let page = page.as_ref();
            if page.trim().is_empty() {
                continue;
            }
            if !blob.is_empty() {
                blob.push(' ');
            }
            blob.push_str(page);
        }
        Self(blob)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for TextBlob {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for TextBlob {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of acquisition. Gates whether analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum AcquisitionStatus {
    /// Usable text was produced.
    Success,
    /// No input, or a PDF with no extractable text. Not a fault.
    EmptyInput,
    /// The PDF could not be read; carries the underlying cause.
    ExtractionError(String),
}

impl AcquisitionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, AcquisitionStatus::Success)
    }
}

/// Where the blob came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Pdf,
    Pasted,
}

/// Result of one acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    /// `None` when no input was given.
    pub source: Option<SourceKind>,
    /// Empty unless `status` is `Success`.
    pub blob: TextBlob,
    pub status: AcquisitionStatus,
    /// Pages read from the PDF (0 for pasted text or on error).
    pub pages: usize,
}

impl Acquisition {
    fn idle() -> Self {
        Self {
            source: None,
            blob: TextBlob::empty(),
            status: AcquisitionStatus::EmptyInput,
            pages: 0,
        }
    }

    fn failed(err: &TextLensError) -> Self {
        Self {
            source: Some(SourceKind::Pdf),
            blob: TextBlob::empty(),
            status: AcquisitionStatus::ExtractionError(err.to_string()),
            pages: 0,
        }
    }

    /// Whether the analyzer should run on this blob.
    pub fn is_analyzable(&self) -> bool {
        self.status.is_success() && !self.blob.is_blank()
    }

    /// The user-facing notice for this outcome.
    pub fn notice(&self) -> Notice {
        match (&self.status, self.source) {
            (AcquisitionStatus::Success, Some(SourceKind::Pdf)) => Notice::PdfExtracted,
            (AcquisitionStatus::Success, _) => Notice::UsingPastedText,
            (AcquisitionStatus::EmptyInput, Some(SourceKind::Pdf)) => Notice::NoExtractableText,
            (AcquisitionStatus::EmptyInput, _) => Notice::Idle,
            (AcquisitionStatus::ExtractionError(msg), _) => Notice::ExtractionFailed(msg.clone()),
        }
    }
}

/// Acquire text using the backend selected in `config`.
pub fn acquire(source: Option<RawTextSource>, config: &AnalysisConfig) -> Acquisition {
    match source {
        Some(RawTextSource::PdfUpload(bytes)) => match extract::extractor_for(config.backend) {
            Ok(extractor) => acquire_pdf(extractor.as_ref(), &bytes, config.password.as_deref()),
            Err(e) => {
                warn!("Extraction backend unavailable: {}", e);
                Acquisition::failed(&e)
            }
        },
        other => acquire_with(&extract::LopdfExtractor, other, config.password.as_deref()),
    }
}

/// Acquire text with an explicit extractor.
pub fn acquire_with(
    extractor: &dyn PageTextExtractor,
    source: Option<RawTextSource>,
    password: Option<&str>,
) -> Acquisition {
    match source {
        Some(RawTextSource::PdfUpload(bytes)) => acquire_pdf(extractor, &bytes, password),
        Some(RawTextSource::PastedText(text)) if !text.trim().is_empty() => {
            debug!("Using pasted text ({} bytes)", text.len());
            Acquisition {
                source: Some(SourceKind::Pasted),
                blob: TextBlob::from(text),
                status: AcquisitionStatus::Success,
                pages: 0,
            }
        }
        Some(RawTextSource::PastedText(_)) | None => Acquisition::idle(),
    }
}

// `bytes` is borrowed from the caller's owned buffer, which is dropped when
// the caller's scope ends on every path, including the error paths below.
fn acquire_pdf(
    extractor: &dyn PageTextExtractor,
    bytes: &[u8],
    password: Option<&str>,
) -> Acquisition {
    if let Err(e) = input::check_magic(bytes) {
        warn!("Rejected upload: {}", e);
        return Acquisition::failed(&e);
    }

    let pages = match extract::extract_guarded(extractor, bytes, password) {
        Ok(pages) => pages,
        Err(e) => {
            warn!("PDF extraction failed ({}): {}", extractor.name(), e);
            return Acquisition::failed(&e);
        }
    };

    let page_count = pages.len();
    let blob = TextBlob::from_pages(&pages);
    if blob.is_blank() {
        info!("PDF has {} pages but no extractable text", page_count);
        return Acquisition {
            source: Some(SourceKind::Pdf),
            blob: TextBlob::empty(),
            status: AcquisitionStatus::EmptyInput,
            pages: page_count,
        };
    }

    info!(
        "Extracted {} bytes of text from {} pages via {}",
        blob.len(),
        page_count,
        extractor.name()
    );
    Acquisition {
        source: Some(SourceKind::Pdf),
        blob,
        status: AcquisitionStatus::Success,
        pages: page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed page texts, standing in for a parsed document.
    struct Pages(Vec<&'static str>);

    impl PageTextExtractor for Pages {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn extract_pages(&self, _: &[u8], _: Option<&str>) -> Result<Vec<String>, TextLensError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct Broken;

    impl PageTextExtractor for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn extract_pages(&self, _: &[u8], _: Option<&str>) -> Result<Vec<String>, TextLensError> {
            Err(TextLensError::PageDecodeFailed {
                page: 2,
                detail: "unknown font encoding".into(),
            })
        }
    }

    /// Opens only with the given password.
    struct Locked(&'static str);

    impl PageTextExtractor for Locked {
        fn name(&self) -> &'static str {
            "locked"
        }

        fn extract_pages(
            &self,
            _: &[u8],
            password: Option<&str>,
        ) -> Result<Vec<String>, TextLensError> {
            match password {
                Some(p) if p == self.0 => Ok(vec!["unlocked text".into()]),
                _ => Err(TextLensError::PasswordRequired),
            }
        }
    }

    fn pdf() -> Option<RawTextSource> {
        Some(RawTextSource::PdfUpload(b"%PDF-1.7 fake".to_vec()))
    }

    #[test]
    fn joins_pages_and_skips_empty_ones() {
        let acq = acquire_with(&Pages(vec!["Hello world", "", "Hello again"]), pdf(), None);
        assert_eq!(acq.status, AcquisitionStatus::Success);
        assert_eq!(acq.blob.as_str(), "Hello world Hello again");
        assert_eq!(acq.pages, 3);
        assert_eq!(acq.notice(), Notice::PdfExtracted);
    }

    #[test]
    fn pdf_without_text_is_empty_input() {
        let acq = acquire_with(&Pages(vec!["", "  \n", ""]), pdf(), None);
        assert_eq!(acq.status, AcquisitionStatus::EmptyInput);
        assert!(acq.blob.is_empty());
        assert_eq!(acq.notice(), Notice::NoExtractableText);
        assert!(!acq.is_analyzable());
    }

    #[test]
    fn extraction_error_carries_cause_and_no_blob() {
        let acq = acquire_with(&Broken, pdf(), None);
        match &acq.status {
            AcquisitionStatus::ExtractionError(msg) => {
                assert!(msg.contains("unknown font encoding"), "got: {msg}")
            }
            other => panic!("unexpected status: {other:?}"),
        }
        assert!(acq.blob.is_empty());
        assert!(matches!(acq.notice(), Notice::ExtractionFailed(_)));
    }

    #[test]
    fn rejected_password_is_an_extraction_error() {
        let acq = acquire_with(&Locked("s3cret"), pdf(), None);
        match &acq.status {
            AcquisitionStatus::ExtractionError(msg) => assert_eq!(
                msg,
                "PDF is encrypted and could not be opened with the configured password"
            ),
            other => panic!("unexpected status: {other:?}"),
        }
        assert!(acq.blob.is_empty());
        assert_eq!(
            acq.notice().message(),
            "Error reading PDF: PDF is encrypted and could not be opened with the configured password"
        );
    }

    #[test]
    fn configured_password_reaches_the_extractor() {
        let acq = acquire_with(&Locked("s3cret"), pdf(), Some("s3cret"));
        assert_eq!(acq.status, AcquisitionStatus::Success);
        assert_eq!(acq.blob.into_string(), "unlocked text");
    }

    #[test]
    fn non_pdf_bytes_never_reach_the_extractor() {
        let src = Some(RawTextSource::PdfUpload(b"<html>oops</html>".to_vec()));
        let acq = acquire_with(&Pages(vec!["should not be used"]), src, None);
        match acq.status {
            AcquisitionStatus::ExtractionError(msg) => assert!(msg.contains("not a PDF")),
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn pasted_text_is_verbatim() {
        let src = Some(RawTextSource::PastedText("Keep  THIS\tas is".into()));
        let acq = acquire_with(&Pages(vec![]), src, None);
        assert_eq!(acq.status, AcquisitionStatus::Success);
        assert_eq!(acq.blob.as_str(), "Keep  THIS\tas is");
        assert_eq!(acq.notice(), Notice::UsingPastedText);
    }

    #[test]
    fn empty_paste_is_idle() {
        let src = Some(RawTextSource::PastedText(String::new()));
        let acq = acquire_with(&Pages(vec![]), src, None);
        assert_eq!(acq.status, AcquisitionStatus::EmptyInput);
        assert_eq!(acq.source, None);
        assert_eq!(acq.notice(), Notice::Idle);
    }

    #[test]
    fn no_input_is_idle() {
        let acq = acquire(None, &AnalysisConfig::default());
        assert_eq!(acq.status, AcquisitionStatus::EmptyInput);
        assert_eq!(acq.notice(), Notice::Idle);
    }

    #[test]
    fn status_serialises_tagged() {
        let json = serde_json::to_string(&AcquisitionStatus::ExtractionError("boom".into())).unwrap();
        assert_eq!(json, r#"{"status":"extraction_error","message":"boom"}"#);
        let json = serde_json::to_string(&AcquisitionStatus::Success).unwrap();
        assert_eq!(json, r#"{"status":"success"}"#);
    }
}
