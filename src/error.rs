//! Error types for the textlens library.
//!
//! [`TextLensError`] covers every fatal failure the library can report, but
//! most of them never reach a caller as `Err`. Acquisition catches extraction
//! failures at its boundary and folds them into
//! [`crate::pipeline::acquire::AcquisitionStatus::ExtractionError`], so the
//! analyzer and the chart renderers only ever see a status value.
//!
//! Errors that do surface as `Err`:
//!
//! * configuration validation ([`TextLensError::InvalidConfig`]),
//! * reading a PDF from disk in the CLI ([`TextLensError::FileNotFound`] and
//!   friends), since no byte stream exists yet to acquire from,
//! * binding or running the HTTP server.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the textlens library.
#[derive(Debug, Error)]
pub enum TextLensError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading an input file.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes do not start with the `%PDF` magic.
    #[error("not a PDF document (first bytes: {magic:?})")]
    NotAPdf { magic: Vec<u8> },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF could not be parsed: {detail}")]
    CorruptPdf { detail: String },

    /// The text of one page could not be decoded.
    #[error("failed to decode text on page {page}: {detail}")]
    PageDecodeFailed { page: usize, detail: String },

    /// PDF is encrypted and the configured password (empty by default) was rejected.
    #[error("PDF is encrypted and could not be opened with the configured password")]
    PasswordRequired,

    /// The selected extraction backend cannot be used in this build or environment.
    #[error("extraction backend '{backend}' is unavailable: {detail}")]
    BackendUnavailable {
        backend: &'static str,
        detail: String,
    },

    /// The extraction backend panicked while parsing the document.
    #[error("PDF parser aborted: {detail}")]
    ExtractorPanicked { detail: String },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// A chart could not be produced.
    #[error("failed to render {chart} chart: {detail}")]
    RenderFailed { chart: &'static str, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Server errors ─────────────────────────────────────────────────────
    /// Binding or serving the dashboard failed.
    #[error("dashboard server failed on {addr}: {source}")]
    Server {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_pdf_display_carries_detail() {
        let e = TextLensError::CorruptPdf {
            detail: "invalid file header".into(),
        };
        assert!(e.to_string().contains("invalid file header"), "got: {e}");
    }

    #[test]
    fn page_decode_display() {
        let e = TextLensError::PageDecodeFailed {
            page: 3,
            detail: "bad operator".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("page 3"));
        assert!(msg.contains("bad operator"));
    }

    #[test]
    fn not_a_pdf_shows_magic() {
        let e = TextLensError::NotAPdf {
            magic: b"GIF8".to_vec(),
        };
        assert!(e.to_string().contains("[71, 73, 70, 56]"));
    }
}
