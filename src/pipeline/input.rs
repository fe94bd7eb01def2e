//! Input selection: turn whatever the user supplied into one [`RawTextSource`].
//!
//! A run may receive a PDF upload, pasted text, both, or neither. The PDF
//! always wins when present. Empty uploads (a browser submits an empty file
//! part when no file was chosen) and blank pasted text count as absent, so
//! "neither" covers every way of giving no input.

use crate::error::TextLensError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The raw user input for one run. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub enum RawTextSource {
    /// Bytes of an uploaded PDF document.
    PdfUpload(Vec<u8>),
    /// Text pasted into the form (or passed on the command line).
    PastedText(String),
}

impl std::fmt::Debug for RawTextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawTextSource::PdfUpload(bytes) => {
                write!(f, "PdfUpload(<{} bytes>)", bytes.len())
            }
            RawTextSource::PastedText(text) => {
                write!(f, "PastedText(<{} chars>)", text.chars().count())
            }
        }
    }
}

/// Pick the source for this run. PDF takes precedence over pasted text.
///
/// Returns `None` when neither input carries anything.
pub fn select_source(pdf: Option<Vec<u8>>, pasted: Option<String>) -> Option<RawTextSource> {
    match (pdf, pasted) {
        (Some(bytes), _) if !bytes.is_empty() => {
            debug!("Selected PDF upload ({} bytes)", bytes.len());
            Some(RawTextSource::PdfUpload(bytes))
        }
        (_, Some(text)) if !text.trim().is_empty() => {
            debug!("Selected pasted text ({} bytes)", text.len());
            Some(RawTextSource::PastedText(text))
        }
        _ => None,
    }
}

/// Check the `%PDF` magic bytes.
pub fn is_pdf_bytes(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

/// Reject byte streams that are clearly not PDF documents before any parser sees them.
pub fn check_magic(bytes: &[u8]) -> Result<(), TextLensError> {
    if is_pdf_bytes(bytes) {
        Ok(())
    } else {
        Err(TextLensError::NotAPdf {
            magic: bytes.iter().take(4).copied().collect(),
        })
    }
}

/// Read a local PDF file into memory.
///
/// The file handle is closed before this returns; only the bytes travel on.
pub fn read_pdf_file(path: &Path) -> Result<Vec<u8>, TextLensError> {
    let path_buf = PathBuf::from(path);
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!("Read {} bytes from {}", bytes.len(), path.display());
            Ok(bytes)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TextLensError::FileNotFound { path: path_buf })
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(TextLensError::PermissionDenied { path: path_buf })
        }
        Err(source) => Err(TextLensError::ReadFailed {
            path: path_buf,
            source,
        }),
    }
}
