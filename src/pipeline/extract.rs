//! Page text extraction backends.
//!
//! [`PageTextExtractor`] is the seam between acquisition and whatever parser
//! reads the PDF. A backend only has to return one string per page, in page
//! order; joining, blank-page handling and status mapping live in
//! [`crate::pipeline::acquire`].
//!
//! | Backend | Build | Runtime needs |
//! |---------|-------|---------------|
//! | [`LopdfExtractor`] | always | nothing |
//! | `PdfiumExtractor`  | `--features pdfium` | libpdfium (`PDFIUM_LIB_PATH` or system library) |

use crate::config::ExtractorBackend;
use crate::error::TextLensError;
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info};

/// Reads the text of every page of a PDF held in memory.
///
/// Implementations must be `Send + Sync`; the dashboard shares one extractor
/// across blocking worker threads.
pub trait PageTextExtractor: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Return one entry per page, in page order.
    ///
    /// A page without text yields an empty (or whitespace-only) string, not
    /// an error. Any parse or decode fault is an error and aborts the document.
    fn extract_pages(
        &self,
        bytes: &[u8],
        password: Option<&str>,
    ) -> Result<Vec<String>, TextLensError>;
}

/// Build the extractor selected in the config.
pub fn extractor_for(
    backend: ExtractorBackend,
) -> Result<Box<dyn PageTextExtractor>, TextLensError> {
    match backend {
        ExtractorBackend::Lopdf => Ok(Box::new(LopdfExtractor)),
        #[cfg(feature = "pdfium")]
        ExtractorBackend::Pdfium => Ok(Box::new(pdfium_backend::PdfiumExtractor)),
        #[cfg(not(feature = "pdfium"))]
        ExtractorBackend::Pdfium => Err(TextLensError::BackendUnavailable {
            backend: "pdfium",
            detail: "this build was compiled without the `pdfium` feature".into(),
        }),
    }
}

/// Run an extractor, turning a parser panic into an ordinary error.
///
/// Hostile or truncated documents occasionally trip assertions deep inside
/// PDF parsers. Whatever happens, acquisition must come back with a status.
pub fn extract_guarded(
    extractor: &dyn PageTextExtractor,
    bytes: &[u8],
    password: Option<&str>,
) -> Result<Vec<String>, TextLensError> {
    panic::catch_unwind(AssertUnwindSafe(|| extractor.extract_pages(bytes, password)))
        .unwrap_or_else(|payload| {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser panicked".to_string());
            Err(TextLensError::ExtractorPanicked { detail })
        })
}

// ── lopdf ────────────────────────────────────────────────────────────────

/// Pure-Rust extraction via `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PageTextExtractor for LopdfExtractor {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_pages(
        &self,
        bytes: &[u8],
        password: Option<&str>,
    ) -> Result<Vec<String>, TextLensError> {
        let mut document = Document::load_mem(bytes).map_err(|e| TextLensError::CorruptPdf {
            detail: e.to_string(),
        })?;

        if document.is_encrypted() {
            document
                .decrypt(password.unwrap_or(""))
                .map_err(|e| {
                    debug!("Decryption failed: {}", e);
                    TextLensError::PasswordRequired
                })?;
        }

        // BTreeMap keyed by 1-based page number, so iteration is page order.
        let pages = document.get_pages();
        info!("PDF loaded: {} pages", pages.len());

        let mut texts = Vec::with_capacity(pages.len());
        for &page_number in pages.keys() {
            let text = document.extract_text(&[page_number]).map_err(|e| {
                TextLensError::PageDecodeFailed {
                    page: page_number as usize,
                    detail: e.to_string(),
                }
            })?;
            debug!("Page {}: {} chars", page_number, text.chars().count());
            texts.push(text);
        }

        Ok(texts)
    }
}

// ── pdfium ───────────────────────────────────────────────────────────────

#[cfg(feature = "pdfium")]
pub use pdfium_backend::PdfiumExtractor;

#[cfg(feature = "pdfium")]
mod pdfium_backend {
    use super::PageTextExtractor;
    use crate::error::TextLensError;
    use pdfium_render::prelude::*;
    use tracing::{debug, info};

    /// Extraction via pdfium. Binds the library on every call, so a missing
    /// libpdfium is reported per request instead of at startup.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct PdfiumExtractor;

    impl PdfiumExtractor {
        fn bind() -> Result<Pdfium, TextLensError> {
            let bindings = match std::env::var("PDFIUM_LIB_PATH") {
                Ok(path) if !path.is_empty() => Pdfium::bind_to_library(&path),
                _ => Pdfium::bind_to_system_library(),
            }
            .map_err(|e| TextLensError::BackendUnavailable {
                backend: "pdfium",
                detail: format!("{:?}", e),
            })?;
            Ok(Pdfium::new(bindings))
        }
    }

    impl PageTextExtractor for PdfiumExtractor {
        fn name(&self) -> &'static str {
            "pdfium"
        }

        fn extract_pages(
            &self,
            bytes: &[u8],
            password: Option<&str>,
        ) -> Result<Vec<String>, TextLensError> {
            let pdfium = Self::bind()?;

            let document = pdfium
                .load_pdf_from_byte_slice(bytes, password)
                .map_err(|e| {
                    let err_str = format!("{:?}", e);
                    if err_str.contains("Password") || err_str.contains("password") {
                        TextLensError::PasswordRequired
                    } else {
                        TextLensError::CorruptPdf { detail: err_str }
                    }
                })?;

            let pages = document.pages();
            info!("PDF loaded: {} pages", pages.len());

            let mut texts = Vec::with_capacity(pages.len() as usize);
            for (index, page) in pages.iter().enumerate() {
                let text = page.text().map_err(|e| TextLensError::PageDecodeFailed {
                    page: index + 1,
                    detail: format!("{:?}", e),
                })?;
                let all = text.all();
                debug!("Page {}: {} chars", index + 1, all.chars().count());
                texts.push(all);
            }

            Ok(texts)
        }
    }
}
