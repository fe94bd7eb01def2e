//! Pipeline stages for turning a document into word-frequency charts.
//!
//! Each submodule implements exactly one step. Acquisition is the only one
//! that touches untrusted bytes, and it never returns `Err`; the stages after
//! it only branch on its status value.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ acquire ──▶ analyze ──▶ render ──▶ encode
//! (select)  (per page)  (blob +     (ranked     (3 SVG     (data: URI)
//!                        status)     table)      charts)
//! ```
//!
//! 1. [`input`]   : pick PDF or pasted text; `%PDF` magic check
//! 2. [`extract`] : pluggable per-page text extraction (lopdf, optional pdfium)
//! 3. [`acquire`] : join pages into a [`acquire::TextBlob`] and classify the outcome
//! 4. [`analyze`] : lower-case, split on whitespace, count, rank top N
//! 5. [`render`]  : word cloud, pie and bar through a [`render::Visualizer`]
//! 6. [`encode`]  : base64 `data:` URIs for inline display

pub mod acquire;
pub mod analyze;
pub mod encode;
pub mod extract;
pub mod input;
pub mod render;
