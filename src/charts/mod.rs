//! SVG chart generators used by the built-in visualizer.
//!
//! Each generator takes plain data (a blob or a ranked table) plus a canvas
//! size and returns a standalone SVG document as a `String`. They know
//! nothing about acquisition or HTTP; [`crate::pipeline::render`] wires them
//! to the pipeline.

pub mod bar;
pub mod pie;
pub mod svg;
pub mod wordcloud;
