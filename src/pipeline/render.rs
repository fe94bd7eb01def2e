//! Chart rendering: fan the analysis out to three independent renderers.
//!
//! The pipeline only talks to a [`Visualizer`]; it hands over the blob (word
//! cloud) and the ranked table (pie, bar) and gets back opaque [`Chart`]
//! handles it never inspects. [`SvgVisualizer`] is the built-in
//! implementation backed by [`crate::charts`].
//!
//! A failing renderer costs only its own chart: the other two are still
//! produced, and the failure is logged.

use crate::charts;
use crate::config::{AnalysisConfig, WordCloudOptions};
use crate::error::TextLensError;
use crate::pipeline::acquire::TextBlob;
use crate::pipeline::analyze::TokenFrequencyTable;
use crate::pipeline::encode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which of the three summaries a chart is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    WordCloud,
    Pie,
    Bar,
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::WordCloud => "word cloud",
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
        }
    }
}

/// A rendered image, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
    pub content: String,
}

impl Chart {
    pub fn svg(kind: ChartKind, width: u32, height: u32, content: String) -> Self {
        Self {
            kind,
            width,
            height,
            mime_type: "image/svg+xml".to_string(),
            content,
        }
    }

    /// `data:` URI for embedding in an `<img>` tag.
    pub fn data_uri(&self) -> String {
        encode::data_uri(&self.mime_type, self.content.as_bytes())
    }
}

/// The three summaries of one run. A `None` chart failed to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedCharts {
    pub word_cloud: Option<Chart>,
    pub pie: Option<Chart>,
    pub bar: Option<Chart>,
}

/// Renders the three summaries. Implementations must be `Send + Sync`.
pub trait Visualizer: Send + Sync {
    /// Image generated from the full text; tokenizes on its own.
    fn word_cloud(&self, blob: &TextBlob) -> Result<Chart, TextLensError>;

    /// Proportional slices with percentage labels.
    fn pie(&self, table: &TokenFrequencyTable) -> Result<Chart, TextLensError>;

    /// Vertical bars indexed by token.
    fn bar(&self, table: &TokenFrequencyTable) -> Result<Chart, TextLensError>;
}

/// Built-in visualizer producing SVG documents.
#[derive(Debug, Clone)]
pub struct SvgVisualizer {
    pub word_cloud: WordCloudOptions,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl SvgVisualizer {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            word_cloud: config.word_cloud.clone(),
            chart_width: config.chart_width,
            chart_height: config.chart_height,
        }
    }
}

impl Default for SvgVisualizer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

fn render_failed(kind: ChartKind) -> impl FnOnce(std::fmt::Error) -> TextLensError {
    move |e| TextLensError::RenderFailed {
        chart: kind.name(),
        detail: e.to_string(),
    }
}

impl Visualizer for SvgVisualizer {
    fn word_cloud(&self, blob: &TextBlob) -> Result<Chart, TextLensError> {
        let svg = charts::wordcloud::render(blob.as_str(), &self.word_cloud)
            .map_err(render_failed(ChartKind::WordCloud))?;
        Ok(Chart::svg(
            ChartKind::WordCloud,
            self.word_cloud.width,
            self.word_cloud.height,
            svg,
        ))
    }

    fn pie(&self, table: &TokenFrequencyTable) -> Result<Chart, TextLensError> {
        let svg = charts::pie::render(table, self.chart_width, self.chart_height)
            .map_err(render_failed(ChartKind::Pie))?;
        Ok(Chart::svg(ChartKind::Pie, self.chart_width, self.chart_height, svg))
    }

    fn bar(&self, table: &TokenFrequencyTable) -> Result<Chart, TextLensError> {
        let svg = charts::bar::render(table, self.chart_width, self.chart_height)
            .map_err(render_failed(ChartKind::Bar))?;
        Ok(Chart::svg(ChartKind::Bar, self.chart_width, self.chart_height, svg))
    }
}

fn keep(kind: ChartKind, result: Result<Chart, TextLensError>) -> Option<Chart> {
    match result {
        Ok(chart) => {
            debug!("Rendered {} chart ({} bytes)", kind.name(), chart.content.len());
            Some(chart)
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Render all three summaries.
///
/// Returns `None` for an empty table: there is nothing to chart, and an
/// empty chart is never drawn.
pub fn render_all(
    visualizer: &dyn Visualizer,
    blob: &TextBlob,
    table: &TokenFrequencyTable,
) -> Option<RenderedCharts> {
    if table.is_empty() {
        return None;
    }
    Some(RenderedCharts {
        word_cloud: keep(ChartKind::WordCloud, visualizer.word_cloud(blob)),
        pie: keep(ChartKind::Pie, visualizer.pie(table)),
        bar: keep(ChartKind::Bar, visualizer.bar(table)),
    })
}
