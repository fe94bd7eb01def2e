//! Configuration types for a text analysis run.
//!
//! All pipeline behaviour is controlled through [`AnalysisConfig`], built via
//! [`AnalysisConfigBuilder`]. The dashboard shares one config between requests
//! behind an `Arc`; nothing in it is mutated after `build()`.

use crate::error::TextLensError;
use serde::{Deserialize, Serialize};

/// Default number of rows kept in the frequency table.
pub const DEFAULT_TOP_N: usize = 10;

/// Upper bound for `top_n`; the pie chart becomes unreadable long before this.
pub const MAX_TOP_N: usize = 100;

/// Configuration for a text analysis run.
///
/// # Example
/// ```rust
/// use textlens::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .top_n(15)
///     .word_cloud_size(800, 400)
///     .build()
///     .unwrap();
/// assert_eq!(config.top_n, 15);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Rows kept in the frequency table. Range: 1–100. Default: 10.
    pub top_n: usize,

    /// Which parser pulls text out of PDF pages. Default: [`ExtractorBackend::Lopdf`].
    pub backend: ExtractorBackend,

    /// User password for encrypted PDFs. `None` tries the empty password.
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Word-cloud canvas and sizing.
    pub word_cloud: WordCloudOptions,

    /// Pie and bar chart canvas width in pixels. Default: 480.
    pub chart_width: u32,

    /// Pie and bar chart canvas height in pixels. Default: 360.
    pub chart_height: u32,

    /// Render the three charts after analysis. Default: true.
    ///
    /// The JSON API and `analyze --json` turn this off unless charts are
    /// explicitly requested.
    pub render_charts: bool,

    /// Largest accepted upload, in bytes. Default: 20 MiB.
    pub max_upload_bytes: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            backend: ExtractorBackend::default(),
            password: None,
            word_cloud: WordCloudOptions::default(),
            chart_width: 480,
            chart_height: 360,
            render_charts: true,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n.clamp(1, MAX_TOP_N);
        self
    }

    pub fn backend(mut self, backend: ExtractorBackend) -> Self {
        self.config.backend = backend;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn word_cloud(mut self, options: WordCloudOptions) -> Self {
        self.config.word_cloud = options;
        self
    }

    pub fn word_cloud_size(mut self, width: u32, height: u32) -> Self {
        self.config.word_cloud.width = width.max(50);
        self.config.word_cloud.height = height.max(50);
        self
    }

    /// Pie and bar canvas size, at least 100 px each way.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.config.chart_width = width.max(100);
        self.config.chart_height = height.max(100);
        self
    }

    pub fn render_charts(mut self, v: bool) -> Self {
        self.config.render_charts = v;
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, TextLensError> {
        let c = &self.config;
        if c.top_n == 0 || c.top_n > MAX_TOP_N {
            return Err(TextLensError::InvalidConfig(format!(
                "top_n must be 1–{MAX_TOP_N}, got {}",
                c.top_n
            )));
        }
        if c.max_upload_bytes < 1024 {
            return Err(TextLensError::InvalidConfig(format!(
                "max_upload_bytes must be at least 1 KiB, got {}",
                c.max_upload_bytes
            )));
        }
        let wc = &c.word_cloud;
        if wc.max_words == 0 {
            return Err(TextLensError::InvalidConfig(
                "word cloud max_words must be ≥ 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&wc.relative_scaling) {
            return Err(TextLensError::InvalidConfig(format!(
                "word cloud relative_scaling must be 0.0–1.0, got {}",
                wc.relative_scaling
            )));
        }
        if wc.min_font_size == 0 || wc.min_font_size > wc.height {
            return Err(TextLensError::InvalidConfig(format!(
                "word cloud min_font_size must be 1–{}, got {}",
                wc.height, wc.min_font_size
            )));
        }
        if !c.backend.is_available() {
            return Err(TextLensError::InvalidConfig(format!(
                "backend '{}' requires building with the `pdfium` feature",
                c.backend.name()
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// PDF text extraction backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorBackend {
    /// Pure-Rust parser. Always compiled in. (default)
    #[default]
    Lopdf,
    /// pdfium via `pdfium-render`; needs the `pdfium` feature and libpdfium at runtime.
    Pdfium,
}

impl ExtractorBackend {
    pub fn name(&self) -> &'static str {
        match self {
            ExtractorBackend::Lopdf => "lopdf",
            ExtractorBackend::Pdfium => "pdfium",
        }
    }

    /// Whether this backend was compiled into the current build.
    pub fn is_available(&self) -> bool {
        match self {
            ExtractorBackend::Lopdf => true,
            ExtractorBackend::Pdfium => cfg!(feature = "pdfium"),
        }
    }
}

/// Word-cloud canvas and sizing knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudOptions {
    /// Canvas width in pixels. Default: 600.
    pub width: u32,
    /// Canvas height in pixels. Default: 300.
    pub height: u32,
    /// Most words drawn. Default: 200.
    pub max_words: usize,
    /// Smallest font size tried before layout stops. Default: 4.
    pub min_font_size: u32,
    /// Font size of the most frequent word. `None` derives it from the canvas height.
    pub max_font_size: Option<u32>,
    /// How strongly frequency drives size, 0.0 (rank only) to 1.0 (proportional). Default: 0.5.
    pub relative_scaling: f32,
    /// CSS colour of the canvas. Default: "white".
    pub background: String,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
            max_words: 200,
            min_font_size: 4,
            max_font_size: None,
            relative_scaling: 0.5,
            background: "white".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_layout() {
        let c = AnalysisConfig::default();
        assert_eq!(c.top_n, 10);
        assert_eq!(c.word_cloud.width, 600);
        assert_eq!(c.word_cloud.height, 300);
        assert_eq!(c.backend, ExtractorBackend::Lopdf);
        assert!(c.render_charts);
    }

    #[test]
    fn top_n_is_clamped() {
        let c = AnalysisConfig::builder().top_n(0).build().unwrap();
        assert_eq!(c.top_n, 1);
        let c = AnalysisConfig::builder().top_n(5000).build().unwrap();
        assert_eq!(c.top_n, MAX_TOP_N);
    }

    #[test]
    fn chart_size_has_a_floor() {
        let c = AnalysisConfig::builder().chart_size(40, 500).build().unwrap();
        assert_eq!((c.chart_width, c.chart_height), (100, 500));
    }

    #[test]
    fn rejects_bad_relative_scaling() {
        let opts = WordCloudOptions {
            relative_scaling: 1.5,
            ..WordCloudOptions::default()
        };
        let err = AnalysisConfig::builder().word_cloud(opts).build().unwrap_err();
        assert!(err.to_string().contains("relative_scaling"));
    }

    #[test]
    fn rejects_tiny_upload_limit() {
        let err = AnalysisConfig::builder()
            .max_upload_bytes(10)
            .build()
            .unwrap_err();
        assert!(matches!(err, TextLensError::InvalidConfig(_)));
    }

    #[cfg(not(feature = "pdfium"))]
    #[test]
    fn pdfium_backend_needs_feature() {
        let err = AnalysisConfig::builder()
            .backend(ExtractorBackend::Pdfium)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("pdfium"));
    }

    #[test]
    fn password_is_not_serialised() {
        let c = AnalysisConfig::builder().password("hunter2").build().unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"backend\":\"lopdf\""));
    }
}
