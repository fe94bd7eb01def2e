//! Word cloud: its own tokenizer, frequency-scaled font sizes and a
//! deterministic spiral layout.
//!
//! The cloud deliberately does not reuse the analyzer's tokens. It picks
//! words out of the raw blob with `\w[\w']*`, drops possessive `'s` and pure
//! numbers, and groups case variants, drawing each group in its most common
//! casing. So `"Data," "data" "DATA"` is three table tokens but one cloud word.
//!
//! ## Layout
//!
//! Words are placed largest first. Each word walks an outward spiral from
//! the canvas centre until its box fits without overlapping anything already
//! placed, horizontally first, then rotated. A word that fits nowhere is
//! retried smaller; once even `min_font_size` fails, layout stops, since
//! every remaining word is at most as large.
//!
//! Glyph boxes are estimated from character counts, and the SVG pins each
//! word's advance with `textLength`, so the estimate is what gets drawn.

use super::svg::{Anchor, SvgCanvas, TextStyle, VIRIDIS};
use crate::config::WordCloudOptions;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w[\w']*").unwrap());

/// Average advance of one glyph, as a fraction of the font size.
const GLYPH_WIDTH: f64 = 0.58;
/// Box height as a fraction of the font size.
const LINE_HEIGHT: f64 = 1.15;
/// Horizontal padding around each word, as a fraction of the font size.
const PADDING: f64 = 0.2;
/// Font shrink factor applied when a word does not fit.
const SHRINK: f64 = 0.85;
/// Spiral radius gained per radian.
const SPIRAL_GROWTH: f64 = 2.5;
/// Distance between successive spiral positions, in pixels.
const SPIRAL_STEP: f64 = 5.0;

/// A cloud word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordWeight {
    pub word: String,
    pub count: usize,
}

/// A word with its final position. `(x, y, width, height)` is the box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vertical: bool,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    fn inside(&self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.w <= width && self.y + self.h <= height
    }
}

/// Count cloud words in `text`, most frequent first, at most `max_words`.
pub fn cloud_words(text: &str, max_words: usize) -> Vec<WordWeight> {
    // lower-cased key → (casing → count), all in first-seen order
    let mut groups: IndexMap<String, IndexMap<String, usize>> = IndexMap::new();

    for m in RE_WORD.find_iter(text) {
        let raw = m.as_str();
        let word = raw
            .strip_suffix("'s")
            .or_else(|| raw.strip_suffix("'S"))
            .unwrap_or(raw)
            .trim_end_matches('\'');
        if word.is_empty() || word.chars().all(char::is_numeric) {
            continue;
        }
        *groups
            .entry(word.to_lowercase())
            .or_default()
            .entry(word.to_string())
            .or_insert(0) += 1;
    }

    let mut words: Vec<WordWeight> = groups
        .into_values()
        .map(|variants| {
            let count = variants.values().sum();
            let mut best: Option<(&String, usize)> = None;
            for (casing, &n) in &variants {
                if best.map_or(true, |(_, b)| n > b) {
                    best = Some((casing, n));
                }
            }
            let word = best.map(|(w, _)| w.clone()).unwrap_or_default();
            WordWeight { word, count }
        })
        .collect();

    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(max_words);
    words
}

fn color_for(word: &str) -> &'static str {
    // FNV-1a, so colours are stable across runs
    let hash = word
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |h, b| (h ^ b as u64).wrapping_mul(0x0100_0000_01b3));
    VIRIDIS[(hash % VIRIDIS.len() as u64) as usize]
}

fn spiral_search(w: f64, h: f64, width: f64, height: f64, placed: &[Rect]) -> Option<Rect> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    // stretch the spiral to the canvas aspect ratio
    let (ax, ay) = if width >= height {
        (width / height, 1.0)
    } else {
        (1.0, height / width)
    };
    let max_radius = width.max(height);

    let mut theta = 0.0f64;
    loop {
        let radius = SPIRAL_GROWTH * theta;
        if radius > max_radius {
            return None;
        }
        let candidate = Rect {
            x: cx + radius * theta.cos() * ax - w / 2.0,
            y: cy + radius * theta.sin() * ay - h / 2.0,
            w,
            h,
        };
        if candidate.inside(width, height) && !placed.iter().any(|r| r.intersects(&candidate)) {
            return Some(candidate);
        }
        theta += SPIRAL_STEP / radius.max(SPIRAL_STEP);
    }
}

fn find_spot(word: &str, size: f64, width: f64, height: f64, placed: &[Rect]) -> Option<(Rect, bool)> {
    let chars = word.chars().count() as f64;
    let bw = size * (GLYPH_WIDTH * chars + PADDING);
    let bh = size * LINE_HEIGHT;
    [(bw, bh, false), (bh, bw, true)]
        .into_iter()
        .filter(|&(w, h, _)| w <= width && h <= height)
        .find_map(|(w, h, vertical)| {
            spiral_search(w, h, width, height, placed).map(|rect| (rect, vertical))
        })
}

/// Place `words` (most frequent first) on the canvas.
pub fn layout(words: &[WordWeight], options: &WordCloudOptions) -> Vec<PlacedWord> {
    let (width, height) = (options.width as f64, options.height as f64);
    let min_size = options.min_font_size as f64;
    let scaling = options.relative_scaling as f64;

    let Some(first) = words.first() else {
        return Vec::new();
    };

    let mut font_size = options
        .max_font_size
        .map(f64::from)
        .unwrap_or(height * 0.45);
    let mut last_count = first.count as f64;
    let mut boxes: Vec<Rect> = Vec::with_capacity(words.len());
    let mut placed = Vec::with_capacity(words.len());

    for (i, weight) in words.iter().enumerate() {
        if i > 0 && scaling > 0.0 {
            font_size *= scaling * (weight.count as f64 / last_count) + (1.0 - scaling);
        }

        let mut size = font_size;
        let spot = loop {
            if size < min_size {
                break None;
            }
            if let Some(spot) = find_spot(&weight.word, size, width, height, &boxes) {
                break Some(spot);
            }
            size *= SHRINK;
        };
        let Some((rect, vertical)) = spot else {
            break;
        };

        font_size = size;
        last_count = weight.count as f64;
        boxes.push(rect);
        placed.push(PlacedWord {
            word: weight.word.clone(),
            count: weight.count,
            font_size: size,
            x: rect.x,
            y: rect.y,
            width: rect.w,
            height: rect.h,
            vertical,
            color: color_for(&weight.word),
        });
    }

    placed
}

/// Build the cloud for `text` and render it as SVG.
pub fn render(text: &str, options: &WordCloudOptions) -> Result<String, fmt::Error> {
    let words = cloud_words(text, options.max_words);
    let placed = layout(&words, options);

    let mut canvas = SvgCanvas::new(options.width, options.height, &options.background)?;
    for word in &placed {
        let cx = word.x + word.width / 2.0;
        let cy = word.y + word.height / 2.0;
        let advance = word.font_size * GLYPH_WIDTH * word.word.chars().count() as f64;
        let mut style = TextStyle::new(word.font_size, Anchor::Middle, word.color)
            .centered()
            .text_length(advance);
        if word.vertical {
            style = style.rotated(-90.0);
        }
        canvas.text(cx, cy, &word.word, style)?;
    }
    Ok(canvas.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_case_variants_and_possessives() {
        let words = cloud_words("Rust rust RUST's Rust, python 2024 isn't", 10);
        assert_eq!(words[0], WordWeight { word: "Rust".into(), count: 4 });
        assert!(words.iter().any(|w| w.word == "python"));
        assert!(words.iter().any(|w| w.word == "isn't"));
        assert!(!words.iter().any(|w| w.word == "2024"));
    }

    #[test]
    fn respects_max_words() {
        let text = (0..50).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(cloud_words(&text, 7).len(), 7);
    }

    #[test]
    fn layout_stays_inside_and_never_overlaps() {
        let text = "alpha alpha alpha beta beta gamma delta epsilon zeta eta theta iota kappa \
                    lambda mu nu xi omicron pi rho sigma tau upsilon phi chi psi omega";
        let options = WordCloudOptions::default();
        let placed = layout(&cloud_words(text, 200), &options);
        assert!(!placed.is_empty());
        assert_eq!(placed[0].word, "alpha");

        let (w, h) = (options.width as f64, options.height as f64);
        for (i, a) in placed.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0, "{a:?}");
            assert!(a.x + a.width <= w + 1e-9 && a.y + a.height <= h + 1e-9, "{a:?}");
            for b in &placed[i + 1..] {
                let overlap = a.x < b.x + b.width
                    && b.x < a.x + a.width
                    && a.y < b.y + b.height
                    && b.y < a.y + a.height;
                assert!(!overlap, "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn sizes_never_grow_down_the_ranking() {
        let text = "one one one one two two two three three four";
        let placed = layout(&cloud_words(text, 200), &WordCloudOptions::default());
        for pair in placed.windows(2) {
            assert!(pair[1].font_size <= pair[0].font_size);
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let text = "the quick brown fox jumps over the lazy dog the end";
        let opts = WordCloudOptions::default();
        assert_eq!(
            layout(&cloud_words(text, 200), &opts),
            layout(&cloud_words(text, 200), &opts)
        );
    }

    #[test]
    fn render_uses_canvas_size_and_background() {
        let svg = render("hello hello world", &WordCloudOptions::default()).unwrap();
        assert!(svg.contains(r#"width="600" height="300""#));
        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.contains(">hello</text>"));
        assert!(svg.contains(">world</text>"));
    }

    #[test]
    fn no_words_renders_blank_canvas() {
        let svg = render("123 456 ...", &WordCloudOptions::default()).unwrap();
        assert!(!svg.contains("<text"));
    }
}
