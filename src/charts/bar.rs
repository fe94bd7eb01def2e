//! Vertical bar chart of the ranked table, one bar per token in rank order.

use super::svg::{Anchor, SvgCanvas, TextStyle, INK};
use crate::pipeline::analyze::TokenFrequencyTable;
use std::fmt;

const BAR_COLOR: &str = "#1f77b4";
const GRID_COLOR: &str = "#e6e9ef";
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 84.0;
const MAX_LABEL_CHARS: usize = 14;

/// Round a raw tick interval up to 1, 2 or 5 × 10ⁿ (never below 1).
pub fn nice_step(raw: f64) -> f64 {
    if raw <= 1.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalised = raw / magnitude;
    let nice = if normalised <= 1.0 {
        1.0
    } else if normalised <= 2.0 {
        2.0
    } else if normalised <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Y-axis tick values from 0 up to the first tick at or above `max`.
pub fn ticks(max: usize) -> Vec<f64> {
    let step = nice_step(max as f64 / 5.0);
    let top = ((max as f64 / step).ceil() * step).max(step);
    let count = (top / step).round() as usize;
    (0..=count).map(|k| k as f64 * step).collect()
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let mut s: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        s.push('…');
        s
    }
}

/// Render the table as an SVG bar chart.
pub fn render(table: &TokenFrequencyTable, width: u32, height: u32) -> Result<String, fmt::Error> {
    let (w, h) = (width as f64, height as f64);
    let plot_w = (w - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_h = (h - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
    let baseline = MARGIN_TOP + plot_h;

    let mut canvas = SvgCanvas::new(width, height, "white")?;

    let max = table.iter().map(|r| r.count).max().unwrap_or(0);
    let ticks = ticks(max);
    let top = ticks.last().copied().unwrap_or(1.0);
    let y_of = |v: f64| MARGIN_TOP + plot_h * (1.0 - v / top);

    for &tick in &ticks {
        let y = y_of(tick);
        canvas.line(MARGIN_LEFT, y, MARGIN_LEFT + plot_w, y, GRID_COLOR)?;
        canvas.text(
            MARGIN_LEFT - 6.0,
            y,
            &format!("{tick}"),
            TextStyle::new(11.0, Anchor::End, INK).centered(),
        )?;
    }

    let n = table.len().max(1) as f64;
    let slot = plot_w / n;
    let bar_w = slot * 0.7;
    for (i, row) in table.iter().enumerate() {
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_w) / 2.0;
        let y = y_of(row.count as f64);
        canvas.rect(x, y, bar_w, baseline - y, BAR_COLOR)?;

        let label_x = x + bar_w / 2.0;
        let label_y = baseline + 12.0;
        canvas.text(
            label_x,
            label_y,
            &short_label(&row.token),
            TextStyle::new(11.0, Anchor::End, INK).rotated(-45.0),
        )?;
    }

    canvas.line(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, baseline, INK)?;
    canvas.line(MARGIN_LEFT, baseline, MARGIN_LEFT + plot_w, baseline, INK)?;

    Ok(canvas.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyze::analyze;

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(0.4), 1.0);
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(1.6), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(24.0), 50.0);
        assert_eq!(nice_step(120.0), 200.0);
    }

    #[test]
    fn ticks_reach_the_maximum() {
        assert_eq!(ticks(2), vec![0.0, 1.0, 2.0]);
        assert_eq!(ticks(0), vec![0.0, 1.0]);
        let t = ticks(37);
        assert_eq!(t.first(), Some(&0.0));
        assert!(*t.last().unwrap() >= 37.0);
    }

    #[test]
    fn one_bar_per_row_in_order() {
        let table = analyze("b a b a c", 10).table;
        let svg = render(&table, 480, 360).unwrap();
        let bars = svg.matches(&format!(r#"fill="{BAR_COLOR}""#)).count();
        assert_eq!(bars, 3);
        let pos_b = svg.find(">b</text>").unwrap();
        let pos_a = svg.find(">a</text>").unwrap();
        let pos_c = svg.find(">c</text>").unwrap();
        assert!(pos_b < pos_a && pos_a < pos_c);
    }

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(short_label("short"), "short");
        let long = "internationalization";
        let s = short_label(long);
        assert_eq!(s.chars().count(), MAX_LABEL_CHARS);
        assert!(s.ends_with('…'));
    }
}
