//! Pie chart of the ranked table: one slice per token, percentage inside.

use super::svg::{Anchor, SvgCanvas, TextStyle, INK, TAB10};
use crate::pipeline::analyze::TokenFrequencyTable;
use std::f64::consts::{PI, TAU};
use std::fmt;

/// First slice starts here, measured counter-clockwise from 3 o'clock.
pub const START_ANGLE_DEG: f64 = 140.0;

/// One slice's geometry, angles in radians (counter-clockwise, y up).
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<'a> {
    pub label: &'a str,
    pub value: usize,
    pub start: f64,
    pub sweep: f64,
    pub percent: f64,
}

/// Split the full circle proportionally to the table counts.
pub fn slices(table: &TokenFrequencyTable) -> Vec<Slice<'_>> {
    let total = table.total();
    if total == 0 {
        return Vec::new();
    }
    let mut angle = START_ANGLE_DEG.to_radians();
    table
        .pairs()
        .map(|(label, value)| {
            let fraction = value as f64 / total as f64;
            let slice = Slice {
                label,
                value,
                start: angle,
                sweep: fraction * TAU,
                percent: fraction * 100.0,
            };
            angle += slice.sweep;
            slice
        })
        .collect()
}

/// Render the table as an SVG pie chart.
pub fn render(table: &TokenFrequencyTable, width: u32, height: u32) -> Result<String, fmt::Error> {
    let (w, h) = (width as f64, height as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);
    // leave a ring outside the pie for the labels
    let r = w.min(h) / 2.0 * 0.68;
    let point = |theta: f64, radius: f64| (cx + radius * theta.cos(), cy - radius * theta.sin());

    let slices = slices(table);
    let mut canvas = SvgCanvas::new(width, height, "white")?;

    for (i, slice) in slices.iter().enumerate() {
        let color = TAB10[i % TAB10.len()];
        if slices.len() == 1 {
            canvas.circle(cx, cy, r, color)?;
        } else {
            let (x0, y0) = point(slice.start, r);
            let (x1, y1) = point(slice.start + slice.sweep, r);
            let large_arc = u8::from(slice.sweep > PI);
            // sweep-flag 0: counter-clockwise on screen, matching the y-up angles
            let d = format!(
                "M{cx:.2},{cy:.2} L{x0:.2},{y0:.2} A{r:.2},{r:.2} 0 {large_arc} 0 {x1:.2},{y1:.2} Z"
            );
            canvas.path(&d, color, "white")?;
        }

        let mid = slice.start + slice.sweep / 2.0;
        let (lx, ly) = point(mid, r * 1.1);
        let anchor = if mid.cos() >= 0.0 {
            Anchor::Start
        } else {
            Anchor::End
        };
        canvas.text(lx, ly, slice.label, TextStyle::new(12.0, anchor, INK).centered())?;

        let (px, py) = point(mid, r * 0.6);
        canvas.text(
            px,
            py,
            &format!("{:.1}%", slice.percent),
            TextStyle::new(11.0, Anchor::Middle, "white").centered(),
        )?;
    }

    Ok(canvas.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyze::analyze;

    #[test]
    fn slices_cover_the_circle() {
        let table = analyze("a a a b c c", 10).table;
        let s = slices(&table);
        assert_eq!(s.len(), 3);
        let sweep: f64 = s.iter().map(|x| x.sweep).sum();
        assert!((sweep - TAU).abs() < 1e-9);
        assert!((s[0].start - START_ANGLE_DEG.to_radians()).abs() < 1e-12);
        assert!((s[1].start - (s[0].start + s[0].sweep)).abs() < 1e-12);
        assert!((s[0].percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn labels_and_percentages_rendered() {
        let table = analyze("x x x y", 10).table;
        let svg = render(&table, 480, 360).unwrap();
        assert!(svg.contains(">x</text>"));
        assert!(svg.contains(">y</text>"));
        assert!(svg.contains(">75.0%</text>"));
        assert!(svg.contains(">25.0%</text>"));
        assert_eq!(svg.matches("<path ").count(), 2);
    }

    #[test]
    fn single_token_is_a_full_circle() {
        let table = analyze("solo solo", 10).table;
        let svg = render(&table, 200, 200).unwrap();
        assert!(svg.contains("<circle "));
        assert!(svg.contains(">100.0%</text>"));
    }

    #[test]
    fn empty_table_has_no_slices() {
        let table = analyze("", 10).table;
        assert!(slices(&table).is_empty());
    }
}
