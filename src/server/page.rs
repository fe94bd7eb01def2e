//! The dashboard page: input sidebar on the left, charts on the right.
//!
//! One self-contained HTML document per response. Charts are inlined as
//! `data:` URIs and every piece of user text goes through [`escape_xml`].

use crate::charts::svg::escape_xml;
use crate::output::{AnalysisReport, Notice};
use crate::pipeline::analyze::TokenFrequencyTable;
use crate::pipeline::render::Chart;

const STYLE: &str = r##"
body { margin: 0; font-family: "Source Sans Pro", system-ui, sans-serif; color: #262730; display: flex; min-height: 100vh; }
aside { width: 300px; background: #f0f2f6; padding: 1.5rem; box-sizing: border-box; }
aside textarea { width: 100%; height: 150px; box-sizing: border-box; font: inherit; }
aside label { display: block; margin: 1rem 0 0.3rem; font-weight: 600; }
aside button { margin-top: 1rem; padding: 0.4rem 1.2rem; font: inherit; cursor: pointer; }
main { flex: 1; padding: 1.5rem 2.5rem; max-width: 1200px; }
.row { display: flex; gap: 2rem; flex-wrap: wrap; }
.col { flex: 1; min-width: 320px; }
.col img, .wide img { max-width: 100%; height: auto; }
.notice { margin-top: 1rem; padding: 0.75rem 1rem; border-radius: 0.4rem; }
.notice.info { background: #e8f0fb; color: #1c4f8a; }
.notice.success { background: #e6f4ea; color: #1e6b35; }
.notice.warning { background: #fff6dc; color: #8a6100; }
.notice.error { background: #fde8e8; color: #9b1c1c; }
table.freq { border-collapse: collapse; margin-top: 1rem; }
table.freq th, table.freq td { padding: 0.2rem 0.8rem; border-bottom: 1px solid #e6e9ef; text-align: left; }
footer { margin-top: 3rem; color: #808495; font-size: 0.85rem; }
"##;

fn notice_html(notice: &Notice) -> String {
    format!(
        r#"<div class="notice {}" role="status">{}</div>"#,
        notice.severity().as_str(),
        escape_xml(&notice.message())
    )
}

fn chart_html(chart: Option<&Chart>, alt: &str) -> String {
    match chart {
        Some(chart) => format!(
            r#"<img src="{}" width="{}" height="{}" alt="{}">"#,
            chart.data_uri(),
            chart.width,
            chart.height,
            escape_xml(alt)
        ),
        None => r#"<p class="notice warning">Chart unavailable.</p>"#.to_string(),
    }
}

fn table_html(table: &TokenFrequencyTable) -> String {
    let mut html = String::from(
        r#"<table class="freq"><thead><tr><th>Word</th><th>Count</th><th>Share</th></tr></thead><tbody>"#,
    );
    for (i, row) in table.iter().enumerate() {
        let share = table.percentage(i).unwrap_or(0.0);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td></tr>",
            escape_xml(&row.token),
            row.count,
            share
        ));
    }
    html.push_str("</tbody></table>");
    html
}

fn results_html(report: &AnalysisReport, top_n: usize) -> String {
    let Some(table) = report.table.as_ref().filter(|t| !t.is_empty()) else {
        return notice_html(&Notice::Idle);
    };
    let charts = report.charts.as_ref();

    let mut html = String::new();
    html.push_str(r#"<div class="row"><div class="col"><h3>Word Cloud</h3>"#);
    html.push_str(&chart_html(charts.and_then(|c| c.word_cloud.as_ref()), "Word cloud"));
    html.push_str(&format!(
        r#"</div><div class="col"><h3>Top {top_n} Words - Pie Chart</h3>"#
    ));
    html.push_str(&chart_html(charts.and_then(|c| c.pie.as_ref()), "Pie chart"));
    html.push_str("</div></div>");

    html.push_str(&format!(
        r#"<div class="wide"><h3>Top {top_n} Words - Bar Chart</h3>"#
    ));
    html.push_str(&chart_html(charts.and_then(|c| c.bar.as_ref()), "Bar chart"));
    html.push_str(&table_html(table));
    html.push_str(&format!(
        "<p>{} words, {} distinct.</p></div>",
        report.total_tokens, report.distinct_tokens
    ));
    html
}

/// Render the whole dashboard.
///
/// `pasted` is echoed back into the text area. `report` is `None` before
/// the first submission.
pub fn render(pasted: &str, report: Option<&AnalysisReport>, top_n: usize) -> String {
    let sidebar_notice = report
        .map(|r| &r.notice)
        .filter(|n| **n != Notice::Idle)
        .map(notice_html)
        .unwrap_or_default();

    let main = match report {
        Some(report) => results_html(report, top_n),
        None => notice_html(&Notice::Idle),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Text Visualizer</title>
<style>{STYLE}</style>
</head>
<body>
<aside>
<h2>Upload or Paste Text</h2>
<form method="post" action="/" enctype="multipart/form-data">
<label for="pdf">Upload a PDF file</label>
<input type="file" id="pdf" name="pdf" accept="application/pdf,.pdf">
<label for="text">Or paste your text here</label>
<textarea id="text" name="text">{pasted}</textarea>
<button type="submit">Visualize</button>
</form>
{sidebar_notice}
</aside>
<main>
<h1>Text Visualizer from PDF or Manual Input</h1>
<p>Upload a PDF or paste text to generate Word Cloud, Pie Chart, and Bar Chart.</p>
{main}
<footer><hr>Built with axum and lopdf. Ideal for survey analysis, feedback reports, or health data insights.</footer>
</main>
</body>
</html>
"#,
        pasted = escape_xml(pasted),
    )
}
