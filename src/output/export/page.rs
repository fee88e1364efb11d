//! HTML page handed to the PDF converter
//!
//! A4 portrait pages: a header listing the display information of the
//! recording, then one chart page per inline SVG scaled to the page width,
//! and a footer with the generation time. Every chart page after the first
//! starts on a new sheet.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

/// Printable page around an SVG chart
#[derive(Clone, Debug, PartialEq)]
pub struct PdfPage {
    pub title: String,
    pub generated: DateTime<Utc>,
    /// Label/value rows shown above the chart, in order
    pub info: Vec<(String, String)>,
}

impl PdfPage {
    pub fn new(title: impl Into<String>, info: Vec<(String, String)>) -> Self {
        Self { title: title.into(), generated: Utc::now(), info }
    }

    /// Render the document with each of `charts` embedded inline, in order
    pub fn to_html<S: AsRef<str>>(&self, charts: &[S]) -> String {
        let chart_len: usize = charts.iter().map(|svg| svg.as_ref().len()).sum();
        let mut html = String::with_capacity(chart_len + 2048);
        let title = escape_html(&self.title);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{title}</title>");
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n<header>\n");
        let _ = writeln!(html, "<h1>{title}</h1>");

        if !self.info.is_empty() {
            html.push_str("<dl>\n");
            for (label, value) in &self.info {
                let _ = writeln!(
                    html,
                    "<div><dt>{}</dt><dd>{}</dd></div>",
                    escape_html(label),
                    escape_html(value)
                );
            }
            html.push_str("</dl>\n");
        }

        html.push_str("</header>\n");
        for (index, svg) in charts.iter().enumerate() {
            html.push_str(if index == 0 { "<figure>\n" } else { "<figure class=\"next\">\n" });
            html.push_str(svg.as_ref());
            html.push_str("\n</figure>\n");
        }
        let _ = writeln!(
            html,
            "<footer>Generated {}</footer>",
            self.generated.format("%Y-%m-%d %H:%M:%S UTC")
        );
        html.push_str("</body>\n</html>\n");
        html
    }
}

const STYLE: &str = r#"<style>
@page { size: A4 portrait; margin: 12mm; }
body { font-family: sans-serif; margin: 0; color: #222; }
h1 { font-size: 18pt; margin: 0 0 4mm 0; }
dl { display: flex; flex-wrap: wrap; margin: 0 0 6mm 0; }
dl div { margin-right: 8mm; }
dt { font-size: 8pt; color: #666; }
dd { margin: 0; font-size: 11pt; }
figure { margin: 0; }
figure svg { width: 100%; height: auto; }
figure.next { page-break-before: always; break-before: page; }
footer { margin-top: 4mm; font-size: 8pt; color: #888; }
</style>
"#;

/// Escape text for HTML element content
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
