//! Single-page HTML rendering; charts are drawn client-side by Plotly.js

use super::{Report, ERROR_MESSAGE};
use serde_json::Value;
use std::fmt::Write;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const DOCUMENT_TITLE: &str = "Econometric Dashboard: Inflation and Unemployment";
const STYLE: &str = "body{font-family:Arial,sans-serif;padding:20px;max-width:1200px;margin:auto}\
h1{text-align:center}.chart{width:100%;min-height:450px}\
.caption{font-style:italic;margin-bottom:40px}.error{font-size:1.2em;padding:40px;text-align:center}\
footer{color:#777;font-size:.85em;text-align:center}";

/// Extra page details that are not derived from the data
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub generated_at: Option<String>,
}

pub fn render_page(report: &Report, meta: &PageMeta) -> String {
    let mut html = String::with_capacity(64 * 1024);
    let ready = report.is_ready();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(DOCUMENT_TITLE));
    if ready {
        let _ = writeln!(html, "<script src=\"{}\" charset=\"utf-8\"></script>", PLOTLY_CDN);
    }
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);

    match report {
        Report::Unavailable => {
            let _ = writeln!(html, "<div class=\"error\">{}</div>", escape_html(ERROR_MESSAGE));
        }
        Report::Ready(dashboard) => {
            let _ = writeln!(html, "<h1>{}</h1>\n<hr>", escape_html(&dashboard.title));
            for section in &dashboard.sections {
                let _ = writeln!(html, "<section>\n<div id=\"{}\" class=\"chart\"></div>", section.id);
                let _ = writeln!(
                    html,
                    "<script>(function(){{var fig={};Plotly.newPlot(\"{}\",fig.data,fig.layout,{{\"responsive\":true}});}})();</script>",
                    embed_json(&section.figure),
                    section.id
                );
                let _ = writeln!(html, "<p class=\"caption\">{}</p>\n</section>", escape_html(&section.caption));
            }
        }
    }

    // The error page carries the message and nothing else
    if let Some(generated_at) = meta.generated_at.as_ref().filter(|_| ready) {
        let _ = writeln!(html, "<footer>Generated at {}</footer>", escape_html(generated_at));
    }
    html.push_str("</body>\n</html>\n");
    html
}

pub fn escape_html(text: &str) -> String {
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

/// Serialize a figure for inline `<script>` use; `</` cannot close the tag
pub fn embed_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
