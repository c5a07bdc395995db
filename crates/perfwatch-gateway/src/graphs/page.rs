//! HTML rendering for the graphs endpoint.

use std::fmt::Write;

use super::GraphRef;

const TITLE: &str = "Performance Graphs";

/// Helper to escape text and attribute values.
fn escape_html(v: &str) -> String {
    v.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the page. `refresh_secs` adds an auto-refresh directive.
pub fn render(graphs: &[(String, GraphRef)], refresh_secs: Option<u32>) -> String {
    let mut out = String::with_capacity(256 + graphs.len() * 160);

    let _ = writeln!(out, "<!DOCTYPE html>\n<html>\n<head>\n<title>{TITLE}</title>");
    if let Some(secs) = refresh_secs {
        let _ = writeln!(out, "<meta http-equiv=\"refresh\" content=\"{secs}\">");
    }
    let _ = writeln!(out, "</head>\n<body>");

    for (name, graph) in graphs {
        let name = escape_html(name);
        let _ = writeln!(out, "<br><br>");
        match graph {
            GraphRef::Chart(url) => {
                let _ = writeln!(out, "<img src=\"{}\" alt=\"{name}\">", escape_html(url));
            }
            GraphRef::Empty => {
                let _ = writeln!(out, "<b>{name}</b>: No data yet");
            }
            GraphRef::Unknown => {
                let _ = writeln!(out, "<b>Unknown graph name: {name}</b>");
            }
        }
    }

    let _ = writeln!(out, "</body>\n</html>");
    out
}
