//! Report rendering.
//!
//! The only place that knows what a highlight looks like. Both renderers
//! consume the same `Report` model: HTML for the written/mailed report,
//! plain text for terminals. Empty sections render as present-but-empty
//! tables so a clean account still produces a complete document.

use crate::TOOL_NAME;
use crate::report::model::{Report, Section};

/// Inline style applied to highlighted rows.
const HIGHLIGHT_STYLE: &str = "background-color: darkorange";

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    out.push_str(&report.display_title());
    out.push('\n');

    for section in &report.sections {
        out.push('\n');
        out.push_str(&format!("== {} ==\n", section.title));

        if section.is_empty() {
            out.push_str("(empty)\n");
            continue;
        }

        out.push_str(&format!("#  {}\n", section.columns.join(" | ")));
        for (i, row) in section.rows.iter().enumerate() {
            let position = i + 1;
            let marker = if section.highlights.contains(position) {
                "!"
            } else {
                " "
            };
            out.push_str(&format!("{position}{marker} {}\n", row.join(" | ")));
        }
    }

    out
}

pub fn render_html(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str(&format!(
        "<title>{}</title>\n",
        html_escape(&report.display_title())
    ));
    out.push_str("<style>\n");
    out.push_str("body { font-family: sans-serif; margin: 2em; }\n");
    out.push_str("table { border-collapse: collapse; margin-bottom: 2em; }\n");
    out.push_str("th, td { border: 1px solid #999; padding: 4px 8px; text-align: left; }\n");
    out.push_str("th { background-color: #eee; }\n");
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!(
        "<h1>{}</h1>\n",
        html_escape(&report.display_title())
    ));

    for section in &report.sections {
        render_section(&mut out, section);
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_section(out: &mut String, section: &Section) {
    out.push_str(&format!("<h2>{}</h2>\n", html_escape(&section.title)));
    out.push_str("<table border=\"1\">\n<tr><th></th>");
    for column in &section.columns {
        out.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    out.push_str("</tr>\n");

    for (i, row) in section.rows.iter().enumerate() {
        let position = i + 1;
        if section.highlights.contains(position) {
            out.push_str(&format!("<tr style=\"{HIGHLIGHT_STYLE}\">"));
        } else {
            out.push_str("<tr>");
        }
        out.push_str(&format!("<td>{position}</td>"));
        for value in row {
            out.push_str(&format!("<td>{}</td>", html_escape(value)));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</table>\n");
}

fn html_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::HighlightSet;
    use crate::report::model::ToolInfo;

    fn report_with(sections: Vec<Section>) -> Report {
        Report::new(
            ToolInfo {
                name: "skywatch".into(),
                version: "0.1.0".into(),
            },
            "Daily report",
            sections,
        )
    }

    fn section(rows: Vec<Vec<&str>>, highlights: &[usize]) -> Section {
        Section {
            title: "Instances".into(),
            columns: vec!["Instance".into(), "Status".into()],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(str::to_string).collect())
                .collect(),
            highlights: highlights.iter().copied().collect(),
        }
    }

    #[test]
    fn html_marks_highlighted_rows_only() {
        let html = render_html(&report_with(vec![section(
            vec![vec!["web-1", "RUNNING"], vec!["db-1", "RUNNING"]],
            &[2],
        )]));

        assert_eq!(html.matches(HIGHLIGHT_STYLE).count(), 1);
        let highlighted = html.find(HIGHLIGHT_STYLE).unwrap();
        assert!(html[highlighted..].contains("db-1"));
    }

    #[test]
    fn html_escapes_cell_content() {
        let html = render_html(&report_with(vec![section(
            vec![vec!["<script>alert(1)</script>", "R&D"]],
            &[],
        )]));

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("R&amp;D"));
    }

    #[test]
    fn empty_section_still_renders_a_table() {
        let html = render_html(&report_with(vec![section(vec![], &[])]));

        assert!(html.contains("<h2>Instances</h2>"));
        assert!(html.contains("<table"));
        assert!(html.contains("<th>Status</th>"));
    }

    #[test]
    fn text_renders_positions_and_markers() {
        let text = render_text(&report_with(vec![section(
            vec![vec!["web-1", "RUNNING"], vec!["db-1", "RUNNING"]],
            &[1],
        )]));

        assert!(text.contains("== Instances =="));
        assert!(text.contains("1! web-1 | RUNNING"));
        assert!(text.contains("2  db-1 | RUNNING"));
    }

    #[test]
    fn text_marks_empty_sections() {
        let text = render_text(&report_with(vec![section(vec![], &[])]));
        assert!(text.contains("(empty)"));
    }
}
