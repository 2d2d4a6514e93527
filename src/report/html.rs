use crate::core::error::Result as ReportResult;
use crate::report::chart::Chart;
use crate::report::sections::SectionOutput;
use crate::report::table::escape_html;
use anyhow::{Context, Result};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const HIGHCHARTS_URL: &str = "https://code.highcharts.com/highcharts.js";
pub const HIGHCHARTS_MORE_URL: &str = "https://code.highcharts.com/highcharts-more.js";
pub const STYLESHEET_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@3.4.1/dist/css/bootstrap.min.css";

#[derive(Clone, Debug)]
pub struct PageOptions {
    pub title: String,
    pub highcharts_url: String,
    /// Adds the boxplot series type.
    pub highcharts_more_url: String,
    pub stylesheet_url: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "DRAP report".to_string(),
            highcharts_url: HIGHCHARTS_URL.to_string(),
            highcharts_more_url: HIGHCHARTS_MORE_URL.to_string(),
            stylesheet_url: STYLESHEET_URL.to_string(),
        }
    }
}

pub fn render_page(sections: &[SectionOutput], opts: &PageOptions) -> ReportResult<String> {
    let mut html = String::with_capacity(64 * 1024);
    let title = escape_html(&opts.title);

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\"/>")?;
    writeln!(
        html,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>"
    )?;
    writeln!(html, "<title>{}</title>", title)?;
    writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"{}\"/>",
        escape_html(&opts.stylesheet_url)
    )?;
    writeln!(
        html,
        "<script src=\"{}\"></script>",
        escape_html(&opts.highcharts_url)
    )?;
    writeln!(
        html,
        "<script src=\"{}\"></script>",
        escape_html(&opts.highcharts_more_url)
    )?;
    writeln!(html, "<style>")?;
    writeln!(
        html,
        ".page{{display:flex;align-items:flex-start;gap:16px;padding:16px;}}"
    )?;
    writeln!(
        html,
        ".sidebar{{width:240px;position:sticky;top:16px;background:#f6f6f6;border:1px solid #ddd;border-radius:4px;padding:10px;}}"
    )?;
    writeln!(html, ".sidebar ul{{list-style:none;margin:0;padding:0;}}")?;
    writeln!(html, ".sidebar li{{padding:4px 0;font-size:13px;}}")?;
    writeln!(html, ".main{{flex:1;min-width:0;}}")?;
    writeln!(
        html,
        ".module{{padding:8px 0 14px 0;border-bottom:1px solid #eee;}}"
    )?;
    writeln!(html, ".module:last-child{{border-bottom:none;}}")?;
    writeln!(html, ".chart{{min-height:400px;margin:8px 0;}}")?;
    writeln!(html, "</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;

    writeln!(html, "<div class=\"page\">")?;
    writeln!(html, "<aside class=\"sidebar\">")?;
    writeln!(html, "<ul>")?;
    for section in sections {
        writeln!(
            html,
            "<li><a href=\"#{}\">{}</a></li>",
            section_id(section.name),
            escape_html(section.title)
        )?;
    }
    writeln!(html, "</ul>")?;
    writeln!(html, "</aside>")?;

    writeln!(html, "<main class=\"main\">")?;
    writeln!(html, "<h1>{}</h1>", title)?;
    for section in sections {
        write_section(&mut html, section)?;
    }
    writeln!(html, "</main>")?;
    writeln!(html, "</div>")?;
    writeln!(html, "</body></html>")?;
    Ok(html)
}

pub fn write(path: &Path, sections: &[SectionOutput], opts: &PageOptions) -> Result<()> {
    let html = render_page(sections, opts)?;
    let mut w = BufWriter::new(
        File::create(path).with_context(|| format!("create {} failed", path.display()))?,
    );
    w.write_all(html.as_bytes())?;
    w.flush()?;
    Ok(())
}

fn section_id(name: &str) -> String {
    format!("section-{}", name)
}

fn write_section(out: &mut String, section: &SectionOutput) -> ReportResult<()> {
    writeln!(
        out,
        "<section id=\"{}\" class=\"module\">",
        section_id(section.name)
    )?;
    writeln!(out, "<h2>{}</h2>", escape_html(section.title))?;
    if let Some(table) = &section.table {
        out.push_str(table);
    }
    for (idx, chart) in section.charts.iter().enumerate() {
        let id = format!("chart-{}-{}", section.name, idx);
        chart_block(out, &id, chart)?;
    }
    if let Some(figure) = &section.figure {
        writeln!(out, "{}", figure)?;
    }
    writeln!(out, "</section>")?;
    Ok(())
}

/// Chart container and the script drawing it.
pub fn chart_block(out: &mut String, id: &str, chart: &Chart) -> ReportResult<()> {
    let config = script_safe(&chart.config.to_json()?);
    writeln!(out, "<div id=\"{}\" class=\"chart\"></div>", id)?;
    match chart.zoom.js_callback() {
        Some(callback) => writeln!(
            out,
            "<script>Highcharts.chart('{}', {}, {});</script>",
            id, config, callback
        )?,
        None => writeln!(out, "<script>Highcharts.chart('{}', {});</script>", id, config)?,
    }
    Ok(())
}

/// Keeps `</b>` and friends inside JSON strings from closing the script tag.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
