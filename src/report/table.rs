use crate::core::error::{ReportError, Result};
use crate::core::format::number_display;
use crate::core::model::Cell;
use std::fmt::Write as FmtWrite;

/// Class attribute expected by the report stylesheet.
pub const TABLE_CLASS: &str = "table table-striped";

#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Decimals kept for non-integral numbers, 2 when `None`.
    pub precision: Option<usize>,
}

impl TableSpec {
    pub fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            precision: None,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> Result<String> {
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != self.headers.len() {
                return Err(ReportError::RowWidth {
                    title: self.title.clone(),
                    row: idx,
                    expected: self.headers.len(),
                    found: row.len(),
                });
            }
        }

        let mut out = String::with_capacity(256 + self.rows.len() * self.headers.len() * 24);
        writeln!(out, "<table class=\"{}\">", TABLE_CLASS)?;
        writeln!(out, "  <thead>")?;
        writeln!(out, "    <tr>")?;
        writeln!(
            out,
            "<th colspan=\"{}\">{}</th>    </tr>",
            self.headers.len(),
            escape_html(&self.title)
        )?;
        writeln!(out, "    <tr>")?;
        for header in &self.headers {
            writeln!(out, "      <th>{}</th>", escape_html(header))?;
        }
        writeln!(out, "    </tr>")?;
        writeln!(out, "  </thead>")?;

        writeln!(out, "  <tbody>")?;
        for row in &self.rows {
            writeln!(out, "    <tr>")?;
            for cell in row {
                match cell {
                    Cell::Number(v) => {
                        writeln!(out, "      <td>{}</td>", number_display(*v, self.precision))?
                    }
                    Cell::Text(s) => writeln!(out, "      <td>{}</td>", escape_html(s))?,
                }
            }
            writeln!(out, "    </tr>")?;
        }
        writeln!(out, "  </tbody>")?;
        writeln!(out, "</table>")?;
        Ok(out)
    }
}

pub fn render_table(
    title: &str,
    headers: &[&str],
    rows: Vec<Vec<Cell>>,
    precision: Option<usize>,
) -> Result<String> {
    TableSpec {
        title: title.to_string(),
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
        precision,
    }
    .render()
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_numeric_and_text_cells() {
        let html = render_table("T", &["A", "B"], vec![vec![Cell::Number(1000.0), "x".into()]], None).unwrap();
        let expected = "<table class=\"table table-striped\">\n  <thead>\n    <tr>\n<th colspan=\"2\">T</th>    </tr>\n    <tr>\n      <th>A</th>\n      <th>B</th>\n    </tr>\n  </thead>\n  <tbody>\n    <tr>\n      <td>1,000</td>\n      <td>x</td>\n    </tr>\n  </tbody>\n</table>\n";
        assert_eq!(html, expected);
    }

    #[test]
    fn applies_precision_to_decimals_only() {
        let html = render_table(
            "Global score",
            &["Score", "Cutoff"],
            vec![vec![Cell::Number(0.123456), Cell::Number(12000.0)]],
            Some(4),
        )
        .unwrap();
        assert!(html.contains("<td>0.1235</td>"));
        assert!(html.contains("<td>12,000</td>"));
    }

    #[test]
    fn empty_body_keeps_header() {
        let html = TableSpec::new("Empty", &["A"]).render().unwrap();
        assert!(html.contains("<th colspan=\"1\">Empty</th>"));
        assert!(html.contains("  <tbody>\n  </tbody>\n"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut table = TableSpec::new("T", &["A", "B"]);
        table.push_row(vec!["a".into(), Cell::Number(1.0)]);
        table.push_row(vec!["b".into()]);
        let err = table.render().unwrap_err();
        assert!(matches!(
            err,
            ReportError::RowWidth { row: 1, expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn escapes_markup_in_text() {
        let html = render_table("a<b", &["x&y"], vec![vec!["<i>".into()]], None).unwrap();
        assert!(html.contains("a&lt;b"));
        assert!(html.contains("<th>x&amp;y</th>"));
        assert!(html.contains("<td>&lt;i&gt;</td>"));
    }
}
