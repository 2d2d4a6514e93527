use crate::core::error::Result;
use crate::core::model::Cell;
use crate::report::chart::{Chart, DataPoint, pie_chart};
use crate::report::sections::{ReportContext, Section};
use crate::report::table::TableSpec;
use serde::Deserialize;

pub const SECTION: &str = "busco";

/// Figure written by BUSCO next to the report directory.
pub const FIGURE_SRC: &str = "../busco/busco_figure.png";
pub const FIGURE_WIDTH: &str = "50%";

#[derive(Clone, Debug, Deserialize)]
pub struct GeneSetMetrics {
    pub lineage: String,
    pub complete: f64,
    pub complete_single_copy: f64,
    pub complete_duplicated: f64,
    pub fragmented: f64,
    pub missing: f64,
    pub total: f64,
    /// Short summary such as `C:89.1%[S:85.0%,D:4.1%],F:3.2%,M:7.7%,n:303`.
    pub notation: String,
}

pub struct GeneSetSection;

impl Section for GeneSetSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Gene set completeness"
    }

    fn table(&self, ctx: &ReportContext<'_>) -> Result<Option<TableSpec>> {
        let metrics = ctx.data.section::<GeneSetMetrics>(SECTION)?;
        let mut table = TableSpec::new(
            "Recovered genes classification",
            &[
                "Sample",
                "lineage",
                "Complete",
                "Complete single-copy",
                "Complete duplicated",
                "Fragmented",
                "Missing",
                "Total searched",
                "BUSCO notation",
            ],
        );
        for (sample, m) in metrics.ordered(ctx.samples)? {
            table.push_row(vec![
                sample.into(),
                Cell::Text(m.lineage.clone()),
                Cell::Number(m.complete),
                Cell::Number(m.complete_single_copy),
                Cell::Number(m.complete_duplicated),
                Cell::Number(m.fragmented),
                Cell::Number(m.missing),
                Cell::Number(m.total),
                Cell::Text(m.notation.clone()),
            ]);
        }
        Ok(Some(table))
    }

    /// One pie per sample splitting the searched genes by class.
    fn charts(&self, ctx: &ReportContext<'_>) -> Result<Vec<Chart>> {
        let metrics = ctx.data.section::<GeneSetMetrics>(SECTION)?;
        let mut charts = Vec::with_capacity(metrics.len());
        for (sample, m) in metrics.ordered(ctx.samples)? {
            let title = if sample.is_aggregate() {
                format!("Recovered genes ({})", m.lineage)
            } else {
                format!("Recovered genes: {} ({})", sample.display(), m.lineage)
            };
            let data = [
                ("Complete single-copy", m.complete_single_copy),
                ("Complete duplicated", m.complete_duplicated),
                ("Fragmented", m.fragmented),
                ("Missing", m.missing),
            ]
            .into_iter()
            .map(|(name, y)| DataPoint::Named {
                name: name.to_string(),
                y,
            })
            .collect();
            charts.push(Chart::plain(pie_chart(&title, data, "Genes", &ctx.theme)));
        }
        Ok(charts)
    }

    fn figure(&self) -> Option<String> {
        Some(gene_set_figure(FIGURE_SRC, FIGURE_WIDTH))
    }
}

pub fn gene_set_figure(src: &str, width: &str) -> String {
    format!(
        "<img src=\"{}\" class=\"img-responsive center-block\" width=\"{}\">",
        src, width
    )
}
