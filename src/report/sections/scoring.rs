use crate::core::error::Result;
use crate::core::model::{Cell, FiveNumberSummary};
use crate::report::chart::{Chart, DataPoint, Series, boxplot_chart};
use crate::report::sections::{ReportContext, Section};
use crate::report::table::TableSpec;
use serde::Deserialize;

pub const SECTION: &str = "scoring";

/// Scores are ratios; the table keeps four decimals.
const SCORE_PRECISION: usize = 4;

#[derive(Clone, Debug, Deserialize)]
pub struct ScoringMetrics {
    pub score: f64,
    pub optimal_score: f64,
    pub optimal_cutoff: f64,
    pub contigs_scores: FiveNumberSummary,
}

pub struct ScoringSection;

impl Section for ScoringSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Assembly scoring"
    }

    fn table(&self, ctx: &ReportContext<'_>) -> Result<Option<TableSpec>> {
        let metrics = ctx.data.section::<ScoringMetrics>(SECTION)?;
        let mut table = TableSpec::new(
            "Global score",
            &["Sample", "Score", "Optimal score", "Optimal cutoff"],
        )
        .with_precision(SCORE_PRECISION);
        for (sample, m) in metrics.ordered(ctx.samples)? {
            table.push_row(vec![
                sample.into(),
                Cell::Number(m.score),
                Cell::Number(m.optimal_score),
                Cell::Number(m.optimal_cutoff),
            ]);
        }
        Ok(Some(table))
    }

    fn charts(&self, ctx: &ReportContext<'_>) -> Result<Vec<Chart>> {
        let metrics = ctx.data.section::<ScoringMetrics>(SECTION)?;
        let rows = metrics.ordered(ctx.samples)?;
        let categories = rows.iter().map(|(s, _)| s.display().to_string()).collect();
        let data = rows
            .iter()
            .map(|(_, m)| DataPoint::Box(m.contigs_scores.as_box()))
            .collect();
        Ok(vec![boxplot_chart(
            "Contigs scores distribution",
            None,
            Some("Contigs score"),
            Some(categories),
            vec![Series::new("Contigs score", data)],
        )])
    }
}
