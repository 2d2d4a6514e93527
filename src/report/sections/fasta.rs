use crate::core::error::Result;
use crate::core::model::{Cell, LengthDistribution};
use crate::report::chart::{Chart, DataPoint, Series, boxplot_chart};
use crate::report::sections::{ReportContext, Section};
use crate::report::table::TableSpec;
use serde::Deserialize;

pub const SECTION: &str = "fasta";

#[derive(Clone, Debug, Deserialize)]
pub struct FastaMetrics {
    pub nb_seq: f64,
    pub n50: f64,
    pub l50: f64,
    pub length_distribution: LengthDistribution,
}

pub struct FastaSection;

impl Section for FastaSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Contigs"
    }

    fn table(&self, ctx: &ReportContext<'_>) -> Result<Option<TableSpec>> {
        let metrics = ctx.data.section::<FastaMetrics>(SECTION)?;
        let mut table = TableSpec::new(
            "Sequences general information",
            &[
                "Sample",
                "Nb seq",
                "N50",
                "L50",
                "Lg sum",
                "Lg min",
                "Lg lower quartile",
                "Lg mean",
                "Lg median",
                "Lg upper quartile",
                "Lg max",
            ],
        );
        for (sample, m) in metrics.ordered(ctx.samples)? {
            let dist = &m.length_distribution;
            table.push_row(vec![
                sample.into(),
                Cell::Number(m.nb_seq),
                Cell::Number(m.n50),
                Cell::Number(m.l50),
                Cell::Number(dist.sum),
                Cell::Number(dist.summary.min),
                Cell::Number(dist.summary.lower_quartile),
                Cell::Number(dist.mean),
                Cell::Number(dist.summary.median),
                Cell::Number(dist.summary.upper_quartile),
                Cell::Number(dist.summary.max),
            ]);
        }
        Ok(Some(table))
    }

    fn charts(&self, ctx: &ReportContext<'_>) -> Result<Vec<Chart>> {
        let metrics = ctx.data.section::<FastaMetrics>(SECTION)?;
        let rows = metrics.ordered(ctx.samples)?;
        let categories = rows.iter().map(|(s, _)| s.display().to_string()).collect();
        let data = rows
            .iter()
            .map(|(_, m)| DataPoint::Box(m.length_distribution.summary.as_int_box()))
            .collect();
        Ok(vec![boxplot_chart(
            "Contigs length distribution",
            None,
            Some("Contigs length"),
            Some(categories),
            vec![Series::new("Contigs length", data)],
        )])
    }
}
