use crate::core::error::Result;
use crate::report::chart::{Chart, DataPoint, PointKey, Series, column_chart};
use crate::report::sections::{CategoryCounts, ReportContext, Section, category_int, sorted_categories};
use serde::Deserialize;

pub const SECTION: &str = "orientation";

#[derive(Clone, Debug, Deserialize)]
pub struct OrientationMetrics {
    /// Number of contigs by percentage of R1 reads in forward orientation.
    pub contigs_by_ratio: CategoryCounts,
}

pub struct OrientationSection;

impl Section for OrientationSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Reads orientation"
    }

    fn charts(&self, ctx: &ReportContext<'_>) -> Result<Vec<Chart>> {
        let metrics = ctx.data.section::<OrientationMetrics>(SECTION)?;
        let mut series = Vec::with_capacity(metrics.len());
        for (idx, (sample, m)) in metrics.ordered(ctx.samples)?.into_iter().enumerate() {
            let data = sorted_categories(m.contigs_by_ratio.keys())
                .into_iter()
                .map(|key| {
                    let count = m.contigs_by_ratio[&key];
                    let x = match category_int(&key) {
                        Some(v) => PointKey::Int(v),
                        None => PointKey::Label(key),
                    };
                    DataPoint::Keyed(x, count)
                })
                .collect();
            series.push(Series::new(sample.display(), data).with_index(idx));
        }

        let mut config = column_chart(
            "% of R1 in forward orientation by contig",
            Some("% of R1 in forward orientation"),
            Some("Nb contigs"),
            None,
            series,
        );
        if let Some(column) = config.plot_options.as_mut().and_then(|p| p.column.as_mut()) {
            column.data_labels.enabled = false;
        }
        Ok(vec![Chart::plain(config)])
    }
}
