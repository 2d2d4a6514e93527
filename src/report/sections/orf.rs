use crate::core::error::Result;
use crate::core::format::rounded_percent;
use crate::report::chart::{Chart, DataPoint, PointKey, Series, column_chart};
use crate::report::sections::{CategoryCounts, ReportContext, Section, sorted_categories};
use serde::Deserialize;

pub const SECTION: &str = "transdecoder";

#[derive(Clone, Debug, Deserialize)]
pub struct OrfMetrics {
    /// Number of contigs by number of predicted ORFs.
    #[serde(rename = "nb_ORF_distribution")]
    pub nb_orf_distribution: CategoryCounts,
}

pub struct OrfSection;

impl Section for OrfSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "ORF prediction"
    }

    fn charts(&self, ctx: &ReportContext<'_>) -> Result<Vec<Chart>> {
        let metrics = ctx.data.section::<OrfMetrics>(SECTION)?;
        let mut series = Vec::with_capacity(metrics.len());
        for (idx, (sample, m)) in metrics.ordered(ctx.samples)?.into_iter().enumerate() {
            let dist = &m.nb_orf_distribution;
            let nb_contigs: f64 = dist.values().sum();
            let data = sorted_categories(dist.keys())
                .into_iter()
                .map(|key| {
                    let pct = rounded_percent(dist[&key], nb_contigs);
                    DataPoint::Keyed(PointKey::Label(key), pct)
                })
                .collect();
            series.push(Series::new(sample.display(), data).with_index(idx));
        }
        Ok(vec![Chart::plain(column_chart(
            "Nb ORFs by contigs",
            Some("Nb ORF(s)"),
            Some("% contigs"),
            None,
            series,
        ))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ReportData;

    #[test]
    fn points_are_percent_of_sample_total() {
        let data = ReportData::from_json_str(
            r#"{"transdecoder": {"default": {"nb_ORF_distribution": {"10": 1, "2": 1, "1": 1, "0": 0}}}}"#,
        )
        .unwrap();
        let ctx = ReportContext::new(&data);
        let chart = OrfSection.charts(&ctx).unwrap().remove(0);
        let series = &chart.config.series[0];
        assert_eq!(series.name, "-");
        assert_eq!(
            series.data,
            vec![
                DataPoint::Keyed(PointKey::Label("0".to_string()), 0.0),
                DataPoint::Keyed(PointKey::Label("1".to_string()), 33.33),
                DataPoint::Keyed(PointKey::Label("2".to_string()), 33.33),
                DataPoint::Keyed(PointKey::Label("10".to_string()), 33.33),
            ]
        );
        assert!(!chart.config.legend_enabled());
    }

    #[test]
    fn empty_distribution_has_no_points() {
        let data = ReportData::from_json_str(
            r#"{"transdecoder": {"s": {"nb_ORF_distribution": {}}}}"#,
        )
        .unwrap();
        let ctx = ReportContext::new(&data);
        let chart = OrfSection.charts(&ctx).unwrap().remove(0);
        assert!(chart.config.series[0].data.is_empty());
    }
}
