use crate::core::error::Result;
use crate::core::model::FiveNumberSummary;
use crate::report::chart::{Chart, DataPoint, Series, boxplot_chart};
use crate::report::sections::{ReportContext, Section};
use serde::Deserialize;

pub const SECTION: &str = "expression";

#[derive(Clone, Debug, Deserialize)]
pub struct ExpressionMetrics {
    pub fpkm_distribution: FiveNumberSummary,
}

pub struct ExpressionSection;

impl Section for ExpressionSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Expression"
    }

    fn charts(&self, ctx: &ReportContext<'_>) -> Result<Vec<Chart>> {
        let metrics = ctx.data.section::<ExpressionMetrics>(SECTION)?;
        let rows = metrics.ordered(ctx.samples)?;
        let categories: Vec<String> = match rows.as_slice() {
            [(only, _)] if only.is_aggregate() => vec!["All".to_string()],
            _ => rows.iter().map(|(s, _)| s.display().to_string()).collect(),
        };
        let data = rows
            .iter()
            .map(|(_, m)| DataPoint::Box(m.fpkm_distribution.as_int_box()))
            .collect();
        Ok(vec![boxplot_chart(
            "FPKM distribution",
            None,
            Some("FPKM"),
            Some(categories),
            vec![Series::new("runDrap", data)],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ReportData;
    use crate::report::zoom::ZoomWindow;

    #[test]
    fn lone_aggregate_is_labelled_all() {
        let data = ReportData::from_json_str(
            r#"{"expression": {"default": {"fpkm_distribution":
                {"min": 0, "lower_quartile": 1.7, "median": 4.2, "upper_quartile": 12.9, "max": 25000.4}}}}"#,
        )
        .unwrap();
        let ctx = ReportContext::new(&data);
        let chart = ExpressionSection.charts(&ctx).unwrap().remove(0);
        assert_eq!(chart.config.x_axis.categories, Some(vec!["All".to_string()]));
        assert_eq!(chart.config.series[0].name, "runDrap");
        assert_eq!(
            chart.config.series[0].data,
            vec![DataPoint::Box([0.0, 1.0, 4.0, 12.0, 25000.0])]
        );
        assert_eq!(chart.zoom.window(), Some(ZoomWindow { min: 0.0, max: 23.0 }));
        assert!(ExpressionSection.table(&ctx).unwrap().is_none());
    }

    #[test]
    fn named_samples_keep_their_names() {
        let data = ReportData::from_json_str(
            r#"{"expression": {
                "a": {"fpkm_distribution": {"min": 0, "lower_quartile": 1, "median": 2, "upper_quartile": 3, "max": 4}},
                "b": {"fpkm_distribution": {"min": 0, "lower_quartile": 1, "median": 2, "upper_quartile": 3, "max": 5}}
            }}"#,
        )
        .unwrap();
        let ctx = ReportContext::new(&data);
        let chart = ExpressionSection.charts(&ctx).unwrap().remove(0);
        assert_eq!(
            chart.config.x_axis.categories,
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }
}
