use crate::core::error::Result;
use crate::core::format::percent_display;
use crate::core::model::Cell;
use crate::report::sections::{ReportContext, Section};
use crate::report::table::TableSpec;
use serde::Deserialize;

pub const SECTION: &str = "mapping";

#[derive(Clone, Debug, Deserialize)]
pub struct MappingMetrics {
    pub nb_read_1: f64,
    pub nb_read_2: f64,
    pub paired: f64,
    pub mapped: f64,
    pub properly_paired: f64,
    pub mate_on_other_chr: f64,
}

impl MappingMetrics {
    pub fn mapped_percent(&self) -> String {
        percent_display(self.mapped, self.nb_read_1 + self.nb_read_2)
    }

    pub fn properly_paired_percent(&self) -> String {
        percent_display(self.properly_paired, self.paired)
    }
}

pub struct MappingSection;

impl Section for MappingSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Reads mapping"
    }

    fn table(&self, ctx: &ReportContext<'_>) -> Result<Option<TableSpec>> {
        let metrics = ctx.data.section::<MappingMetrics>(SECTION)?;
        let mut table = TableSpec::new(
            "Mapping information",
            &[
                "Sample",
                "Reads 1",
                "Reads 2",
                "Paired",
                "Mapped",
                "Properly paired",
                "Mate on other chr",
            ],
        );
        for (sample, m) in metrics.ordered(ctx.samples)? {
            table.push_row(vec![
                sample.into(),
                Cell::Number(m.nb_read_1),
                Cell::Number(m.nb_read_2),
                Cell::Number(m.paired),
                Cell::Text(m.mapped_percent()),
                Cell::Text(m.properly_paired_percent()),
                Cell::Number(m.mate_on_other_chr),
            ]);
        }
        Ok(Some(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ReportData;

    fn record(paired: f64, reads: f64) -> MappingMetrics {
        MappingMetrics {
            nb_read_1: reads,
            nb_read_2: reads,
            paired,
            mapped: 1500.0,
            properly_paired: 900.0,
            mate_on_other_chr: 12.0,
        }
    }

    #[test]
    fn zero_denominators_give_zero_percent() {
        let m = record(0.0, 0.0);
        assert_eq!(m.properly_paired_percent(), "0%");
        assert_eq!(m.mapped_percent(), "0%");
    }

    #[test]
    fn percentages_use_read_totals() {
        let m = record(1000.0, 1000.0);
        assert_eq!(m.mapped_percent(), "75%");
        assert_eq!(m.properly_paired_percent(), "90%");
        let m = record(1200.0, 1000.0);
        assert_eq!(m.properly_paired_percent(), "75%");
        let m = MappingMetrics {
            mapped: 1234.0,
            ..record(1000.0, 1000.0)
        };
        assert_eq!(m.mapped_percent(), "61.70%");
    }

    #[test]
    fn table_row_layout() {
        let data = ReportData::from_json_str(
            r#"{"mapping": {"default": {"nb_read_1": 1000000, "nb_read_2": 1000000,
                "paired": 0, "mapped": 1800000, "properly_paired": 0, "mate_on_other_chr": 512}}}"#,
        )
        .unwrap();
        let ctx = ReportContext::new(&data);
        let html = MappingSection.table(&ctx).unwrap().unwrap().render().unwrap();
        assert!(html.contains(
            "<td>-</td>\n      <td>1,000,000</td>\n      <td>1,000,000</td>\n      <td>0</td>\n      <td>90%</td>\n      <td>0%</td>\n      <td>512</td>"
        ));
    }
}
