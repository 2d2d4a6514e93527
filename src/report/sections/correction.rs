use crate::core::error::Result;
use crate::core::model::Cell;
use crate::report::sections::{ReportContext, Section};
use crate::report::table::TableSpec;
use serde::Deserialize;

pub const SECTION: &str = "correct_variant";

#[derive(Clone, Debug, Deserialize)]
pub struct CorrectionMetrics {
    pub corrected_contigs: f64,
    pub insertion_case: f64,
    pub deletion_case: f64,
    pub substitution_case: f64,
    pub errors_in_reads: f64,
    /// Spelled as the pipeline writes it.
    pub contig_discrodant: f64,
}

pub struct CorrectionSection;

impl Section for CorrectionSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Variant correction"
    }

    fn table(&self, ctx: &ReportContext<'_>) -> Result<Option<TableSpec>> {
        let metrics = ctx.data.section::<CorrectionMetrics>(SECTION)?;
        let mut table = TableSpec::new(
            "Correction information",
            &[
                "Sample",
                "Nb consensus seq with bias",
                "Insertion case",
                "Deletion case",
                "Substitution case",
                "Reads divergent from consensus",
                "Consensus position different of all reads",
            ],
        );
        for (sample, m) in metrics.ordered(ctx.samples)? {
            table.push_row(vec![
                sample.into(),
                Cell::Number(m.corrected_contigs),
                Cell::Number(m.insertion_case),
                Cell::Number(m.deletion_case),
                Cell::Number(m.substitution_case),
                Cell::Number(m.errors_in_reads),
                Cell::Number(m.contig_discrodant),
            ]);
        }
        Ok(Some(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ReportError;
    use crate::core::model::ReportData;

    #[test]
    fn renders_one_row_per_sample() {
        let data = ReportData::from_json_str(
            r#"{"correct_variant": {
                "s1": {"corrected_contigs": 12, "insertion_case": 3, "deletion_case": 4,
                       "substitution_case": 5, "errors_in_reads": 10234, "contig_discrodant": 0},
                "s2": {"corrected_contigs": 1, "insertion_case": 0, "deletion_case": 0,
                       "substitution_case": 1, "errors_in_reads": 7, "contig_discrodant": 1}
            }}"#,
        )
        .unwrap();
        let ctx = ReportContext::new(&data);
        let table = CorrectionSection.table(&ctx).unwrap().unwrap();
        assert_eq!(table.rows.len(), 2);
        let html = table.render().unwrap();
        assert!(html.contains("<td>s1</td>"));
        assert!(html.contains("<td>10,234</td>"));
    }

    #[test]
    fn missing_field_is_an_error() {
        let data = ReportData::from_json_str(
            r#"{"correct_variant": {"s1": {"corrected_contigs": 12}}}"#,
        )
        .unwrap();
        let ctx = ReportContext::new(&data);
        let err = CorrectionSection.table(&ctx).unwrap_err();
        assert!(matches!(err, ReportError::Record { .. }));
    }
}
