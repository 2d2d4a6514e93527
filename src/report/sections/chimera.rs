use crate::core::error::Result;
use crate::core::model::Cell;
use crate::report::sections::{ReportContext, Section};
use crate::report::table::TableSpec;
use serde::Deserialize;

pub const SECTION: &str = "chimera";

#[derive(Clone, Debug, Deserialize)]
pub struct ChimeraMetrics {
    pub nb_chimera_removed: f64,
    pub nb_chimera_trim: f64,
    pub nb_nt_lost: f64,
}

pub struct ChimeraSection;

impl Section for ChimeraSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Chimera removal"
    }

    fn table(&self, ctx: &ReportContext<'_>) -> Result<Option<TableSpec>> {
        let metrics = ctx.data.section::<ChimeraMetrics>(SECTION)?;
        let mut table = TableSpec::new(
            "Cleaning information",
            &["Sample", "Nb seq removed", "Nb seq trimmed", "Nb nt lost"],
        );
        for (sample, m) in metrics.ordered(ctx.samples)? {
            table.push_row(vec![
                sample.into(),
                Cell::Number(m.nb_chimera_removed),
                Cell::Number(m.nb_chimera_trim),
                Cell::Number(m.nb_nt_lost),
            ]);
        }
        Ok(Some(table))
    }
}
