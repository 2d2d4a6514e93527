use crate::core::error::{ReportError, Result};
use crate::core::format::rounded_percent;
use crate::core::model::{Cell, SampleMetrics};
use crate::report::chart::{Chart, ChartConfig, DataPoint, Series, column_chart};
use crate::report::sections::{CategoryCounts, ReportContext, Section, fasta, sorted_categories};
use crate::report::table::TableSpec;
use serde::Deserialize;

pub const SECTION: &str = "protein";

#[derive(Clone, Debug, Deserialize)]
pub struct ProteinMetrics {
    pub nb_contig_with_prot: f64,
    pub nb_diff_proteins: f64,
    /// Number of contigs by number of non-overlapping aligned proteins.
    pub nb_contig_by_nb_prot: CategoryCounts,
}

/// The part of a `fasta` record used to normalize contig counts.
#[derive(Clone, Debug, Deserialize)]
pub struct SequenceCount {
    pub nb_seq: f64,
}

pub struct ProteinSection;

impl Section for ProteinSection {
    fn name(&self) -> &'static str {
        SECTION
    }

    fn title(&self) -> &'static str {
        "Reference proteins alignment"
    }

    fn table(&self, ctx: &ReportContext<'_>) -> Result<Option<TableSpec>> {
        let metrics = ctx.data.section::<ProteinMetrics>(SECTION)?;
        let mut table = TableSpec::new(
            "Alignment count",
            &["Sample", "Nb contig with protein(s)", "Nb protein(s) aligned on contig"],
        );
        for (sample, m) in metrics.ordered(ctx.samples)? {
            table.push_row(vec![
                sample.into(),
                Cell::Number(m.nb_contig_with_prot),
                Cell::Number(m.nb_diff_proteins),
            ]);
        }
        Ok(Some(table))
    }

    fn charts(&self, ctx: &ReportContext<'_>) -> Result<Vec<Chart>> {
        let metrics = ctx.data.section::<ProteinMetrics>(SECTION)?;
        let totals = ctx.data.optional_section::<SequenceCount>(fasta::SECTION)?;
        Ok(vec![Chart::plain(contigs_by_protein_chart(
            &metrics,
            totals.as_ref(),
            ctx,
        )?)])
    }
}

/// Contigs by number of proteins, as a percentage of each sample's sequence
/// count when `totals` is given.
pub fn contigs_by_protein_chart(
    metrics: &SampleMetrics<ProteinMetrics>,
    totals: Option<&SampleMetrics<SequenceCount>>,
    ctx: &ReportContext<'_>,
) -> Result<ChartConfig> {
    let rows = metrics.ordered(ctx.samples)?;
    let categories = sorted_categories(rows.iter().flat_map(|(_, m)| m.nb_contig_by_nb_prot.keys()));

    let mut series = Vec::with_capacity(rows.len());
    for (idx, (sample, m)) in rows.iter().enumerate() {
        let nb_seq = match totals {
            Some(totals) => Some(
                totals
                    .get(sample)
                    .ok_or_else(|| ReportError::MissingSample {
                        section: totals.section().to_string(),
                        sample: sample.key().to_string(),
                    })?
                    .nb_seq,
            ),
            None => None,
        };
        let data = categories
            .iter()
            .map(|key| {
                let count = m.nb_contig_by_nb_prot.get(key).copied().unwrap_or(0.0);
                match nb_seq {
                    Some(total) => DataPoint::Value(rounded_percent(count, total)),
                    None => DataPoint::Value(count),
                }
            })
            .collect();
        series.push(Series::new(sample.display(), data).with_index(idx));
    }

    let y_title = if totals.is_some() { "% contigs" } else { "Nb contigs" };
    Ok(column_chart(
        "Nb of non-overlapping proteins by contigs",
        Some("Nb protein(s)"),
        Some(y_title),
        Some(categories),
        series,
    ))
}
