//! Report sections: one adapter per pipeline step, looked up by the key the
//! step's metrics use in the report document.

use crate::core::error::{ReportError, Result};
use crate::core::model::{ReportData, SampleId};
use crate::report::chart::{Chart, PieTheme};
use crate::report::table::TableSpec;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub mod chimera;
pub mod correction;
pub mod expression;
pub mod fasta;
pub mod gene_set;
pub mod mapping;
pub mod orf;
pub mod orientation;
pub mod protein;
pub mod scoring;

/// Counts keyed by a category label holding a number, e.g. `"3"` or `"45"`.
pub type CategoryCounts = BTreeMap<String, f64>;

pub struct ReportContext<'a> {
    pub data: &'a ReportData,
    pub samples: Option<&'a [SampleId]>,
    pub theme: PieTheme,
}

impl<'a> ReportContext<'a> {
    pub fn new(data: &'a ReportData) -> Self {
        Self {
            data,
            samples: None,
            theme: PieTheme::default(),
        }
    }

    pub fn with_samples(mut self, samples: &'a [SampleId]) -> Self {
        self.samples = Some(samples);
        self
    }

    pub fn with_theme(mut self, theme: PieTheme) -> Self {
        self.theme = theme;
        self
    }
}

pub trait Section {
    /// Key of the section in the metrics document.
    fn name(&self) -> &'static str;

    /// Heading used on the report page.
    fn title(&self) -> &'static str;

    fn table(&self, _ctx: &ReportContext<'_>) -> Result<Option<TableSpec>> {
        Ok(None)
    }

    fn charts(&self, _ctx: &ReportContext<'_>) -> Result<Vec<Chart>> {
        Ok(Vec::new())
    }

    /// Extra markup placed after the table and charts.
    fn figure(&self) -> Option<String> {
        None
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionOutput {
    pub name: &'static str,
    pub title: &'static str,
    pub table: Option<String>,
    pub charts: Vec<Chart>,
    pub figure: Option<String>,
}

pub struct Registry {
    sections: Vec<Box<dyn Section>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Every built-in section, in pipeline order.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(fasta::FastaSection));
        registry.register(Box::new(chimera::ChimeraSection));
        registry.register(Box::new(correction::CorrectionSection));
        registry.register(Box::new(scoring::ScoringSection));
        registry.register(Box::new(mapping::MappingSection));
        registry.register(Box::new(orientation::OrientationSection));
        registry.register(Box::new(expression::ExpressionSection));
        registry.register(Box::new(orf::OrfSection));
        registry.register(Box::new(protein::ProteinSection));
        registry.register(Box::new(gene_set::GeneSetSection));
        registry
    }

    /// Adds a section; a section with the same name is replaced in place.
    pub fn register(&mut self, section: Box<dyn Section>) {
        match self.sections.iter().position(|s| s.name() == section.name()) {
            Some(idx) => self.sections[idx] = section,
            None => self.sections.push(section),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Section> {
        self.sections
            .iter()
            .find(|s| s.name() == name)
            .map(|s| &**s)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|s| s.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Section> {
        self.sections.iter().map(|s| &**s)
    }

    pub fn render(&self, name: &str, ctx: &ReportContext<'_>) -> Result<SectionOutput> {
        let section = self
            .get(name)
            .ok_or_else(|| ReportError::UnknownSection(name.to_string()))?;
        if !ctx.data.contains(name) {
            return Err(ReportError::MissingSection(name.to_string()));
        }
        render_section(section, ctx)
    }

    /// Renders every registered section present in the data.
    pub fn render_all(&self, ctx: &ReportContext<'_>) -> Result<Vec<SectionOutput>> {
        self.iter()
            .filter(|s| ctx.data.contains(s.name()))
            .map(|s| render_section(s, ctx))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn render_section(section: &dyn Section, ctx: &ReportContext<'_>) -> Result<SectionOutput> {
    let table = match section.table(ctx)? {
        Some(table) => Some(table.render()?),
        None => None,
    };
    Ok(SectionOutput {
        name: section.name(),
        title: section.title(),
        table,
        charts: section.charts(ctx)?,
        figure: section.figure(),
    })
}

fn category_order(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Distinct category labels in ascending numeric order. Labels that are not
/// numbers come last, in lexicographic order.
pub fn sorted_categories<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out: Vec<String> = keys.into_iter().cloned().collect();
    out.sort_by(|a, b| category_order(a, b));
    out.dedup();
    out
}

/// Integer value of a category label, truncating any decimal part.
pub(crate) fn category_int(key: &str) -> Option<i64> {
    let v = key.trim().parse::<f64>().ok()?;
    v.is_finite().then(|| v.trunc() as i64)
}
