use crate::core::error::{ReportError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::io::Read;

/// Sample key the pipeline uses when metrics are not split by sample.
pub const AGGREGATE_KEY: &str = "default";

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum SampleId {
    Aggregate,
    Named(String),
}

impl SampleId {
    pub fn parse(key: &str) -> Self {
        if key == AGGREGATE_KEY {
            SampleId::Aggregate
        } else {
            SampleId::Named(key.to_string())
        }
    }

    /// Key as written in the metrics document.
    pub fn key(&self) -> &str {
        match self {
            SampleId::Aggregate => AGGREGATE_KEY,
            SampleId::Named(name) => name,
        }
    }

    /// Name shown in tables and charts.
    pub fn display(&self) -> &str {
        match self {
            SampleId::Aggregate => "-",
            SampleId::Named(name) => name,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, SampleId::Aggregate)
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<&SampleId> for Cell {
    fn from(v: &SampleId) -> Self {
        Cell::Text(v.display().to_string())
    }
}

/// Five-number summary of a distribution.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    pub fn as_box(&self) -> [f64; 5] {
        [
            self.min,
            self.lower_quartile,
            self.median,
            self.upper_quartile,
            self.max,
        ]
    }

    /// Same as `as_box` with every value truncated toward zero.
    pub fn as_int_box(&self) -> [f64; 5] {
        self.as_box().map(f64::trunc)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LengthDistribution {
    pub sum: f64,
    pub mean: f64,
    #[serde(flatten)]
    pub summary: FiveNumberSummary,
}

/// Per-sample records of one report section, in display order.
#[derive(Clone, Debug)]
pub struct SampleMetrics<R> {
    section: String,
    entries: Vec<(SampleId, R)>,
}

impl<R: DeserializeOwned> SampleMetrics<R> {
    pub fn from_value(section: &str, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| ReportError::SectionShape {
            section: section.to_string(),
        })?;
        let mut entries = Vec::with_capacity(object.len());
        for (key, raw) in object {
            let record = R::deserialize(raw).map_err(|source| ReportError::Record {
                section: section.to_string(),
                sample: key.clone(),
                source,
            })?;
            entries.push((SampleId::parse(key), record));
        }
        Ok(Self {
            section: section.to_string(),
            entries,
        })
    }
}

impl<R> SampleMetrics<R> {
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, sample: &SampleId) -> Option<&R> {
        self.entries
            .iter()
            .find(|(id, _)| id == sample)
            .map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SampleId, &R)> {
        self.entries.iter().map(|(id, r)| (id, r))
    }

    /// Records in `order` when given, otherwise in document order.
    pub fn ordered<'a>(&'a self, order: Option<&'a [SampleId]>) -> Result<Vec<(&'a SampleId, &'a R)>> {
        let Some(order) = order else {
            return Ok(self.iter().collect());
        };
        order
            .iter()
            .map(|sample| {
                self.get(sample)
                    .map(|record| (sample, record))
                    .ok_or_else(|| ReportError::MissingSample {
                        section: self.section.clone(),
                        sample: sample.key().to_string(),
                    })
            })
            .collect()
    }
}

/// The whole metrics document: section key -> sample key -> record.
#[derive(Clone, Debug, Default)]
pub struct ReportData {
    sections: Map<String, Value>,
}

impl ReportData {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let sections: Map<String, Value> = serde_json::from_reader(reader)?;
        Ok(Self { sections })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let sections: Map<String, Value> = serde_json::from_str(s)?;
        Ok(Self { sections })
    }

    pub fn from_map(sections: Map<String, Value>) -> Self {
        Self { sections }
    }

    pub fn contains(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn section<R: DeserializeOwned>(&self, name: &str) -> Result<SampleMetrics<R>> {
        let value = self
            .sections
            .get(name)
            .ok_or_else(|| ReportError::MissingSection(name.to_string()))?;
        SampleMetrics::from_value(name, value)
    }

    pub fn optional_section<R: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<SampleMetrics<R>>> {
        match self.sections.get(name) {
            Some(value) => SampleMetrics::from_value(name, value).map(Some),
            None => Ok(None),
        }
    }
}
