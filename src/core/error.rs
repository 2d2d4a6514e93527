use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("section '{section}' is not an object keyed by sample")]
    SectionShape { section: String },
    #[error("invalid record for sample '{sample}' in section '{section}': {source}")]
    Record {
        section: String,
        sample: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("sample '{sample}' is missing from section '{section}'")]
    MissingSample { section: String, sample: String },
    #[error("section '{0}' is not present in the metrics")]
    MissingSection(String),
    #[error("unknown report section '{0}'")]
    UnknownSection(String),
    #[error("table '{title}': row {row} has {found} cells, expected {expected}")]
    RowWidth {
        title: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}
