//! Tables and Highcharts configurations for DRAP assembly reports.
//!
//! Metrics are read as a JSON document keyed by report section, then by
//! sample. Each section in [`report::sections::Registry`] turns its metrics
//! into an HTML table ([`report::table::TableSpec`]) and/or chart
//! configurations ([`report::chart::Chart`]); [`report::html`] assembles
//! them into a standalone page.

pub mod core;
pub mod report;

pub use crate::core::error::{ReportError, Result};
pub use crate::core::format::number_display;
pub use crate::core::model::{Cell, ReportData, SampleId, SampleMetrics};
