use clap::{Parser, Subcommand, ValueEnum};
use drap_report::report::html::{HIGHCHARTS_MORE_URL, HIGHCHARTS_URL};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "drap-report",
    version,
    about = "HTML tables and Highcharts charts for DRAP assembly metrics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a standalone HTML report for every known section.
    Render(RenderArgs),
    /// Print one section's table markup or chart configuration.
    Section(SectionArgs),
    /// List the known section names.
    Sections,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Metrics JSON, optionally gzip-compressed.
    pub metrics: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// Display order of samples; every sample must exist in each section.
    #[arg(long, value_delimiter = ',')]
    pub samples: Option<Vec<String>>,

    #[arg(long, default_value = HIGHCHARTS_URL)]
    pub highcharts_url: String,

    #[arg(long, default_value = HIGHCHARTS_MORE_URL)]
    pub highcharts_more_url: String,

    #[arg(long)]
    pub pie_label_color: Option<String>,

    #[arg(long, default_value_t = false)]
    pub no_zip: bool,
}

#[derive(Parser)]
pub struct SectionArgs {
    pub metrics: PathBuf,

    pub section: String,

    #[arg(long, value_delimiter = ',')]
    pub samples: Option<Vec<String>>,

    #[arg(long, value_enum, default_value_t = OutputKindArg::Table)]
    pub kind: OutputKindArg,

    #[arg(long)]
    pub pie_label_color: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputKindArg {
    #[value(name = "table")]
    Table,
    #[value(name = "chart")]
    Chart,
}
