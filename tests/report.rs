use std::fs;
use std::io::Read;
use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::*;

use drap_report::core::io::read_report_data;
use drap_report::report::chart::{ChartType, DataPoint};
use drap_report::report::html::{self, PageOptions, render_page};
use drap_report::report::zip::write_zip;
use drap_report::report::sections::{Registry, ReportContext};
use drap_report::report::zoom::ZoomPolicy;
use drap_report::{ReportData, ReportError, SampleId};

#[fixture]
fn path_to_metrics() -> &'static str {
    "tests/data/metrics.json"
}

#[fixture]
fn data(path_to_metrics: &str) -> ReportData {
    read_report_data(Path::new(path_to_metrics)).unwrap()
}

#[rstest]
fn renders_every_known_section(data: ReportData) {
    let ctx = ReportContext::new(&data);
    let sections = Registry::builtin().render_all(&ctx).unwrap();
    let names: Vec<&str> = sections.iter().map(|s| s.name).collect();
    // bowtie_index has no adapter and is left out
    assert_eq!(
        names,
        vec![
            "fasta",
            "chimera",
            "correct_variant",
            "scoring",
            "mapping",
            "orientation",
            "expression",
            "transdecoder",
            "protein",
            "busco"
        ]
    );
}

#[rstest]
fn rendering_is_idempotent(data: ReportData) {
    let ctx = ReportContext::new(&data);
    let registry = Registry::builtin();
    let first = render_page(&registry.render_all(&ctx).unwrap(), &PageOptions::default()).unwrap();
    let second = render_page(&registry.render_all(&ctx).unwrap(), &PageOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[rstest]
fn mapping_percentages(data: ReportData) {
    let ctx = ReportContext::new(&data);
    let table = Registry::builtin().render("mapping", &ctx).unwrap().table.unwrap();
    assert!(table.contains("<td>75%</td>\n      <td>75%</td>"));
    // root has no pairs
    assert!(table.contains("<td>83.33%</td>\n      <td>0%</td>"));
}

#[rstest]
fn length_boxplot_zooms_on_long_contigs(data: ReportData) {
    let ctx = ReportContext::new(&data);
    let output = Registry::builtin().render("fasta", &ctx).unwrap();
    let chart = &output.charts[0];
    assert_eq!(chart.config.kind(), Some(ChartType::Boxplot));
    // max 17320 > 1000 and 17320 - 200 > 3 * (1654 - 371)
    assert_eq!(
        chart.zoom.window().map(|w| (w.min, w.max)),
        Some((0.0, 2937.0))
    );
}

#[rstest]
fn scoring_boxplot_is_not_zoomed(data: ReportData) {
    let ctx = ReportContext::new(&data);
    let output = Registry::builtin().render("scoring", &ctx).unwrap();
    assert_eq!(output.charts[0].zoom, ZoomPolicy::Noop);
    assert!(output.table.unwrap().contains("<td>0.4129</td>"));
}

#[rstest]
fn protein_chart_is_normalized_by_sequence_count(data: ReportData) {
    let ctx = ReportContext::new(&data);
    let output = Registry::builtin().render("protein", &ctx).unwrap();
    let config = &output.charts[0].config;
    assert_eq!(
        config.x_axis.categories,
        Some(vec!["1".to_string(), "2".to_string(), "3".to_string(), "10".to_string()])
    );
    // 13011 / 48211 contigs
    assert_eq!(config.series[0].data[0], DataPoint::Value(26.99));
    assert_eq!(config.series[1].data[3], DataPoint::Value(0.0));
}

#[rstest]
fn sample_order_applies_to_every_section(data: ReportData) {
    let order = vec![SampleId::parse("root"), SampleId::parse("leaf")];
    let ctx = ReportContext::new(&data).with_samples(&order);
    let sections = Registry::builtin().render_all(&ctx).unwrap();
    for section in &sections {
        if let Some(table) = &section.table {
            let root = table.find("<td>root</td>").unwrap();
            let leaf = table.find("<td>leaf</td>").unwrap();
            assert!(root < leaf, "section {}", section.name);
        }
    }
    let orf = sections.iter().find(|s| s.name == "transdecoder").unwrap();
    assert_eq!(orf.charts[0].config.series[0].name, "root");
}

#[rstest]
fn unknown_sample_in_order_is_reported(data: ReportData) {
    let order = vec![SampleId::parse("stem")];
    let ctx = ReportContext::new(&data).with_samples(&order);
    let err = Registry::builtin().render("chimera", &ctx).unwrap_err();
    assert!(matches!(err, ReportError::MissingSample { ref sample, .. } if sample == "stem"));
}

#[rstest]
fn chart_json_matches_highcharts_keys(data: ReportData) {
    let ctx = ReportContext::new(&data);
    let output = Registry::builtin().render("transdecoder", &ctx).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&output.charts[0].config.to_json().unwrap()).unwrap();
    assert_eq!(value["chart"]["type"], "column");
    assert_eq!(value["xAxis"]["title"]["text"], "Nb ORF(s)");
    assert_eq!(value["yAxis"]["title"]["text"], "% contigs");
    assert_eq!(value["legend"]["enabled"], true);
    assert_eq!(value["credits"]["enabled"], false);
    assert_eq!(value["series"][0]["data"][3], serde_json::json!(["10", 0.03]));
}

#[rstest]
fn page_and_archive_round_trip(data: ReportData) {
    let dir = tempfile::tempdir().unwrap();
    let report_dir = dir.path().join("assembly_report");
    fs::create_dir_all(&report_dir).unwrap();

    let ctx = ReportContext::new(&data);
    let sections = Registry::builtin().render_all(&ctx).unwrap();
    let opts = PageOptions {
        title: "Assembly report".to_string(),
        ..PageOptions::default()
    };
    html::write(&report_dir.join("report.html"), &sections, &opts).unwrap();
    let page = fs::read_to_string(report_dir.join("report.html")).unwrap();
    assert!(page.contains("<h1>Assembly report</h1>"));
    assert!(page.contains("Highcharts.chart('chart-fasta-0'"));
    assert!(page.contains("setExtremes(0, 2937)"));

    let zip_path = write_zip(dir.path(), "assembly_report", &["report.html"]).unwrap();
    let mut archive = ::zip::ZipArchive::new(fs::File::open(zip_path).unwrap()).unwrap();
    let mut entry = archive.by_name("assembly_report/report.html").unwrap();
    let mut packed = String::new();
    entry.read_to_string(&mut packed).unwrap();
    assert_eq!(packed, page);
}
