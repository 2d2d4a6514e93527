use crate::cli::args::{Cli, Commands, OutputKindArg, RenderArgs, SectionArgs};
use anyhow::{Context, Result, bail};
use clap::Parser;
use drap_report::core::io::read_report_data;
use drap_report::core::model::SampleId;
use drap_report::report;
use drap_report::report::chart::PieTheme;
use drap_report::report::html::PageOptions;
use drap_report::report::sections::{Registry, ReportContext};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const REPORT_FILE: &str = "report.html";

pub struct RenderConfig {
    pub metrics: PathBuf,
    pub out_dir: PathBuf,
    pub name: String,
    pub samples: Option<Vec<SampleId>>,
    pub theme: PieTheme,
    pub page: PageOptions,
    pub zip: bool,
}

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Section(args) => section(args),
        Commands::Sections => {
            for name in Registry::builtin().names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    stage(stats, "preflight", || {
        if !args.metrics.is_file() {
            bail!("metrics file not found: {}", args.metrics.display());
        }
        Ok(())
    })?;

    let name = match &args.name {
        Some(s) => s.clone(),
        None => metrics_stem(&args.metrics)
            .context("failed to determine report name from metrics file")?,
    };
    let config = RenderConfig {
        metrics: args.metrics.clone(),
        out_dir: args.out.join(format!("{}_report", name)),
        samples: parse_samples(args.samples.as_deref()),
        theme: PieTheme {
            contrast_text_color: args.pie_label_color.clone(),
        },
        page: PageOptions {
            title: args.title.clone().unwrap_or_else(|| format!("DRAP report: {}", name)),
            highcharts_url: args.highcharts_url.clone(),
            highcharts_more_url: args.highcharts_more_url.clone(),
            ..PageOptions::default()
        },
        zip: !args.no_zip,
        name,
    };

    let t_read = Instant::now();
    let data = read_report_data(&config.metrics)?;
    stage_done(stats, "read", t_read);

    let registry = Registry::builtin();
    if stats {
        for section in data.section_names() {
            if registry.get(section).is_none() {
                eprintln!("DRAP_REPORT_STATS skipped_section={}", section);
            }
        }
    }

    let t_sections = Instant::now();
    let mut ctx = ReportContext::new(&data).with_theme(config.theme.clone());
    if let Some(samples) = &config.samples {
        ctx = ctx.with_samples(samples);
    }
    let sections = registry
        .render_all(&ctx)
        .with_context(|| format!("failed to render {}", config.metrics.display()))?;
    stage_done(stats, "sections", t_sections);
    if stats {
        eprintln!("DRAP_REPORT_STATS sections={}", sections.len());
    }

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed to create output dir {}", config.out_dir.display()))?;

    let html_path = config.out_dir.join(REPORT_FILE);
    let t_html = Instant::now();
    report::html::write(&html_path, &sections, &config.page)
        .with_context(|| format!("failed to write {}", html_path.display()))?;
    stage_done(stats, "html", t_html);
    if stats {
        let html_size = fs::metadata(&html_path).map(|m| m.len()).unwrap_or(0);
        eprintln!(
            "DRAP_REPORT_STATS output html={} bytes={}",
            html_path.display(),
            html_size
        );
    }

    if config.zip {
        let t_zip = Instant::now();
        let zip_path =
            report::zip::write_zip(&args.out, &format!("{}_report", config.name), &[REPORT_FILE])
                .with_context(|| "failed to create zip output")?;
        stage_done(stats, "zip", t_zip);
        if stats {
            let zip_size = fs::metadata(&zip_path).map(|m| m.len()).unwrap_or(0);
            eprintln!(
                "DRAP_REPORT_STATS output zip={} bytes={}",
                zip_path.display(),
                zip_size
            );
        }
    }

    if stats {
        eprintln!("DRAP_REPORT_STATS output_dir={}", config.out_dir.display());
        eprintln!("DRAP_REPORT_STATS total={}", fmt_dur(t0.elapsed()));
    }

    Ok(())
}

fn section(args: SectionArgs) -> Result<()> {
    let stats = stats_enabled();
    let t_read = Instant::now();
    let data = read_report_data(&args.metrics)?;
    stage_done(stats, "read", t_read);

    let samples = parse_samples(args.samples.as_deref());
    let theme = PieTheme {
        contrast_text_color: args.pie_label_color.clone(),
    };
    let mut ctx = ReportContext::new(&data).with_theme(theme);
    if let Some(samples) = &samples {
        ctx = ctx.with_samples(samples);
    }

    let t_render = Instant::now();
    let output = Registry::builtin()
        .render(&args.section, &ctx)
        .with_context(|| format!("failed to render section {}", args.section))?;
    stage_done(stats, "render", t_render);

    match args.kind {
        OutputKindArg::Table => match output.table {
            Some(table) => print!("{}", table),
            None => bail!("section {} has no table", args.section),
        },
        OutputKindArg::Chart => {
            if output.charts.is_empty() {
                bail!("section {} has no chart", args.section);
            }
            println!("{}", serde_json::to_string_pretty(&output.charts)?);
        }
    }
    Ok(())
}

fn parse_samples(samples: Option<&[String]>) -> Option<Vec<SampleId>> {
    samples.map(|list| {
        list.iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(SampleId::parse)
            .collect()
    })
}

fn metrics_stem(path: &std::path::Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let name = name.strip_suffix(".gz").unwrap_or(name);
    let stem = name.strip_suffix(".json").unwrap_or(name);
    (!stem.is_empty()).then(|| stem.to_string())
}

fn stats_enabled() -> bool {
    matches!(env::var("DRAP_REPORT_STATS").as_deref(), Ok("1"))
}

fn stage<F>(stats: bool, name: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let t = Instant::now();
    let res = f();
    if stats {
        eprintln!("DRAP_REPORT_STATS stage={} time={}", name, fmt_dur(t.elapsed()));
    }
    res
}

fn stage_done(stats: bool, name: &str, t: Instant) {
    if stats {
        eprintln!("DRAP_REPORT_STATS stage={} time={}", name, fmt_dur(t.elapsed()));
    }
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_strip_json_and_gz() {
        assert_eq!(metrics_stem(std::path::Path::new("a/run1.json")).as_deref(), Some("run1"));
        assert_eq!(metrics_stem(std::path::Path::new("run1.json.gz")).as_deref(), Some("run1"));
        assert_eq!(metrics_stem(std::path::Path::new("run1.gz")).as_deref(), Some("run1"));
        assert_eq!(metrics_stem(std::path::Path::new("run1")).as_deref(), Some("run1"));
    }

    #[test]
    fn samples_are_trimmed_and_parsed() {
        let raw = vec!["default".to_string(), " leaf ".to_string(), String::new()];
        let samples = parse_samples(Some(raw.as_slice())).unwrap();
        assert_eq!(samples, vec![SampleId::Aggregate, SampleId::parse("leaf")]);
        assert!(parse_samples(None).is_none());
    }
}
