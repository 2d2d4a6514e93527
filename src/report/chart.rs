//! Highcharts configuration objects.
//!
//! The structures serialize to the option tree Highcharts expects
//! (`title`, `xAxis`, `yAxis`, `series`, `legend`, `credits`, `chart`,
//! `plotOptions`, `tooltip`). Builders never touch the page; the host passes
//! the JSON to `Highcharts.chart`.

use crate::core::error::Result;
use crate::report::zoom::ZoomPolicy;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Column,
    Pie,
    Boxplot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Title {
    pub text: Option<String>,
}

impl Title {
    fn new(text: Option<&str>) -> Self {
        Self {
            text: text.map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PointKey {
    Int(i64),
    Label(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataPoint {
    Value(f64),
    Keyed(PointKey, f64),
    Box([f64; 5]),
    Named { name: String, y: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartType>,
    pub name: String,
    pub data: Vec<DataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl Series {
    pub fn new(name: &str, data: Vec<DataPoint>) -> Self {
        Self {
            kind: None,
            name: name.to_string(),
            data,
            index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(rename = "type")]
    pub kind: ChartType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelStyle {
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataLabels {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<LabelStyle>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOptions {
    pub data_labels: DataLabels,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieOptions {
    pub allow_point_select: bool,
    pub cursor: String,
    pub data_labels: DataLabels,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxplotStyle {
    pub fill_color: &'static str,
    pub line_width: u32,
    pub median_color: &'static str,
    pub median_width: u32,
    pub stem_color: &'static str,
    pub stem_dash_style: &'static str,
    pub stem_width: u32,
    pub whisker_color: &'static str,
    pub whisker_length: &'static str,
    pub whisker_width: u32,
}

pub const BOXPLOT_STYLE: BoxplotStyle = BoxplotStyle {
    fill_color: "#F0F0E0",
    line_width: 1,
    median_color: "#0C5DA5",
    median_width: 3,
    stem_color: "#A63400",
    stem_dash_style: "dot",
    stem_width: 1,
    whisker_color: "#3D9200",
    whisker_length: "20%",
    whisker_width: 4,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlotOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pie: Option<PieOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxplot: Option<BoxplotStyle>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_pointer: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartOptions>,
    pub title: Title,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
    pub credits: Toggle,
    pub legend: Toggle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_options: Option<PlotOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
}

impl ChartConfig {
    pub fn kind(&self) -> Option<ChartType> {
        self.chart.as_ref().map(|c| c.kind)
    }

    pub fn legend_enabled(&self) -> bool {
        self.legend.enabled
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A chart configuration with the zoom to apply once Highcharts has drawn it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    pub config: ChartConfig,
    pub zoom: ZoomPolicy,
}

impl Chart {
    pub fn plain(config: ChartConfig) -> Self {
        Self {
            config,
            zoom: ZoomPolicy::Noop,
        }
    }
}

/// Label colour for pie charts; Highcharts themes provide a contrast colour.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieTheme {
    pub contrast_text_color: Option<String>,
}

impl PieTheme {
    pub fn label_color(&self) -> &str {
        self.contrast_text_color.as_deref().unwrap_or("black")
    }
}

pub fn chart_base(
    title: &str,
    x_title: Option<&str>,
    y_title: Option<&str>,
    x_categories: Option<Vec<String>>,
    series: Vec<Series>,
) -> ChartConfig {
    let legend = Toggle {
        enabled: series.len() > 1,
    };
    ChartConfig {
        chart: None,
        title: Title::new(Some(title)),
        x_axis: Axis {
            title: x_title.map(|t| Title::new(Some(t))),
            categories: x_categories,
            min: None,
        },
        y_axis: Axis {
            title: Some(Title::new(y_title)),
            categories: None,
            min: None,
        },
        series,
        credits: Toggle { enabled: false },
        legend,
        plot_options: None,
        tooltip: None,
    }
}

pub fn line_chart(
    title: &str,
    x_title: Option<&str>,
    y_title: Option<&str>,
    x_categories: Option<Vec<String>>,
    series: Vec<Series>,
) -> ChartConfig {
    let mut chart = chart_base(title, x_title, y_title, x_categories, series);
    chart.chart = Some(ChartOptions {
        kind: ChartType::Line,
        zoom_type: None,
    });
    chart
}

pub fn column_chart(
    title: &str,
    x_title: Option<&str>,
    y_title: Option<&str>,
    x_categories: Option<Vec<String>>,
    series: Vec<Series>,
) -> ChartConfig {
    let mut chart = chart_base(title, x_title, y_title, x_categories, series);
    chart.chart = Some(ChartOptions {
        kind: ChartType::Column,
        zoom_type: None,
    });
    chart.plot_options = Some(PlotOptions {
        column: Some(ColumnOptions {
            data_labels: DataLabels {
                enabled: true,
                format: None,
                style: None,
            },
        }),
        ..PlotOptions::default()
    });
    chart
}

/// Single-series pie; `unit` names the counted thing in the tooltip.
pub fn pie_chart(title: &str, data: Vec<DataPoint>, unit: &str, theme: &PieTheme) -> ChartConfig {
    let series = vec![Series {
        kind: Some(ChartType::Pie),
        ..Series::new(unit, data)
    }];
    let mut chart = chart_base(title, None, None, None, series);
    chart.tooltip = Some(Tooltip {
        point_format: Some("{series.name}: <b>{point.y:,.0f}</b>".to_string()),
        follow_pointer: None,
    });
    chart.plot_options = Some(PlotOptions {
        pie: Some(PieOptions {
            allow_point_select: true,
            cursor: "pointer".to_string(),
            data_labels: DataLabels {
                enabled: true,
                format: Some("<b>{point.name}</b>: {point.percentage:.1f}%".to_string()),
                style: Some(LabelStyle {
                    color: theme.label_color().to_string(),
                }),
            },
        }),
        ..PlotOptions::default()
    });
    chart
}

/// Box-and-whisker chart; data points are `[min, lq, median, uq, max]`.
pub fn boxplot_chart(
    title: &str,
    x_title: Option<&str>,
    y_title: Option<&str>,
    x_categories: Option<Vec<String>>,
    series: Vec<Series>,
) -> Chart {
    let zoom = ZoomPolicy::for_boxplot(&series);
    let mut chart = chart_base(title, x_title, y_title, x_categories, series);
    chart.chart = Some(ChartOptions {
        kind: ChartType::Boxplot,
        zoom_type: Some("y".to_string()),
    });
    chart.tooltip = Some(Tooltip {
        point_format: None,
        follow_pointer: Some(true),
    });
    chart.plot_options = Some(PlotOptions {
        boxplot: Some(BOXPLOT_STYLE),
        ..PlotOptions::default()
    });
    chart.y_axis.min = Some(0.0);
    Chart {
        config: chart,
        zoom,
    }
}
