use crate::report::chart::{DataPoint, Series};
use serde::Serialize;

/// Charts whose maximum stays below this are never zoomed.
pub const OUTLIER_FLOOR: f64 = 1000.0;
/// Full range must exceed this many interquartile spans to zoom.
pub const OUTLIER_SPREAD: f64 = 3.0;

/// Operations a rendered chart exposes to a zoom policy.
pub trait ChartHandle {
    fn set_y_extremes(&mut self, min: f64, max: f64);
    fn show_reset_zoom(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ZoomWindow {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ZoomPolicy {
    #[default]
    Noop,
    Window(ZoomWindow),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Extent {
    min: f64,
    min_lower_quartile: f64,
    max_upper_quartile: f64,
    max: f64,
}

impl Extent {
    fn seed(b: &[f64; 5]) -> Self {
        Self {
            min: b[0],
            min_lower_quartile: b[1],
            max_upper_quartile: b[3],
            max: b[4],
        }
    }

    fn update(&mut self, b: &[f64; 5]) {
        self.min = self.min.min(b[0]);
        self.min_lower_quartile = self.min_lower_quartile.min(b[1]);
        self.max_upper_quartile = self.max_upper_quartile.max(b[3]);
        self.max = self.max.max(b[4]);
    }
}

impl ZoomPolicy {
    /// Initial zoom for a boxplot, computed from the first series only.
    ///
    /// When the whiskers reach above `OUTLIER_FLOOR` and the full range is more
    /// than `OUTLIER_SPREAD` times the quartile span, the y axis is narrowed to
    /// `[0, maxUQ + (maxUQ - minLQ)]`.
    pub fn for_boxplot(series: &[Series]) -> Self {
        let Some(first) = series.first() else {
            return ZoomPolicy::Noop;
        };
        let mut boxes = first.data.iter().filter_map(|p| match p {
            DataPoint::Box(b) => Some(b),
            _ => None,
        });
        let Some(seed) = boxes.next() else {
            return ZoomPolicy::Noop;
        };
        let mut ext = Extent::seed(seed);
        for b in boxes {
            ext.update(b);
        }

        let spread = ext.max_upper_quartile - ext.min_lower_quartile;
        if ext.max > OUTLIER_FLOOR && (ext.max - ext.min) > OUTLIER_SPREAD * spread {
            ZoomPolicy::Window(ZoomWindow {
                min: 0.0,
                max: ext.max_upper_quartile + spread,
            })
        } else {
            ZoomPolicy::Noop
        }
    }

    pub fn window(&self) -> Option<ZoomWindow> {
        match self {
            ZoomPolicy::Noop => None,
            ZoomPolicy::Window(w) => Some(*w),
        }
    }

    pub fn apply<H: ChartHandle + ?Sized>(&self, chart: &mut H) {
        if let ZoomPolicy::Window(w) = self {
            chart.set_y_extremes(w.min, w.max);
            chart.show_reset_zoom();
        }
    }

    /// Highcharts load callback applying the zoom, `None` for a no-op.
    pub fn js_callback(&self) -> Option<String> {
        self.window().map(|w| {
            format!(
                "function(chart){{ chart.yAxis[0].setExtremes({}, {}); chart.showResetZoom(); }}",
                w.min, w.max
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        extremes: Option<(f64, f64)>,
        reset_shown: bool,
    }

    impl ChartHandle for Recorder {
        fn set_y_extremes(&mut self, min: f64, max: f64) {
            self.extremes = Some((min, max));
        }

        fn show_reset_zoom(&mut self) {
            self.reset_shown = true;
        }
    }

    fn boxes(points: &[[f64; 5]]) -> Vec<Series> {
        vec![Series::new(
            "s",
            points.iter().map(|b| DataPoint::Box(*b)).collect(),
        )]
    }

    #[test]
    fn zooms_on_outlier_dominated_data() {
        let series = boxes(&[[0.0, 10.0, 50.0, 90.0, 100.0], [0.0, 10.0, 50.0, 90.0, 2000.0]]);
        let zoom = ZoomPolicy::for_boxplot(&series);
        assert_eq!(zoom.window(), Some(ZoomWindow { min: 0.0, max: 170.0 }));

        let mut chart = Recorder::default();
        zoom.apply(&mut chart);
        assert_eq!(chart.extremes, Some((0.0, 170.0)));
        assert!(chart.reset_shown);
        assert_eq!(
            zoom.js_callback().unwrap(),
            "function(chart){ chart.yAxis[0].setExtremes(0, 170); chart.showResetZoom(); }"
        );
    }

    #[test]
    fn keeps_full_range_below_thresholds() {
        let series = boxes(&[[0.0, 10.0, 50.0, 90.0, 100.0], [0.0, 12.0, 55.0, 88.0, 120.0]]);
        let zoom = ZoomPolicy::for_boxplot(&series);
        assert_eq!(zoom, ZoomPolicy::Noop);

        let mut chart = Recorder::default();
        zoom.apply(&mut chart);
        assert_eq!(chart.extremes, None);
        assert!(!chart.reset_shown);
        assert_eq!(zoom.js_callback(), None);
    }

    #[test]
    fn large_but_compact_data_is_not_zoomed() {
        // max > 1000 but range within 3 quartile spans
        let series = boxes(&[[500.0, 900.0, 1000.0, 1100.0, 1500.0]]);
        assert_eq!(ZoomPolicy::for_boxplot(&series), ZoomPolicy::Noop);
    }

    #[test]
    fn first_point_seeds_upper_quartile() {
        let series = boxes(&[[0.0, 10.0, 50.0, 400.0, 5000.0], [0.0, 20.0, 30.0, 40.0, 60.0]]);
        let zoom = ZoomPolicy::for_boxplot(&series);
        assert_eq!(zoom.window(), Some(ZoomWindow { min: 0.0, max: 790.0 }));
    }

    #[test]
    fn only_first_series_counts() {
        let mut series = boxes(&[[0.0, 10.0, 50.0, 90.0, 100.0]]);
        series.extend(boxes(&[[0.0, 10.0, 50.0, 90.0, 9000.0]]));
        assert_eq!(ZoomPolicy::for_boxplot(&series), ZoomPolicy::Noop);
    }

    #[test]
    fn empty_input_is_noop() {
        assert_eq!(ZoomPolicy::for_boxplot(&[]), ZoomPolicy::Noop);
        assert_eq!(ZoomPolicy::for_boxplot(&boxes(&[])), ZoomPolicy::Noop);
    }
}
