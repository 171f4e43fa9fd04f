//! Bar chart of the grade distribution.
//!
//! The pipeline hands a [`ChartData`] to a [`ChartRenderer`] through
//! [`present`] once the report is on disk. Rendering is best effort: a
//! failing renderer is logged and never fails the run.

mod svg;
mod terminal;

pub use svg::SvgChart;
pub use terminal::TerminalChart;

use crate::report::ReportWritten;
use crate::stats::GradeStats;
use crate::student::Category;
use anyhow::Result;
use tracing::{error, info};

pub const DEFAULT_CHART_PATH: &str = "grade_chart.svg";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
}

/// Everything a renderer needs to draw the distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl ChartData {
    pub fn max_value(&self) -> usize {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

impl From<&GradeStats> for ChartData {
    /// `Total` first, then one bar per category.
    fn from(stats: &GradeStats) -> Self {
        let mut bars = vec![Bar {
            label: "Total".to_string(),
            value: stats.total(),
        }];
        bars.extend(Category::ALL.iter().map(|c| Bar {
            label: c.chart_label().to_string(),
            value: stats.count(*c),
        }));

        Self {
            title: "Student performance".to_string(),
            x_label: "Category".to_string(),
            y_label: "Count".to_string(),
            bars,
        }
    }
}

pub trait ChartRenderer {
    fn render(&self, chart: &ChartData) -> Result<()>;
}

/// Hands the chart to `renderer`. Requires a [`ReportWritten`] so a chart is
/// only ever shown for a report that exists. Returns whether rendering
/// succeeded; errors are logged here and go no further.
pub fn present(written: &ReportWritten, chart: &ChartData, renderer: &dyn ChartRenderer) -> bool {
    match renderer.render(chart) {
        Ok(()) => {
            info!(report = %written.path().display(), "Chart rendered");
            true
        }
        Err(e) => {
            error!(error = %e, "Failed to render chart");
            false
        }
    }
}
