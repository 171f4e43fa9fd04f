use super::{ChartData, ChartRenderer};
use anyhow::{Result, anyhow};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Writes the chart as a vertical bar chart in an SVG file.
pub struct SvgChart {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgChart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (900, 600),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartRenderer for SvgChart {
    fn render(&self, chart: &ChartData) -> Result<()> {
        let draw_err = |e: &dyn std::fmt::Display| {
            anyhow!("failed to draw chart '{}': {e}", self.path.display())
        };

        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| draw_err(&e))?;

        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        let y_max = chart.max_value() as u32 + 1;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..labels.len()).into_segmented(), 0u32..y_max)
            .map_err(|e| draw_err(&e))?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => {
                    labels.get(*i).map(|s| s.to_string()).unwrap_or_default()
                }
                _ => String::new(),
            })
            .draw()
            .map_err(|e| draw_err(&e))?;

        ctx.draw_series(
            Histogram::vertical(&ctx)
                .style(BLUE.mix(0.6).filled())
                .margin(12)
                .data(chart.bars.iter().enumerate().map(|(i, b)| (i, b.value as u32))),
        )
        .map_err(|e| draw_err(&e))?;

        root.present().map_err(|e| draw_err(&e))?;
        Ok(())
    }
}
