use super::{ChartData, ChartRenderer};
use anyhow::Result;
use std::cell::RefCell;
use std::io::Write;

const BAR_WIDTH: usize = 40;

/// Draws the chart as horizontal text bars, one line per category.
pub struct TerminalChart<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> TerminalChart<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl TerminalChart<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ChartRenderer for TerminalChart<W> {
    fn render(&self, chart: &ChartData) -> Result<()> {
        let mut out = self.out.borrow_mut();
        let label_width = chart
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);
        let max = chart.max_value();

        writeln!(out, "{}", chart.title)?;
        for bar in &chart.bars {
            let len = if max == 0 {
                0
            } else {
                bar.value * BAR_WIDTH / max
            };
            writeln!(
                out,
                "{:<label_width$} | {} {}",
                bar.label,
                "#".repeat(len),
                bar.value
            )?;
        }
        out.flush()?;

        Ok(())
    }
}
