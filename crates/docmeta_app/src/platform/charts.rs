use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use docmeta_core::{bind_aggregate_charts, AggregateSeries, ChartConfig, ChartId, ChartSurface};
use serde::Serialize;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartFormat {
    /// Horizontal bars drawn with text.
    Text,
    /// Chart.js configuration objects, one per canvas.
    Json,
}

pub fn load_series(path: Option<&Path>) -> Result<AggregateSeries> {
    let Some(path) = path else {
        return Ok(AggregateSeries::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn run_charts(series: &AggregateSeries, format: ChartFormat, out: &mut dyn Write) -> Result<()> {
    let mut surface = TerminalChartSurface { format, out };
    bind_aggregate_charts(series, &mut surface)
}

#[derive(Serialize)]
struct PlacedChart<'a> {
    canvas: &'static str,
    chart: &'a ChartConfig,
}

struct TerminalChartSurface<'a> {
    format: ChartFormat,
    out: &'a mut dyn Write,
}

impl ChartSurface for TerminalChartSurface<'_> {
    type Error = anyhow::Error;

    fn draw(&mut self, chart: ChartId, config: &ChartConfig) -> Result<()> {
        match self.format {
            ChartFormat::Json => {
                let placed = PlacedChart {
                    canvas: chart.canvas_id(),
                    chart: config,
                };
                writeln!(self.out, "{}", serde_json::to_string_pretty(&placed)?)?;
            }
            ChartFormat::Text => {
                for line in text_chart(config) {
                    writeln!(self.out, "{line}")?;
                }
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}

fn text_chart(config: &ChartConfig) -> Vec<String> {
    let title = &config.options.plugins.title.text;
    let mut lines = vec![title.clone(), "-".repeat(title.chars().count())];
    let Some(dataset) = config.data.datasets.first() else {
        return lines;
    };

    let label_width = config
        .data
        .labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = dataset.data.iter().cloned().fold(0.0_f64, f64::max);
    let total: f64 = dataset.data.iter().sum();
    let show_share = config.options.plugins.legend.display && total > 0.0;

    for (label, value) in config.data.labels.iter().zip(&dataset.data) {
        let filled = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let mut line = format!("{label:<label_width$} {} {value}", "#".repeat(filled.min(BAR_WIDTH)));
        if show_share {
            line.push_str(&format!(" ({:.0}%)", value / total * 100.0));
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_output_lists_every_chart() {
        let mut out = Vec::new();
        run_charts(&AggregateSeries::default(), ChartFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Document Type Distribution"));
        assert!(text.contains("Document Readability Distribution"));
        assert!(text.contains("Most Common Keywords Across Documents"));
        assert!(text.contains(&format!("PDF   {} 45 (45%)", "#".repeat(40))));
        assert!(text.contains(&format!("technology     {} 24\n", "#".repeat(40))));
    }

    #[test]
    fn json_output_names_canvases() {
        let mut out = Vec::new();
        run_charts(&AggregateSeries::default(), ChartFormat::Json, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"canvas\": \"documentTypesChart\""));
        assert!(text.contains("\"type\": \"doughnut\""));
        assert!(text.contains("\"canvas\": \"keywordsChart\""));
    }

    #[test]
    fn missing_series_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(load_series(Some(&temp.path().join("nope.json"))).is_err());
        assert_eq!(load_series(None).unwrap(), AggregateSeries::default());
    }
}
