use std::fmt::{self, Write};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::{RenderError, VisualizerError};
use crate::metrics::{self, Extraction, Metric};
use crate::record::{self, StatRecord};
use crate::stats::{RenderedPlot, RunSummary};
use crate::{plot, Args};

/// Loads a crawl statistics export and renders one scatter plot per metric.
#[derive(Debug, Clone)]
pub struct StatsVisualizer {
    input: PathBuf,
    output_dir: PathBuf,
    size: (u32, u32),
}

impl StatsVisualizer {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            size,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(&args.input, &args.output_dir, (args.width, args.height))
    }

    pub fn load(&self) -> Result<Vec<StatRecord>, VisualizerError> {
        Ok(record::load(&self.input)?)
    }

    pub fn plot_path(&self, metric: Metric) -> PathBuf {
        self.output_dir.join(format!("{}.svg", metric.key()))
    }

    pub fn run(&self) -> Result<RunSummary, VisualizerError> {
        let total_start_time = Instant::now();
        info!(action = "start", component = "stats_visualizer", input = ?self.input, output_dir = ?self.output_dir, "Starting statistics visualization");

        let records = self.load()?;
        let extraction = metrics::extract(&records)?;
        let plots = self.render_all(&extraction)?;

        let total_time = total_start_time.elapsed();
        info!(
            action = "complete",
            component = "stats_visualizer",
            record_count = extraction.len(),
            plot_count = plots.len(),
            duration_ms = total_time.as_millis(),
            "Visualization completed successfully"
        );

        Ok(RunSummary {
            input: self.input.clone(),
            record_count: extraction.len(),
            plots,
        })
    }

    fn render_all(&self, extraction: &Extraction) -> Result<Vec<RenderedPlot>, RenderError> {
        ensure_dir(&self.output_dir)?;

        let mut plots = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            let path = self.plot_path(metric);
            plot::plot(extraction.series(metric), metric.title(), &path, self.size)?;
            plots.push(RenderedPlot { metric, path });
        }
        Ok(plots)
    }
}

fn ensure_dir(path: &Path) -> Result<(), RenderError> {
    fs::create_dir_all(path).map_err(|source| RenderError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}

pub fn print_run_summary(summary: &RunSummary) {
    print!("{}", format_run_summary(summary));
}

pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_run_summary(&mut out, summary);
    out
}

fn write_run_summary(out: &mut impl Write, summary: &RunSummary) -> fmt::Result {
    writeln!(out, "\n--- Crawl Statistics Plots ---")?;
    writeln!(out, "Input: {}", summary.input.display())?;
    writeln!(
        out,
        "Records plotted: {}",
        crate::utils::format_number(summary.record_count)
    )?;

    writeln!(out, "\nWrote {} plots:", summary.plots.len())?;
    for rendered in &summary.plots {
        writeln!(
            out,
            "- {} ({}): {}",
            rendered.metric.title(),
            rendered.metric,
            rendered.path.display()
        )?;
    }
    Ok(())
}
