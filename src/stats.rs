use std::path::PathBuf;

use crate::metrics::Metric;

#[derive(Debug)]
pub struct RenderedPlot {
    pub metric: Metric,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct RunSummary {
    pub input: PathBuf,
    pub record_count: usize,
    pub plots: Vec<RenderedPlot>,
}
