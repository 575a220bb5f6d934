pub mod args;
pub mod error;
pub mod metrics;
pub mod plot;
pub mod record;
pub mod stats;
pub mod utils;
pub mod visualizer;

pub use args::Args;
pub use error::{DataLoadError, MalformedRecordError, RenderError, VisualizerError};
pub use metrics::{extract, Extraction, Metric, MetricSeries};
pub use record::{load, StatRecord};
pub use stats::{RenderedPlot, RunSummary};
pub use visualizer::{format_run_summary, print_run_summary, StatsVisualizer};
