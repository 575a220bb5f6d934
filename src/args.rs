use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "crawlplot",
    about = "Render scatter plots of per-page crawler statistics",
    version,
    long_about = None
)]
pub struct Args {
    /// Crawler statistics JSON file
    #[arg(short, long, default_value = "./stats.json")]
    pub input: PathBuf,

    /// Directory the SVG plots are written to
    #[arg(short, long, default_value = "./plots")]
    pub output_dir: PathBuf,

    /// Plot width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
