use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The statistics document could not be read or parsed.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read statistics file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse statistics file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A record carries a `statistics` value that is not a JSON object.
#[derive(Debug, Error)]
#[error("record {index} ({url:?}) has malformed statistics: expected an object, found {found}")]
pub struct MalformedRecordError {
    pub index: usize,
    pub url: String,
    pub found: &'static str,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to draw {}: {message}", path.display())]
    Draw { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum VisualizerError {
    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
