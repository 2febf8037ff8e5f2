use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("sample count must be at least 2, got {0}")]
    SampleCount(usize),
    #[error("run {run} is malformed at point {index}: steps must be finite and non-decreasing")]
    MalformedRun { run: String, index: usize },
    #[error("max step {max_step} is not a valid upper bound for a range starting at {min_step}")]
    StepRange { min_step: f64, max_step: f64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("record {index} in {} failed its {part} checksum", .path.display())]
    Checksum {
        path: PathBuf,
        index: usize,
        part: &'static str,
    },
    #[error("record {index} in {} is not a valid event: {source}", .path.display())]
    Decode {
        path: PathBuf,
        index: usize,
        #[source]
        source: prost::DecodeError,
    },
    #[error("scalar '{tag}' not found, available scalars: [{}]", .available.join(", "))]
    MissingTag { tag: String, available: Vec<String> },
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid colour '{0}', expected #rrggbb")]
    Colour(String),
    #[error("invalid results: {0}")]
    Results(String),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
