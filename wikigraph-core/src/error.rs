use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("invalid seed URL: {0}")]
    Validation(String),

    #[error("refusing to overwrite existing file {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("invalid destination {}: {reason}", .path.display())]
    BadDestination { path: PathBuf, reason: String },

    #[error("could not encode graph snapshot: {0}")]
    Encode(String),

    #[error("could not decode graph snapshot: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
