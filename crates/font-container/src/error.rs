use std::{io, path::PathBuf, result};

use read_fonts::ReadError;
use write_fonts::{BuilderError, error};

/// Error types for loading and saving font instances.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("required table '{0}' not found")]
    MissingTable(&'static str),

    #[error("failed to build font: {0}")]
    Build(#[from] BuilderError),

    #[error("failed to write table: {0}")]
    Write(#[from] error::Error),

    #[error("failed to build cmap table")]
    CmapBuild,

    #[error("glyph '{0}' not found")]
    UnknownGlyph(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = result::Result<T, Error>;
