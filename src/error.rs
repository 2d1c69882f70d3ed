use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed annotation file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode annotations: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid image pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, AnnotateError>;
