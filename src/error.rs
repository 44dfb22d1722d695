//! Domain errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration, content or templates
#[derive(Error, Debug)]
pub enum BlogError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid front matter: {0}")]
    FrontMatter(String),

    #[error("post not found: {0}")]
    PostNotFound(String),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

impl BlogError {
    /// Wrap an IO error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = BlogError> = std::result::Result<T, E>;
