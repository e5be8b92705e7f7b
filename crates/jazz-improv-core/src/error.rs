use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JazzError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Foundation '{0}' not found")]
    FoundationNotFound(String),

    #[error("Phase '{0}' not found. Valid phases: statement, development, resolution")]
    PhaseNotFound(String),
}

impl JazzError {
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, JazzError>;
