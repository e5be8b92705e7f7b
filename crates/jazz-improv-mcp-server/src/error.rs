// ABOUTME: Error type for configuration, catalog loading and tool output encoding
// ABOUTME: Converts into rmcp ErrorData at the protocol boundary

use jazz_improv_core::JazzError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Catalog error: {0}")]
    Knowledge(#[from] JazzError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        rmcp::ErrorData::internal_error(err.to_string(), None)
    }
}
