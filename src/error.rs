//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill taxonomy error: {0}")]
    Taxonomy(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    /// Errors that must stop the service before it accepts any request
    pub fn is_fatal(&self) -> bool {
        matches!(self, AnalyzerError::Configuration(_) | AnalyzerError::Taxonomy(_))
    }
}

impl From<toml::de::Error> for AnalyzerError {
    fn from(err: toml::de::Error) -> Self {
        AnalyzerError::Configuration(format!("Failed to parse TOML: {}", err))
    }
}

impl From<toml::ser::Error> for AnalyzerError {
    fn from(err: toml::ser::Error) -> Self {
        AnalyzerError::Configuration(format!("Failed to serialize TOML: {}", err))
    }
}
