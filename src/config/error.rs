use crate::params::FieldParseError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("samples should be between 1 and {max}, got {got}")]
    Samples { got: usize, max: usize },
    #[error("significant_figures should be between 1 and {max}, got {got}")]
    SignificantFigures { got: usize, max: usize },
    #[error("expected FIELD=VALUE, got '{0}'")]
    Assignment(String),
    #[error("{0}")]
    Field(#[from] FieldParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
