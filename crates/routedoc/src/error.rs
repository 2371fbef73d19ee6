use thiserror::Error;

/// Result type for document building and export
pub type OpenApiResult<T> = Result<T, OpenApiError>;

/// Errors that can occur while building or exporting a document
#[derive(Debug, Error)]
pub enum OpenApiError {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML configuration parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema generation error
    #[error("Schema generation error: {0}")]
    Schema(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OpenApiError {
    /// Create a new schema generation error
    pub fn schema_error<T: ToString>(msg: T) -> Self {
        Self::Schema(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config_error<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }
}
