use thiserror::Error;

/// Result type for annotab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the annotation engine
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing from the dataset schema
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// A field exists but its declared type is unsuitable for the operation
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Analyzer or backend configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model resolution or load failures
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid input or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Row mapping contract violations
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a field-not-found error
    pub fn field_not_found(msg: impl Into<String>) -> Self {
        Error::FieldNotFound(msg.into())
    }

    /// Create a type-mismatch error
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Error::TypeMismatch(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a model error
    pub fn model(msg: impl Into<String>) -> Self {
        Error::Model(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a mapping error
    pub fn mapping(msg: impl Into<String>) -> Self {
        Error::Mapping(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Error::Serialization(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Create an other error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

// Implement From for common error types
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidInput(format!("invalid regex: {}", err))
    }
}
