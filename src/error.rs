//! Error types for tool registration, retrieval and invocation

use thiserror::Error;

/// Failures while deriving a schema from a function signature
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The function has no (or only whitespace) documentation
    #[error("Error registering tool {name}: documentation is missing")]
    MissingDocumentation { name: String },
}

/// Failures from an embedding provider
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// HTTP request failures
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// The provider answered with a body we could not interpret
    #[error("Invalid embedding response: {0}")]
    InvalidResponse(String),

    /// The vector length does not match the configured dimensionality
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Missing or rejected credentials
    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::Http {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EmbeddingError {
    fn from(err: serde_json::Error) -> Self {
        EmbeddingError::InvalidResponse(err.to_string())
    }
}

/// Failures from a vector store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable or authentication failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// SQL errors, missing index, constraint violations
    #[error("Database error: {0}")]
    Database(String),

    /// Connection pool issues
    #[error("Pool error: {0}")]
    Pool(String),

    /// A persisted record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The vector length does not match the store's dimensionality
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            return StoreError::Database(format!(
                "{}: {}",
                db_error.code().code(),
                db_error.message()
            ));
        }
        StoreError::Database(format!("{:?}", err))
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::Pool(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Failures while registering a tool. Nothing is recorded in the registry
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to embed tool description: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Failed to persist tool: {0}")]
    Store(#[from] StoreError),
}

/// A tool name that is not present in the in-process registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown tool: {name}")]
pub struct UnknownToolError {
    pub name: String,
}

impl UnknownToolError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Infrastructure failures during retrieval
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Failed to embed query: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Vector search failed: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised while invoking a registered tool
#[derive(Debug, Error)]
pub enum ToolError {
    /// Argument missing or of the wrong shape
    #[error("Parameter error: {0}")]
    Parameter(String),

    /// The tool itself returned an error
    #[error("Execution error: {0}")]
    Execution(String),

    /// The tool's result could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownTool(#[from] UnknownToolError),
}

impl ToolError {
    /// Creates a [`ToolError::Parameter`].
    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }

    /// Creates a [`ToolError::Execution`].
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}

/// Invalid configuration values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
}
