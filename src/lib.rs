//! Semantic tool retrieval
//!
//! Register functions as tools whose descriptions are embedded and stored in a
//! vector index, then retrieve only the tools relevant to a user query in the
//! function-calling format models expect.
//!
//! - [`schema`]: signature to JSON schema extraction
//! - [`registry`]: registration and the name to function mapping
//! - [`retriever`]: query-time similarity lookup
//! - [`embedding`] / [`store`]: the provider and store capabilities

// Lets `#[tool]` expansions refer to `::toolvault` inside this crate too.
extern crate self as toolvault;

pub mod config;
pub mod descriptor;
pub mod embedding;
pub mod error;
pub mod executor;
pub mod function;
pub mod registry;
pub mod retriever;
pub mod schema;
pub mod store;
pub mod toolbox;

// Re-export commonly used types
pub use config::ToolboxConfig;
pub use descriptor::{FunctionSpec, JsonType, ParameterSchema, PropertySchema, ToolDescriptor, ToolSchema, ToolSpec};
pub use embedding::EmbeddingProvider;
pub use error::{
    ConfigError, EmbeddingError, RegistrationError, RetrievalError, SchemaError, StoreError,
    ToolError, UnknownToolError,
};
pub use executor::ToolExecutor;
pub use function::{FunctionCall, ToolCallable, ToolFunction};
pub use registry::ToolRegistry;
pub use retriever::Retriever;
pub use schema::{FunctionSignature, ParamSignature, SchemaExtractor, TypeHint};
pub use store::VectorStore;
pub use toolbox::Toolbox;

pub use toolvault_macros::tool;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
