//! A registry and a retriever sharing one provider and one store

use std::sync::Arc;

use crate::config::ToolboxConfig;
use crate::descriptor::{ToolDescriptor, ToolSpec};
use crate::embedding::EmbeddingProvider;
use crate::error::{ConfigError, RegistrationError, RetrievalError, ToolError, UnknownToolError};
use crate::function::ToolFunction;
use crate::registry::ToolRegistry;
use crate::retriever::Retriever;
use crate::store::VectorStore;

/// Register tools and retrieve them by query through one handle
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use toolvault::config::{EmbeddingConfig, ToolboxConfig};
/// use toolvault::embedding::OpenAiEmbeddings;
/// use toolvault::store::InMemoryVectorStore;
/// use toolvault::{tool, Toolbox};
///
/// #[tool]
/// /// Get the current stock price for a ticker symbol.
/// fn get_stock_price(symbol: String) -> f64 {
///     42.0
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let embedder = OpenAiEmbeddings::new(EmbeddingConfig::from_env()?)?;
///     let toolbox = Toolbox::new(
///         ToolboxConfig::default(),
///         Arc::new(embedder),
///         Arc::new(InMemoryVectorStore::new()),
///     )?;
///
///     toolbox.register(get_stock_price_tool::function()).await?;
///     let tools = toolbox.retrieve("how is ACME trading?", 1).await?;
///     println!("{}", serde_json::to_string_pretty(&tools)?);
///     Ok(())
/// }
/// ```
pub struct Toolbox {
    registry: ToolRegistry,
    retriever: Retriever,
}

impl Toolbox {
    pub fn new(
        config: ToolboxConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: ToolRegistry::new(config.clone(), Arc::clone(&embedder), Arc::clone(&store)),
            retriever: Retriever::new(config, embedder, store),
        })
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub async fn register(&self, function: ToolFunction) -> Result<ToolDescriptor, RegistrationError> {
        self.registry.register(function).await
    }

    pub async fn register_as(
        &self,
        function: ToolFunction,
        name: &str,
    ) -> Result<ToolDescriptor, RegistrationError> {
        self.registry.register_as(function, name).await
    }

    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ToolSpec>, RetrievalError> {
        self.retriever.retrieve(query, k).await
    }

    pub async fn retrieve_default(&self, query: &str) -> Result<Vec<ToolSpec>, RetrievalError> {
        self.retriever.retrieve_default(query).await
    }

    pub fn get_callable(&self, name: &str) -> Result<ToolFunction, UnknownToolError> {
        self.registry.get_callable(name)
    }

    pub async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        self.registry.invoke(name, arguments).await
    }
}
