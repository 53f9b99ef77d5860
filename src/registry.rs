//! Tool registration
//!
//! [`ToolRegistry`] turns a [`ToolFunction`] into a persisted
//! [`ToolDescriptor`] and keeps the name to function mapping needed to run the
//! tool later. The mapping lives only in this process; after a restart tools
//! must be registered again.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::ToolboxConfig;
use crate::descriptor::ToolDescriptor;
use crate::embedding::{check_dimensions, EmbeddingProvider};
use crate::error::{RegistrationError, ToolError, UnknownToolError};
use crate::executor::ToolExecutor;
use crate::function::ToolFunction;
use crate::schema::SchemaExtractor;
use crate::store::VectorStore;

/// Registry of tool functions backed by a vector store
///
/// Registering a name that already exists overwrites it, both in the store
/// and in the in-process mapping.
///
/// # Example
///
/// ```ignore
/// let registry = ToolRegistry::new(config, embedder, store);
/// let descriptor = registry.register(get_weather_tool::function()).await?;
/// let result = registry.invoke("get_weather", json!({"location": "Paris"})).await?;
/// ```
pub struct ToolRegistry {
    extractor: SchemaExtractor,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    config: ToolboxConfig,
    functions: RwLock<HashMap<String, ToolFunction>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .field("config", &self.config)
            .finish()
    }
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new(
        config: ToolboxConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            extractor: SchemaExtractor::new(),
            embedder,
            store,
            config,
            functions: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ToolboxConfig {
        &self.config
    }

    /// Register a function under its declared name
    pub async fn register(&self, function: ToolFunction) -> Result<ToolDescriptor, RegistrationError> {
        let name = function.name().to_string();
        self.register_as(function, &name).await
    }

    /// Register a function under an explicit name
    ///
    /// Extracts the schema, embeds the description, persists the descriptor and
    /// finally records the function. If any step fails nothing is recorded.
    pub async fn register_as(
        &self,
        function: ToolFunction,
        name: &str,
    ) -> Result<ToolDescriptor, RegistrationError> {
        let schema = self
            .extractor
            .extract_as(function.signature(), name)
            .inspect_err(|e| error!("{}", e))?;

        let embedding = self
            .embedder
            .embed(&schema.description)
            .await
            .and_then(|vector| {
                check_dimensions(&vector, self.config.embedding_dimensions)?;
                Ok(vector)
            })
            .inspect_err(|e| error!("Error registering tool {}: {}", name, e))?;

        let descriptor = ToolDescriptor::new(schema, embedding);

        self.store
            .insert(&descriptor)
            .await
            .inspect_err(|e| error!("Error registering tool {}: {}", name, e))?;

        self.functions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), function);

        info!("Successfully registered tool: {}", name);
        Ok(descriptor)
    }

    /// Look up a registered function
    pub fn get_callable(&self, name: &str) -> Result<ToolFunction, UnknownToolError> {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownToolError::new(name))
    }

    /// Run a registered function with JSON arguments
    pub async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let function = self.get_callable(name)?;
        function.call(arguments).await
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        self.invoke(name, arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmbeddingError, SchemaError, StoreError};
    use crate::schema::{FunctionSignature, ParamSignature, TypeHint};
    use crate::store::InMemoryVectorStore;
    use serde::Deserialize;
    use serde_json::json;

    struct LengthEmbedder;

    #[async_trait]
    impl EmbeddingProvider for LengthEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::Http {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    struct FailingStore;

    #[async_trait]
    impl VectorStore for FailingStore {
        async fn insert(&self, _descriptor: &ToolDescriptor) -> Result<(), StoreError> {
            Err(StoreError::Connection("refused".to_string()))
        }

        async fn search(
            &self,
            _vector: &[f32],
            _k: usize,
            _candidate_pool_size: usize,
        ) -> Result<Vec<ToolDescriptor>, StoreError> {
            Err(StoreError::Connection("refused".to_string()))
        }
    }

    #[derive(Deserialize)]
    struct ShoutArgs {
        statement: String,
    }

    fn shout() -> ToolFunction {
        let signature = FunctionSignature::new("shout")
            .with_doc("Shout the statement in upper case.")
            .param(ParamSignature::new("statement", TypeHint::Text));
        ToolFunction::from_sync(signature, |args: ShoutArgs| Ok(args.statement.to_uppercase()))
    }

    fn registry_with(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> ToolRegistry {
        ToolRegistry::new(ToolboxConfig::new(2), embedder, store)
    }

    #[tokio::test]
    async fn test_register_and_invoke() {
        let store = Arc::new(InMemoryVectorStore::new());
        let registry = registry_with(Arc::new(LengthEmbedder), store.clone());

        let descriptor = registry.register(shout()).await.unwrap();
        assert_eq!(descriptor.name, "shout");
        assert_eq!(descriptor.parameters.required, vec!["statement"]);
        assert_eq!(descriptor.embedding.len(), 2);
        assert_eq!(store.get("shout").unwrap(), descriptor);

        let function = registry.get_callable("shout").unwrap();
        let result = function.call(json!({"statement": "hello"})).await.unwrap();
        assert_eq!(result, json!("HELLO"));

        let result = registry.invoke("shout", json!({"statement": "hi"})).await.unwrap();
        assert_eq!(result, json!("HI"));
    }

    #[tokio::test]
    async fn test_register_with_name_override() {
        let registry = registry_with(Arc::new(LengthEmbedder), Arc::new(InMemoryVectorStore::new()));
        let descriptor = registry.register_as(shout(), "yell").await.unwrap();

        assert_eq!(descriptor.name, "yell");
        assert!(registry.contains("yell"));
        assert!(!registry.contains("shout"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = registry_with(Arc::new(LengthEmbedder), Arc::new(InMemoryVectorStore::new()));
        assert_eq!(
            registry.get_callable("missing").unwrap_err(),
            UnknownToolError::new("missing")
        );
        let err = registry.invoke("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_missing_documentation_is_not_registered() {
        let store = Arc::new(InMemoryVectorStore::new());
        let registry = registry_with(Arc::new(LengthEmbedder), store.clone());
        let undocumented = ToolFunction::from_sync(FunctionSignature::new("quiet"), |_: serde_json::Value| {
            Ok(())
        });

        let err = registry.register(undocumented).await.unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::Schema(SchemaError::MissingDocumentation { .. })
        ));
        assert!(registry.is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_leaves_no_partial_state() {
        let store = Arc::new(InMemoryVectorStore::new());
        let registry = registry_with(Arc::new(FailingEmbedder), store.clone());

        let err = registry.register(shout()).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Embedding(_)));
        assert!(registry.get_callable("shout").is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_leaves_no_partial_state() {
        let registry = registry_with(Arc::new(LengthEmbedder), Arc::new(FailingStore));

        let err = registry.register(shout()).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Store(StoreError::Connection(_))));
        assert!(!registry.contains("shout"));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_rejected() {
        let registry = ToolRegistry::new(
            ToolboxConfig::new(3),
            Arc::new(LengthEmbedder),
            Arc::new(InMemoryVectorStore::new()),
        );
        let err = registry.register(shout()).await.unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::Embedding(EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_reregistration_overwrites() {
        let store = Arc::new(InMemoryVectorStore::new());
        let registry = registry_with(Arc::new(LengthEmbedder), store.clone());
        registry.register(shout()).await.unwrap();

        let whisper = ToolFunction::from_sync(
            FunctionSignature::new("shout")
                .with_doc("Whisper the statement instead.")
                .param(ParamSignature::new("statement", TypeHint::Text)),
            |args: ShoutArgs| Ok(args.statement.to_lowercase()),
        );
        registry.register(whisper).await.unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("shout").unwrap().description,
            "Whisper the statement instead."
        );
        let result = registry.invoke("shout", json!({"statement": "HeLLo"})).await.unwrap();
        assert_eq!(result, json!("hello"));
    }

    #[tokio::test]
    async fn test_tool_executor_trait() {
        let registry = registry_with(Arc::new(LengthEmbedder), Arc::new(InMemoryVectorStore::new()));
        registry.register(shout()).await.unwrap();

        let executor: &dyn ToolExecutor = &registry;
        let result = executor.execute("shout", json!({"statement": "ok"})).await.unwrap();
        assert_eq!(result, json!("OK"));
    }

    #[tokio::test]
    async fn test_names_sorted() {
        let registry = registry_with(Arc::new(LengthEmbedder), Arc::new(InMemoryVectorStore::new()));
        registry.register_as(shout(), "zeta").await.unwrap();
        registry.register_as(shout(), "alpha").await.unwrap();
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
    }
}
