//! Query-time tool lookup

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::ToolboxConfig;
use crate::descriptor::{ToolDescriptor, ToolSpec};
use crate::embedding::{check_dimensions, EmbeddingProvider};
use crate::error::RetrievalError;
use crate::store::VectorStore;

/// Finds the tools whose descriptions best match a free-text query
///
/// There is no relevance threshold: the nearest `k` tools are returned however
/// far away they are. Fewer than `k` come back only when the store holds fewer.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    config: ToolboxConfig,
}

impl Retriever {
    pub fn new(
        config: ToolboxConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            embedder,
            store,
            config,
        }
    }

    /// Retrieve with the configured default `k`
    pub async fn retrieve_default(&self, query: &str) -> Result<Vec<ToolSpec>, RetrievalError> {
        self.retrieve(query, self.config.default_top_k).await
    }

    /// Up to `k` tool specs, best match first
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ToolSpec>, RetrievalError> {
        let specs: Vec<ToolSpec> = self
            .search(query, k)
            .await?
            .into_iter()
            .map(ToolSpec::from)
            .collect();

        info!("Successfully populated {} tools", specs.len());
        Ok(specs)
    }

    /// Up to `k` full descriptors (embedding included), best match first
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ToolDescriptor>, RetrievalError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let vector = self
            .embedder
            .embed(query)
            .await
            .and_then(|vector| {
                check_dimensions(&vector, self.config.embedding_dimensions)?;
                Ok(vector)
            })
            .inspect_err(|e| error!("Error generating embedding for query: {}", e))?;

        let candidates = self.config.vector_search_candidates.max(k);
        debug!(k, candidates, "running vector search");

        let mut results = self
            .store
            .search(&vector, k, candidates)
            .await
            .inspect_err(|e| error!("Error performing vector search: {}", e))?;

        results.truncate(k);
        Ok(results)
    }
}
