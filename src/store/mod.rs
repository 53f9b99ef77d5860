//! Vector stores for tool descriptors
//!
//! A [`VectorStore`] persists [`ToolDescriptor`]s and answers nearest-neighbour
//! queries over their embeddings. Two implementations ship with the crate:
//!
//! - [`InMemoryVectorStore`]: exact cosine search, for tests and small setups
//! - [`PgVectorStore`]: PostgreSQL with the pgvector extension and an HNSW index

pub mod memory;
pub mod pgvector;

use async_trait::async_trait;

use crate::descriptor::ToolDescriptor;
use crate::error::StoreError;

pub use memory::InMemoryVectorStore;
pub use pgvector::PgVectorStore;

/// Persistence and similarity search over tool descriptors
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Persist a descriptor. A descriptor with the same name is replaced.
    async fn insert(&self, descriptor: &ToolDescriptor) -> Result<(), StoreError>;

    /// Return at most `k` descriptors, nearest to `vector` first
    ///
    /// `candidate_pool_size` bounds how many approximate candidates the index
    /// scans before ranking. Stores with exact search may ignore it.
    async fn search(
        &self,
        vector: &[f32],
        k: usize,
        candidate_pool_size: usize,
    ) -> Result<Vec<ToolDescriptor>, StoreError>;
}

/// Cosine similarity in `[-1, 1]`; zero vectors score 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
