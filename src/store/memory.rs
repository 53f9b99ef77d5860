//! In-process vector store with exact cosine search

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::descriptor::ToolDescriptor;
use crate::error::StoreError;

use super::{cosine_similarity, VectorStore};

/// Descriptors held in memory, keyed by name in insertion order
///
/// Search scans every record, so `candidate_pool_size` has no effect. Ties in
/// similarity keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    dimensions: Option<usize>,
    records: RwLock<IndexMap<String, ToolDescriptor>>,
}

impl InMemoryVectorStore {
    /// A store accepting vectors of any (but consistent) length
    pub fn new() -> Self {
        Self::default()
    }

    /// A store rejecting vectors whose length is not `dimensions`
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: Some(dimensions),
            records: RwLock::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A stored descriptor by name
    pub fn get(&self, name: &str) -> Option<ToolDescriptor> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn check_dimensions(&self, actual: usize) -> Result<(), StoreError> {
        match self.dimensions {
            Some(expected) if expected != actual => {
                Err(StoreError::DimensionMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn insert(&self, descriptor: &ToolDescriptor) -> Result<(), StoreError> {
        self.check_dimensions(descriptor.embedding.len())?;
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        if self.dimensions.is_none() {
            if let Some(existing) = records.values().find(|d| d.name != descriptor.name) {
                if existing.embedding.len() != descriptor.embedding.len() {
                    return Err(StoreError::DimensionMismatch {
                        expected: existing.embedding.len(),
                        actual: descriptor.embedding.len(),
                    });
                }
            }
        }

        // Replacing keeps the original insertion slot
        records.insert(descriptor.name.clone(), descriptor.clone());
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        k: usize,
        _candidate_pool_size: usize,
    ) -> Result<Vec<ToolDescriptor>, StoreError> {
        self.check_dimensions(vector.len())?;
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = records.values().next() {
            if existing.embedding.len() != vector.len() {
                return Err(StoreError::DimensionMismatch {
                    expected: existing.embedding.len(),
                    actual: vector.len(),
                });
            }
        }

        let mut scored: Vec<(f32, &ToolDescriptor)> = records
            .values()
            .map(|descriptor| (cosine_similarity(vector, &descriptor.embedding), descriptor))
            .collect();

        // Stable sort: equal scores stay in insertion order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, descriptor)| descriptor.clone())
            .collect())
    }
}
