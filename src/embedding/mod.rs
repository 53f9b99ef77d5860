//! Embedding providers
//!
//! An [`EmbeddingProvider`] turns text into a fixed-length vector. The
//! registry embeds tool descriptions with it and the retriever embeds queries,
//! so both sides must use the same provider and dimensionality.

pub mod openai;

use async_trait::async_trait;

use crate::error::EmbeddingError;

pub use openai::OpenAiEmbeddings;

/// Text to vector capability consumed by the registry and the retriever
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single piece of text
    ///
    /// # Errors
    ///
    /// Returns an [`EmbeddingError`] on provider or network failure. Callers
    /// abort the current operation; no retry is attempted.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Check that a vector has the configured length
pub fn check_dimensions(vector: &[f32], expected: usize) -> Result<(), EmbeddingError> {
    if vector.len() == expected {
        Ok(())
    } else {
        Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: vector.len(),
        })
    }
}
