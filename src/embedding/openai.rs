//! OpenAI-compatible embeddings client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::EmbeddingConfig;
use crate::error::EmbeddingError;

use super::EmbeddingProvider;

/// Request body for `POST /embeddings`
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: Vec<String>,
    model: &'a str,
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Client for the OpenAI embeddings API (or any server speaking it)
pub struct OpenAiEmbeddings {
    http_client: Client,
    config: EmbeddingConfig,
}

impl OpenAiEmbeddings {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the API key is
    /// empty.
    pub fn new(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        if config.api_key.trim().is_empty() {
            return Err(EmbeddingError::Authentication(
                "API key is empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| EmbeddingError::Http {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    fn build_endpoint_url(&self) -> String {
        format!("{}/embeddings", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, text: &str) -> EmbeddingRequest<'_> {
        EmbeddingRequest {
            // Newlines are sent as spaces
            input: vec![text.replace('\n', " ")],
            model: &self.config.model,
            dimensions: self.config.dimensions,
        }
    }
}

fn parse_response(body: &str) -> Result<Vec<f32>, EmbeddingError> {
    let response: EmbeddingResponse = serde_json::from_str(body)?;
    response
        .data
        .into_iter()
        .next()
        .map(|data| data.embedding)
        .ok_or_else(|| EmbeddingError::InvalidResponse("response contained no embeddings".to_string()))
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = self.build_endpoint_url();
        debug!(model = %self.config.model, chars = text.len(), "requesting embedding");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_request(text))
            .send()
            .await
            .map_err(|e| {
                error!("Error generating embedding: {}", e);
                EmbeddingError::from(e)
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            error!("Embedding request rejected: {}", body);
            return Err(EmbeddingError::Authentication(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Error generating embedding: {}", body);
            return Err(EmbeddingError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}
