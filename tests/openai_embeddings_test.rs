//! Integration tests for the OpenAI embeddings client
//!
//! These tests make real API calls. To run them:
//! 1. Put `OPENAI_API_KEY` in `.env` (optionally `OPENAI_BASE_URL`)
//! 2. Run: `cargo test --test openai_embeddings_test -- --ignored`

use std::sync::Arc;
use toolvault::config::EmbeddingConfig;
use toolvault::embedding::OpenAiEmbeddings;
use toolvault::store::InMemoryVectorStore;
use toolvault::{tool, EmbeddingError, EmbeddingProvider, ToolboxConfig, Toolbox};

/// Helper to create a test client
fn create_test_client() -> OpenAiEmbeddings {
    dotenvy::dotenv().ok();

    let config = EmbeddingConfig::from_env().expect("OPENAI_API_KEY required in .env");
    OpenAiEmbeddings::new(config).expect("Failed to create embeddings client")
}

#[tool]
/// Shout the statement provided, returning it in upper case.
fn shout(statement: String) -> String {
    format!("{}!", statement.to_uppercase())
}

#[tool]
/// Get the current weather for a location.
fn get_weather(location: String, #[default("celsius")] unit: String) -> String {
    format!("Sunny in {} ({})", location, unit)
}

#[tool]
/// Get the latest stock price for a ticker symbol.
fn get_stock_price(symbol: String) -> f64 {
    symbol.len() as f64
}

#[tokio::test]
#[ignore] // Run with --ignored flag
async fn test_embedding_has_configured_dimensions() {
    let client = create_test_client();

    let vector = client
        .embed("Get the current weather for a location.")
        .await
        .expect("Failed to embed");

    println!("Embedding length: {}", vector.len());
    assert_eq!(vector.len(), client.config().dimensions);
}

#[tokio::test]
#[ignore] // Run with --ignored flag
async fn test_invalid_key_is_authentication_error() {
    dotenvy::dotenv().ok();
    let mut config = EmbeddingConfig::new("sk-invalid");
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let client = OpenAiEmbeddings::new(config).unwrap();

    let err = client.embed("hello").await.unwrap_err();
    assert!(matches!(err, EmbeddingError::Authentication(_)), "got {:?}", err);
}

#[tokio::test]
#[ignore] // Run with --ignored flag
async fn test_semantic_retrieval() {
    let client = create_test_client();
    let dimensions = client.config().dimensions;

    let toolbox = Toolbox::new(
        ToolboxConfig::new(dimensions),
        Arc::new(client),
        Arc::new(InMemoryVectorStore::with_dimensions(dimensions)),
    )
    .unwrap();
    toolbox.register(shout_tool::function()).await.unwrap();
    toolbox.register(get_weather_tool::function()).await.unwrap();
    toolbox.register(get_stock_price_tool::function()).await.unwrap();

    let specs = toolbox.retrieve("please shout this loudly", 1).await.unwrap();
    assert_eq!(specs[0].function.name, "shout");

    let specs = toolbox
        .retrieve("Will it rain in London tomorrow?", 1)
        .await
        .unwrap();
    assert_eq!(specs[0].function.name, "get_weather");
}
