//! PgVectorStore against a real PostgreSQL with pgvector
//!
//! These tests start a Docker container. Run with:
//! `cargo test --test pgvector_test -- --ignored`

mod common;

use common::{KeywordEmbedder, KEYWORD_DIMENSIONS};
use serde_json::json;
use std::sync::Arc;
use testcontainers::clients::Cli;
use toolvault::config::PgVectorConfig;
use toolvault::store::PgVectorStore;
use toolvault::{
    tool, ParameterSchema, ToolDescriptor, ToolboxConfig, Toolbox, VectorStore,
};

// Note: This keeps _docker and _container alive for the duration of the test
macro_rules! setup_test {
    ($docker:ident, $container:ident, $store:ident) => {
        let $docker = Cli::default();
        let $container = $docker.run(common::create_pgvector_container());

        // PostgreSQL restarts once after initdb
        tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;

        let host_port = $container.get_host_port_ipv4(common::POSTGRES_PORT);
        let connection_string = common::build_connection_string("127.0.0.1", host_port);
        let config = PgVectorConfig::from_connection_string(&connection_string)
            .unwrap()
            .with_dimensions(KEYWORD_DIMENSIONS);
        let $store = PgVectorStore::new(config).await.unwrap();
        $store.ensure_collection().await.unwrap();
    };
}

fn descriptor(name: &str, description: &str, embedding: Vec<f32>) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        parameters: ParameterSchema::new(),
        embedding,
    }
}

#[tool]
/// Shout the statement provided, returning it in upper case.
fn shout(statement: String) -> String {
    format!("{}!", statement.to_uppercase())
}

#[tool]
/// Get the latest stock price for a ticker symbol.
fn get_stock_price(symbol: String) -> f64 {
    symbol.len() as f64
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_ensure_collection_is_idempotent() {
    setup_test!(_docker, _container, store);

    store.ensure_collection().await.expect("second ensure failed");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_insert_and_search() {
    setup_test!(_docker, _container, store);

    store
        .insert(&descriptor("near", "close by", vec![1.0, 0.0, 0.0, 0.0]))
        .await
        .unwrap();
    store
        .insert(&descriptor("far", "far away", vec![0.0, 1.0, 0.0, 0.0]))
        .await
        .unwrap();

    let results = store.search(&[0.9, 0.1, 0.0, 0.0], 2, 150).await.unwrap();

    let names: Vec<_> = results.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["near", "far"]);
    assert_eq!(results[0].embedding, vec![1.0, 0.0, 0.0, 0.0]);
    assert_eq!(results[0].parameters, ParameterSchema::new());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_insert_same_name_replaces() {
    setup_test!(_docker, _container, store);

    store
        .insert(&descriptor("tool", "first", vec![1.0, 0.0, 0.0, 0.0]))
        .await
        .unwrap();
    store
        .insert(&descriptor("tool", "second", vec![0.0, 1.0, 0.0, 0.0]))
        .await
        .unwrap();

    let results = store.search(&[0.0, 1.0, 0.0, 0.0], 5, 150).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].description, "second");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_search_empty_table() {
    setup_test!(_docker, _container, store);

    let results = store.search(&[1.0, 0.0, 0.0, 0.0], 3, 150).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_wrong_dimension_rejected() {
    setup_test!(_docker, _container, store);

    let result = store.insert(&descriptor("bad", "bad", vec![1.0, 0.0])).await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_toolbox_over_pgvector() {
    setup_test!(_docker, _container, store);

    let toolbox = Toolbox::new(
        ToolboxConfig::new(KEYWORD_DIMENSIONS),
        Arc::new(KeywordEmbedder),
        Arc::new(store),
    )
    .unwrap();
    toolbox.register(shout_tool::function()).await.unwrap();
    toolbox.register(get_stock_price_tool::function()).await.unwrap();

    let specs = toolbox.retrieve("please shout this loudly", 1).await.unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].function.name, "shout");
    assert_eq!(specs[0].function.parameters.required, vec!["statement"]);

    let result = toolbox
        .invoke("shout", json!({"statement": "stored"}))
        .await
        .unwrap();
    assert_eq!(result, json!("STORED!"));
}
