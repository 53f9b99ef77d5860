mod demo_tools;
mod handlers;
mod models;
mod routes;

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use routes::configure_routes;
use toolvault::config::{EmbeddingConfig, PgVectorConfig, ToolboxConfig};
use toolvault::embedding::OpenAiEmbeddings;
use toolvault::store::{InMemoryVectorStore, PgVectorStore};
use toolvault::{Toolbox, VectorStore};
use tracing::{info, warn};

const DEFAULT_ADDR: &str = "127.0.0.1:3030";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let embedding_config = EmbeddingConfig::from_env()?;
    let config = ToolboxConfig::new(embedding_config.dimensions);
    let embedder = Arc::new(OpenAiEmbeddings::new(embedding_config)?);

    let store: Arc<dyn VectorStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pg_config = PgVectorConfig::from_connection_string(&url)?
                .with_dimensions(config.embedding_dimensions);
            let store = PgVectorStore::new(pg_config).await?;
            store.ensure_collection().await?;
            info!("Using pgvector store");
            Arc::new(store)
        }
        Err(_) => {
            warn!("DATABASE_URL not set, tools are kept in memory only");
            Arc::new(InMemoryVectorStore::with_dimensions(config.embedding_dimensions))
        }
    };

    let toolbox = Arc::new(Toolbox::new(config, embedder, store)?);
    demo_tools::register_all(&toolbox).await?;

    let addr: SocketAddr = std::env::var("TOOLVAULT_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let routes = configure_routes(toolbox);

    info!("Starting server on http://{}", addr);
    warp::serve(routes).run(addr).await;
    Ok(())
}
