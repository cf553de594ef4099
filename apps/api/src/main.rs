mod config;
mod errors;
mod ingest;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;
mod swipe;
mod triage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ingest::{IngestionPipeline, LlmSummarizer, PdfTextExtractor};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PersistenceStore};
use crate::swipe::{GestureConfig, SwipeSession, Viewport};
use crate::triage::spawn_coordinator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hireswipe v{}", env!("CARGO_PKG_VERSION"));

    // Local persistence
    let kv: Arc<dyn KeyValueStore> = if config.ephemeral {
        warn!("HIRESWIPE_EPHEMERAL is set: cards and decisions will not survive a restart");
        Arc::new(MemoryKeyValueStore::new())
    } else {
        let kv = FileKeyValueStore::open(&config.data_dir)?;
        info!("Data directory: {}", kv.data_dir().display());
        Arc::new(kv)
    };
    let triage = spawn_coordinator(PersistenceStore::new(kv));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let ingest = IngestionPipeline::new(
        Arc::new(PdfTextExtractor),
        Arc::new(LlmSummarizer(llm)),
        triage.clone(),
    );

    let swipe = SwipeSession::new(
        Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
        },
        GestureConfig::default(),
    );

    // Build app state
    let state = AppState {
        triage,
        swipe: Arc::new(Mutex::new(swipe)),
        ingest: Arc::new(ingest),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
