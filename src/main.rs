use anyhow::Context;
use clap::Parser;
use docy::{
    api::routes::create_router, chat::PromptPolicy, AppState, ChatEngine, Config,
    DocumentSession, OllamaClient,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Uploads are capped well above typical document sizes.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Parser)]
#[command(name = "docy-server", about = "Single-document RAG chat server")]
struct Args {
    /// Bind address override.
    #[arg(long)]
    host: Option<String>,

    /// Bind port override.
    #[arg(long)]
    port: Option<u16>,

    /// Ollama server URL override.
    #[arg(long, env = "OLLAMA_URL")]
    ollama_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.ollama_url {
        config.llm.ollama_url = url;
    }

    let ollama = Arc::new(OllamaClient::new(
        &config.llm.ollama_url,
        config.llm.embedding_model.clone(),
    ));
    let engine = Arc::new(ChatEngine::new(
        Arc::new(DocumentSession::new()),
        ollama.clone(),
        ollama,
        PromptPolicy::from(&config.policy),
        config.llm.default_model.clone(),
        config.rag.chunk_size,
        config.rag.top_k,
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        engine,
    };

    let app = create_router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, ollama_url = %config.llm.ollama_url, "docy-server listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
