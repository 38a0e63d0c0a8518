//! Mystery Animal Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mystery_animal_engine::api;
use mystery_animal_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::EngineConfig,
    corpus_loader::load_game_data,
    game_log::SqliteGameLog,
    knowledge_graph::KnowledgeGraphClient,
    session_store::InMemorySessionStore,
    ssml::SsmlRenderer,
};
use mystery_animal_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Repo root first, then the working directory.
    load_dotenv_from_repo_root();
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mystery_animal_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mystery Animal Engine");

    let config = EngineConfig::from_env();

    let data = load_game_data(&config.data_dir).await?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        animals = data.animals().len(),
        "Loaded game data"
    );

    let game_log = SqliteGameLog::new(
        &config.game_log_db,
        Arc::new(SystemClock::new()),
        Arc::new(SystemRandom::new()),
    )
    .await?;
    tracing::info!(db = %config.game_log_db, "Game log ready");

    let knowledge = KnowledgeGraphClient::new(
        &config.kg_base_url,
        config.kg_api_key.clone(),
        config.kg_timeout,
    );
    if !knowledge.is_enabled() {
        tracing::warn!("KG_API_KEY not set, unrecognised questions will get the don't-know reply");
    }

    let app = Arc::new(App::new(
        Arc::new(data),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(game_log),
        Arc::new(knowledge),
        SsmlRenderer::new(&config.sound_base_url),
        config.kg_timeout,
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    // The voice router posts JSON, which triggers a preflight from browsers.
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
