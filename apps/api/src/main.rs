mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod history;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::knowledge::KnowledgeBase;
use crate::analysis::preprocess::build_preprocessor;
use crate::analysis::report::Analyzer;
use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::history::sqlite::SqliteHistoryStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite history
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    init_schema(&db).await?;
    let history = Arc::new(SqliteHistoryStore::new(db));

    // Skill knowledge base: bundled by default, overridable via SKILL_DB_PATH
    let knowledge = match &config.skill_db_path {
        Some(path) => KnowledgeBase::from_skill_file(path)?,
        None => KnowledgeBase::builtin()?,
    };
    info!("Knowledge base loaded ({} skills)", knowledge.skills.len());

    let preprocessor = build_preprocessor(config.preprocess_mode);
    let analyzer = Analyzer::new(Arc::new(knowledge), preprocessor)
        .context("Failed to compile skill patterns")?;
    info!("Similarity preprocessing: {}", analyzer.preprocessor_name());

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(analyzer),
        history,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
