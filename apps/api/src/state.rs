use std::sync::Arc;

use crate::analysis::report::Analyzer;
use crate::config::Config;
use crate::history::HistoryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only analysis pipeline: knowledge base, skill matcher and the
    /// similarity preprocessor chosen at startup.
    pub analyzer: Arc<Analyzer>,
    /// Pluggable history backend. Default: SqliteHistoryStore.
    pub history: Arc<dyn HistoryStore>,
}
