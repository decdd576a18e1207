//! Analysis history: persisted reports and the dashboard summary.
//!
//! `AppState` holds an `Arc<dyn HistoryStore>`; the SQLite backend lives in
//! [`sqlite`]. Every method is one short statement; there are no transactions
//! spanning a request and rows are never updated after insert.

pub mod handlers;
pub mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::models::history::HistoryRow;

/// How many entries the dashboard shows under "recent".
pub const RECENT_LIMIT: i64 = 5;

/// Everything written for one saved analysis. The summary columns are
/// denormalized copies of report fields so listings never parse the report.
pub struct SaveParams<'a> {
    pub filename: &'a str,
    pub similarity_score: f64,
    pub ats_score: f64,
    pub health_score: f64,
    pub missing_skills: &'a [String],
    pub report: &'a AnalysisReport,
}

impl<'a> From<&'a AnalysisReport> for SaveParams<'a> {
    fn from(report: &'a AnalysisReport) -> Self {
        Self {
            filename: &report.filename,
            similarity_score: report.similarity_score,
            ats_score: report.ats_score as f64,
            health_score: report.health_score as f64,
            missing_skills: &report.missing_skills,
            report,
        }
    }
}

/// A saved analysis as returned by listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub filename: String,
    pub timestamp: String,
    pub score: f64,
    pub ats_score: f64,
    pub health_score: f64,
    pub missing_skills: Vec<String>,
    pub report: AnalysisReport,
}

impl TryFrom<HistoryRow> for HistoryEntry {
    type Error = serde_json::Error;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(HistoryEntry {
            id: row.id,
            filename: row.filename,
            timestamp: row.timestamp,
            score: row.score,
            ats_score: row.ats_score,
            health_score: row.health_score,
            missing_skills: serde_json::from_str(&row.missing_skills)?,
            report: serde_json::from_str(&row.results_json)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_resumes: i64,
    /// Mean similarity score, rounded.
    pub avg_score: i64,
    /// Highest similarity score, rounded.
    pub best_score: i64,
    /// Most recent entries first, at most [`RECENT_LIMIT`].
    pub recent: Vec<HistoryEntry>,
}

/// Persistence contract for analysis history. Failures propagate to the
/// caller unchanged; there is no retry policy.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Stores a report and returns its newly assigned id.
    async fn save(&self, params: SaveParams<'_>) -> Result<i64, AppError>;

    /// All entries, most recent first.
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, AppError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<AnalysisReport>, AppError>;

    /// Deleting an id that does not exist is a no-op.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError>;
}
