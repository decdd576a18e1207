use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `history` table, exactly as stored.
/// `missing_skills` and `results_json` hold JSON text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoryRow {
    pub id: i64,
    pub filename: String,
    /// Creation date, `%d/%m/%Y` in local time.
    pub timestamp: String,
    pub score: f64,
    pub ats_score: f64,
    pub health_score: f64,
    pub missing_skills: String,
    pub results_json: String,
}
