use async_trait::async_trait;
use chrono::Local;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::history::{DashboardStats, HistoryEntry, HistoryStore, SaveParams, RECENT_LIMIT};
use crate::models::history::HistoryRow;

/// Display format of the `timestamp` column.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y";

/// `HistoryStore` backed by the `history` table in SQLite.
#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_entries(&self, limit: Option<i64>) -> Result<Vec<HistoryEntry>, AppError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            "SELECT * FROM history ORDER BY id DESC LIMIT ?",
        )
        // SQLite treats a negative LIMIT as "no limit"
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| HistoryEntry::try_from(row).map_err(AppError::from))
            .collect()
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn save(&self, params: SaveParams<'_>) -> Result<i64, AppError> {
        let SaveParams {
            filename,
            similarity_score,
            ats_score,
            health_score,
            missing_skills,
            report,
        } = params;

        let missing_json = serde_json::to_string(missing_skills)?;
        let report_json = serde_json::to_string(report)?;
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let id = sqlx::query(
            r#"
            INSERT INTO history
                (filename, timestamp, score, ats_score, health_score, missing_skills, results_json)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(filename)
        .bind(&timestamp)
        .bind(similarity_score)
        .bind(ats_score)
        .bind(health_score)
        .bind(&missing_json)
        .bind(&report_json)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(id, filename, "Saved analysis to history");
        Ok(id)
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, AppError> {
        self.fetch_entries(None).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<AnalysisReport>, AppError> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT results_json FROM history WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(AppError::from)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let affected = sqlx::query("DELETE FROM history WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        debug!(id, affected, "Deleted history entry");
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let (total, avg, best): (i64, Option<f64>, Option<f64>) =
            sqlx::query_as("SELECT COUNT(*), AVG(score), MAX(score) FROM history")
                .fetch_one(&self.pool)
                .await?;

        if total == 0 {
            return Ok(DashboardStats::default());
        }

        Ok(DashboardStats {
            total_resumes: total,
            avg_score: avg.unwrap_or(0.0).round() as i64,
            best_score: best.unwrap_or(0.0).round() as i64,
            recent: self.fetch_entries(Some(RECENT_LIMIT)).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::analysis::knowledge::KnowledgeBase;
    use crate::analysis::preprocess::{build_preprocessor, PreprocessMode};
    use crate::analysis::report::Analyzer;
    use crate::db::init_schema;

    async fn store() -> SqliteHistoryStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        SqliteHistoryStore::new(pool)
    }

    fn report(filename: &str, resume: &str) -> AnalysisReport {
        let analyzer = Analyzer::new(
            Arc::new(KnowledgeBase::builtin().unwrap()),
            build_preprocessor(PreprocessMode::Plain),
        )
        .unwrap();
        analyzer.analyze(
            resume,
            "Python engineer with Docker and Kubernetes experience",
            filename,
        )
    }

    #[tokio::test]
    async fn test_save_then_get_round_trips() {
        let store = store().await;
        let report = report("cv.pdf", "Python and Docker developer, me@x.io");

        let id = store.save(SaveParams::from(&report)).await.unwrap();
        let fetched = store.get_by_id(id).await.unwrap();

        assert_eq!(fetched, Some(report));
    }

    #[tokio::test]
    async fn test_get_missing_id_is_none() {
        let store = store().await;
        assert_eq!(store.get_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first() {
        let store = store().await;
        let first = store
            .save(SaveParams::from(&report("a.pdf", "python")))
            .await
            .unwrap();
        let second = store
            .save(SaveParams::from(&report("b.docx", "docker")))
            .await
            .unwrap();

        let history = store.list_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second);
        assert_eq!(history[0].filename, "b.docx");
        assert_eq!(history[1].id, first);
        assert_eq!(history[0].missing_skills, history[0].report.missing_skills);
        assert_eq!(history[0].timestamp.len(), "19/10/2026".len());
    }

    #[tokio::test]
    async fn test_delete_removes_entry_and_ignores_unknown_ids() {
        let store = store().await;
        let id = store
            .save(SaveParams::from(&report("a.pdf", "python")))
            .await
            .unwrap();

        store.delete(id + 100).await.unwrap();
        assert_eq!(store.list_history().await.unwrap().len(), 1);

        store.delete(id).await.unwrap();
        assert!(store.list_history().await.unwrap().is_empty());
        assert_eq!(store.get_by_id(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dashboard_empty_store() {
        let store = store().await;
        assert_eq!(store.dashboard_stats().await.unwrap(), DashboardStats::default());
    }

    #[tokio::test]
    async fn test_dashboard_aggregates() {
        let store = store().await;
        let base = report("cv.pdf", "python");
        for (i, score) in [40.4, 60.6, 80.2, 10.0, 20.0, 30.0].into_iter().enumerate() {
            let filename = format!("cv{i}.pdf");
            let report = AnalysisReport {
                similarity_score: score,
                filename: filename.clone(),
                ..base.clone()
            };
            store.save(SaveParams::from(&report)).await.unwrap();
        }

        let stats = store.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_resumes, 6);
        // (40.4 + 60.6 + 80.2 + 10 + 20 + 30) / 6 = 40.2
        assert_eq!(stats.avg_score, 40);
        assert_eq!(stats.best_score, 80);
        assert_eq!(stats.recent.len(), 5);
        assert_eq!(stats.recent[0].filename, "cv5.pdf");
        assert_eq!(stats.recent[4].filename, "cv1.pdf");
    }

    #[tokio::test]
    async fn test_corrupt_row_surfaces_as_error() {
        let store = store().await;
        sqlx::query(
            "INSERT INTO history (filename, timestamp, score, ats_score, health_score, missing_skills, results_json)
             VALUES ('x.pdf', '01/01/2026', 1.0, 1.0, 1.0, '[]', 'not json')",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        assert!(matches!(
            store.list_history().await,
            Err(AppError::Serialization(_))
        ));
    }
}
