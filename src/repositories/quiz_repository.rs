use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{errors::AppResult, models::domain::QuizRecord};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Persist one generation, returning the assigned row id.
    async fn insert(
        &self,
        topic: &str,
        generated_at: DateTime<Utc>,
        raw_output: &str,
    ) -> AppResult<i64>;

    /// Up to `limit` records, newest first.
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<QuizRecord>>;
}

pub struct SqliteQuizRepository {
    pool: SqlitePool,
}

impl SqliteQuizRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> AppResult<()> {
        log::info!("Ensuring schema for quizzes table");

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS quizzes (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                topic        TEXT NOT NULL,
                generated_at TEXT NOT NULL,
                raw_output   TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_quizzes_topic ON quizzes(topic)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl QuizRepository for SqliteQuizRepository {
    async fn insert(
        &self,
        topic: &str,
        generated_at: DateTime<Utc>,
        raw_output: &str,
    ) -> AppResult<i64> {
        let result =
            sqlx::query("INSERT INTO quizzes (topic, generated_at, raw_output) VALUES (?1, ?2, ?3)")
                .bind(topic)
                .bind(generated_at)
                .bind(raw_output)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<QuizRecord>> {
        let records = sqlx::query_as::<_, QuizRecord>(
            "SELECT id, topic, generated_at, raw_output FROM quizzes
             ORDER BY generated_at DESC
             LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::sqlite::SqlitePoolOptions;

    // A single connection so the in-memory database is shared by every query.
    async fn test_repository() -> SqliteQuizRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let repository = SqliteQuizRepository::new(pool);
        repository.ensure_schema().await.unwrap();
        repository
    }

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repository = test_repository().await;

        let first = repository.insert("Rust", ts(9), "{}").await.unwrap();
        let second = repository.insert("Go", ts(10), "{}").await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn list_recent_orders_newest_first_and_honors_limit() {
        let repository = test_repository().await;

        repository.insert("first", ts(8), "{\"n\":1}").await.unwrap();
        repository.insert("second", ts(10), "{\"n\":2}").await.unwrap();
        repository.insert("third", ts(9), "{\"n\":3}").await.unwrap();

        let records = repository.list_recent(2).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].topic, "second");
        assert_eq!(records[1].topic, "third");
    }

    #[tokio::test]
    async fn list_recent_round_trips_raw_output() {
        let repository = test_repository().await;

        let raw = r#"{"topic":"Rust","questions":[]}"#;
        repository.insert("Rust", ts(12), raw).await.unwrap();

        let records = repository.list_recent(10).await.unwrap();
        assert_eq!(records[0].raw_output, raw);
        assert_eq!(records[0].generated_at, ts(12));
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let repository = test_repository().await;
        repository.ensure_schema().await.unwrap();
    }
}
