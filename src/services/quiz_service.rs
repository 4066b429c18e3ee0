use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{QuizPayload, QuizRecord},
    repositories::QuizRepository,
    services::{generator_service::QuizGenerator, wikipedia_service::BackgroundFetcher},
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    generator: Arc<dyn QuizGenerator>,
    fetcher: Arc<dyn BackgroundFetcher>,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        generator: Arc<dyn QuizGenerator>,
        fetcher: Arc<dyn BackgroundFetcher>,
    ) -> Self {
        Self {
            repository,
            generator,
            fetcher,
        }
    }

    /// Generate a quiz for `topic` and persist it. Background fetch failures
    /// degrade to an empty source text; generator failures surface as-is.
    pub async fn create_quiz(
        &self,
        topic: &str,
        question_count: u32,
        use_background: bool,
    ) -> AppResult<QuizPayload> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::InvalidRequest(
                "Topic must not be empty".to_string(),
            ));
        }

        let background = if use_background {
            self.fetcher.fetch_intro(topic).await.unwrap_or_else(|err| {
                log::warn!("Background fetch failed for '{}': {}", topic, err);
                String::new()
            })
        } else {
            String::new()
        };

        let payload = self
            .generator
            .generate(topic, &background, question_count)
            .await?;

        let raw_output = serde_json::to_string(&payload)?;
        self.repository.insert(topic, Utc::now(), &raw_output).await?;

        Ok(payload)
    }

    /// Up to `limit` past generations, newest first. Each entry is the stored
    /// payload with `id`, `topic` and `generated_at` overlaid on top.
    pub async fn list_history(&self, limit: i64) -> AppResult<Vec<serde_json::Value>> {
        let records = self.repository.list_recent(limit).await?;

        Ok(records.into_iter().map(history_entry).collect())
    }
}

fn history_entry(record: QuizRecord) -> serde_json::Value {
    let mut entry = match serde_json::from_str::<serde_json::Value>(&record.raw_output) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => {
            let mut map = serde_json::Map::new();
            map.insert("raw_output".to_string(), json!(record.raw_output));
            map
        }
    };

    entry.insert("id".to_string(), json!(record.id));
    entry.insert("topic".to_string(), json!(record.topic));
    entry.insert(
        "generated_at".to_string(),
        json!(record.generated_at.to_rfc3339()),
    );

    serde_json::Value::Object(entry)
}
