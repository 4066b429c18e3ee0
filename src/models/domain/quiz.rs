use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted generation. One row per successful request, never updated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, FromRow)]
pub struct QuizRecord {
    pub id: i64,
    pub topic: String,
    pub generated_at: DateTime<Utc>,
    pub raw_output: String,
}

/// The quiz returned to callers and serialized into `QuizRecord::raw_output`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizPayload {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
}

pub const DEFAULT_CHOICES: [&str; 4] = ["A", "B", "C", "D"];

/// The payload as the model returns it, every field optional. Repair fills
/// the gaps without touching anything the model did provide.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawQuizPayload {
    pub topic: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<RawQuestion>>,
    pub source_text: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub question: String,
    pub choices: Option<Vec<String>>,
    pub answer: Option<String>,
}

impl RawQuestion {
    /// Default `choices` to A-D and `answer` to the first choice (or the
    /// literal "A" when the choice list is present but empty).
    pub fn repair(self) -> Question {
        let choices = self
            .choices
            .unwrap_or_else(|| DEFAULT_CHOICES.iter().map(|c| c.to_string()).collect());
        let answer = self
            .answer
            .unwrap_or_else(|| choices.first().cloned().unwrap_or_else(|| "A".to_string()));

        Question {
            question: self.question,
            choices,
            answer,
        }
    }
}

impl RawQuizPayload {
    pub fn repair(self, fallback_topic: &str) -> QuizPayload {
        QuizPayload {
            topic: self.topic.unwrap_or_else(|| fallback_topic.to_string()),
            description: self.description,
            questions: self
                .questions
                .unwrap_or_default()
                .into_iter()
                .map(RawQuestion::repair)
                .collect(),
            source_text: self.source_text,
        }
    }
}
