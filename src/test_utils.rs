use crate::models::domain::{Question, QuizPayload, QuizRecord};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Creates a standard repaired question
    pub fn sample_question() -> Question {
        Question {
            question: "Who maintains Rust?".to_string(),
            choices: vec!["Mozilla".to_string(), "The Rust Foundation".to_string()],
            answer: "The Rust Foundation".to_string(),
        }
    }

    /// Creates a payload with a single question for the given topic
    pub fn sample_payload(topic: &str) -> QuizPayload {
        QuizPayload {
            topic: topic.to_string(),
            description: None,
            questions: vec![sample_question()],
            source_text: None,
        }
    }

    /// Creates a persisted record whose raw_output serializes sample_payload
    pub fn sample_record(id: i64, topic: &str, hour: u32) -> QuizRecord {
        QuizRecord {
            id,
            topic: topic.to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            raw_output: serde_json::to_string(&sample_payload(topic)).unwrap(),
        }
    }
}
