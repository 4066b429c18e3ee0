use serde::Deserialize;
use validator::Validate;

fn default_num_questions() -> u32 {
    5
}

fn default_use_wikipedia() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, message = "Topic must not be empty"))]
    pub topic: String,

    #[serde(default = "default_num_questions")]
    pub num_questions: u32,

    #[serde(default = "default_use_wikipedia")]
    pub use_wikipedia: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HistoryParams {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl HistoryParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20)
    }
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self { limit: Some(20) }
    }
}
