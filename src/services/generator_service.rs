use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    constants::quiz_prompt::{NO_SOURCE_FALLBACK, PREFERRED_MODELS, QUIZ_PROMPT_TEMPLATE},
    errors::{AppError, AppResult},
    models::domain::{QuizPayload, RawQuizPayload},
};

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u16 = 1200;

// Largest brace-delimited span, newlines included. Brittle when the reply
// carries braces inside string literals after the real payload; kept as a
// single bounded fallback, not a general parser.
static JSON_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex compiles"));

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(
        &self,
        topic: &str,
        background: &str,
        question_count: u32,
    ) -> AppResult<QuizPayload>;
}

pub struct GeneratorService {
    client: Client<OpenAIConfig>,
}

impl GeneratorService {
    pub fn new(config: &Config) -> Self {
        let mut openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());
        if let Some(base) = &config.openai_api_base {
            openai_config = openai_config.with_api_base(base);
        }

        Self {
            client: Client::with_config(openai_config),
        }
    }

    /// Pick the first preferred model the provider actually serves.
    async fn select_model(&self) -> AppResult<String> {
        let listing = self.client.models().list().await?;
        let available: Vec<String> = listing.data.into_iter().map(|m| m.id).collect();

        match pick_preferred(&available) {
            Some(model) => Ok(model),
            None => Err(AppError::NoSupportedModel(available)),
        }
    }
}

#[async_trait]
impl QuizGenerator for GeneratorService {
    async fn generate(
        &self,
        topic: &str,
        background: &str,
        question_count: u32,
    ) -> AppResult<QuizPayload> {
        let model = self.select_model().await?;
        let prompt = build_prompt(topic, background, question_count);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&model)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|err| {
            log::error!("Model API request failed: {}", err);
            AppError::GenerationRequest(err.to_string())
        })?;

        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        let raw = parse_payload(text.trim())?;
        Ok(raw.repair(topic))
    }
}

pub fn build_prompt(topic: &str, background: &str, question_count: u32) -> String {
    let source_text = if background.is_empty() {
        NO_SOURCE_FALLBACK
    } else {
        background
    };

    QUIZ_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{source_text}", source_text)
        .replace("{num_questions}", &question_count.to_string())
}

pub fn pick_preferred(available: &[String]) -> Option<String> {
    PREFERRED_MODELS
        .iter()
        .find(|name| available.iter().any(|id| id == *name))
        .map(|name| name.to_string())
}

/// Parse the model's reply: the whole text as JSON first, then one recovery
/// attempt on the largest brace-delimited span.
fn recover_json(text: &str) -> AppResult<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let span = JSON_BLOCK_RE
        .find(text)
        .ok_or_else(|| AppError::InvalidModelOutput(text.to_string()))?;

    serde_json::from_str(span.as_str()).map_err(|err| {
        log::error!("Failed to parse JSON from recovered span: {}", err);
        AppError::InvalidModelOutput(text.to_string())
    })
}

fn parse_payload(text: &str) -> AppResult<RawQuizPayload> {
    let value = recover_json(text)?;

    if !value.get("questions").is_some_and(serde_json::Value::is_array) {
        return Err(AppError::MalformedPayload);
    }

    serde_json::from_value(value).map_err(|_| AppError::InvalidModelOutput(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "topic": "Rust",
        "description": "A systems language",
        "questions": [
            {"question": "Who maintains Rust?", "choices": ["Mozilla", "The Rust Foundation"], "answer": "The Rust Foundation"},
            {"question": "What year was 1.0 released?"}
        ]
    }"#;

    #[test]
    fn parses_well_formed_response() {
        let raw = parse_payload(WELL_FORMED).unwrap();
        let payload = raw.repair("Rust");

        assert_eq!(payload.questions.len(), 2);
        // Present values survive the repair pass untouched.
        assert_eq!(
            payload.questions[0].choices,
            vec!["Mozilla", "The Rust Foundation"]
        );
        assert_eq!(payload.questions[0].answer, "The Rust Foundation");
        // Missing ones get the defaults.
        assert_eq!(payload.questions[1].choices, vec!["A", "B", "C", "D"]);
        assert_eq!(payload.questions[1].answer, "A");
    }

    #[test]
    fn recovers_json_embedded_in_prose() {
        let text = format!("Sure! Here is your quiz:\n{}\nHope that helps.", WELL_FORMED);

        let raw = parse_payload(&text).unwrap();
        assert_eq!(raw.topic.as_deref(), Some("Rust"));
    }

    #[test]
    fn fails_without_any_braces() {
        let err = parse_payload("I cannot produce a quiz for that topic.").unwrap_err();
        assert!(matches!(err, AppError::InvalidModelOutput(_)));
    }

    #[test]
    fn fails_when_recovered_span_is_not_json() {
        let err = parse_payload("look: {not json at all}").unwrap_err();
        assert!(matches!(err, AppError::InvalidModelOutput(_)));
    }

    #[test]
    fn fails_when_questions_missing() {
        let err = parse_payload(r#"{"topic": "Rust"}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedPayload));
    }

    #[test]
    fn fails_when_questions_is_not_a_list() {
        let err = parse_payload(r#"{"questions": "none"}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedPayload));
    }

    #[test]
    fn invalid_output_error_carries_raw_text() {
        let err = parse_payload("no json here").unwrap_err();
        assert!(err.to_string().contains("no json here"));
    }

    #[test]
    fn pick_preferred_respects_preference_order() {
        let available = vec![
            "gpt-3.5-turbo".to_string(),
            "gpt-4o".to_string(),
            "embedding-small".to_string(),
        ];

        assert_eq!(pick_preferred(&available).as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn pick_preferred_returns_none_when_nothing_matches() {
        let available = vec!["some-other-model".to_string()];
        assert_eq!(pick_preferred(&available), None);
    }

    #[test]
    fn build_prompt_interpolates_fields() {
        let prompt = build_prompt("Rust", "Rust is a language.", 3);

        assert!(prompt.contains("(topic: Rust)"));
        assert!(prompt.contains("```Rust is a language.```"));
        assert!(prompt.contains("Generate 3 questions."));
    }

    #[test]
    fn build_prompt_uses_fallback_for_empty_background() {
        let prompt = build_prompt("Rust", "", 5);
        assert!(prompt.contains(NO_SOURCE_FALLBACK));
    }
}
