/// Prompt for quiz generation. Placeholders `{topic}`, `{source_text}` and
/// `{num_questions}` are substituted before the request is sent.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"You are a helpful assistant that produces a quiz (topic: {topic}).
Use the source text delimited by triple backticks as background knowledge.
Respond with valid JSON only (no additional explanation). The JSON should follow this schema:
{
  "topic": "<topic>",
  "description": "<short description of topic>",
  "questions": [
    {"question": "...", "choices": ["A","B","C","D"], "answer": "A"}
  ],
  "source_text": "<optional short excerpt>"
}

Background:
```{source_text}```

Generate {num_questions} questions. Prefer multiple-choice with 4 options when possible, otherwise short answer.
Be concise in question wording. Ensure answers are correct according to the source.
"#;

/// Substituted for the background block when no source text is available.
pub const NO_SOURCE_FALLBACK: &str = "No source provided";

/// Model identifiers we know how to prompt, in preference order. The first
/// one present in the provider's model listing wins.
pub const PREFERRED_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o", "gpt-4-turbo", "gpt-3.5-turbo"];
