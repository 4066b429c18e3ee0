use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::errors::{AppError, AppResult};

const WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org/wiki/";
const USER_AGENT: &str = "quizgen-server/0.1 (+https://example.com)";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Soft cap on accumulated intro length. The paragraph that crosses the cap
/// is kept whole.
const INTRO_CHAR_LIMIT: usize = 1000;

static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#mw-content-text").expect("static selector parses"));
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("static selector parses"));

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackgroundFetcher: Send + Sync {
    async fn fetch_intro(&self, topic: &str) -> AppResult<String>;
}

pub struct WikipediaService {
    client: reqwest::Client,
}

impl WikipediaService {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("building a reqwest client with static options should succeed");

        Self { client }
    }
}

impl Default for WikipediaService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackgroundFetcher for WikipediaService {
    /// Fetch the intro paragraph(s) from the Wikipedia page for `topic`.
    async fn fetch_intro(&self, topic: &str) -> AppResult<String> {
        let url = format!("{}{}", WIKIPEDIA_BASE_URL, topic.replace(' ', "_"));
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::PageNotFound(url));
        }
        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        let body = response.text().await?;
        extract_intro(&body)
    }
}

/// Walk `<p>` blocks inside the article body in document order, joining
/// their text with blank lines until the accumulated length passes the cap.
fn extract_intro(html: &str) -> AppResult<String> {
    let document = Html::parse_document(html);

    let content = document
        .select(&CONTENT_SELECTOR)
        .next()
        .ok_or(AppError::Extraction)?;

    let mut paragraphs: Vec<String> = Vec::new();
    let mut accumulated = 0usize;
    for paragraph in content.select(&PARAGRAPH_SELECTOR) {
        let text = paragraph.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            accumulated += text.len() + usize::from(!paragraphs.is_empty());
            paragraphs.push(text);
        }
        if accumulated > INTRO_CHAR_LIMIT {
            break;
        }
    }

    Ok(paragraphs.join("\n\n"))
}
