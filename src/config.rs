use std::env;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: SecretString,
    pub openai_api_base: Option<String>,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://quiz.db".to_string()),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_default(),
            ),
            openai_api_base: env::var("OPENAI_API_BASE").ok(),
            web_server_host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
        }
    }

    /// Validate that required configuration is set.
    /// Panics if the model API key is missing.
    pub fn validate(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret().is_empty() {
            panic!("FATAL: OPENAI_API_KEY not set in environment");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            openai_api_key: SecretString::from("test_api_key".to_string()),
            openai_api_base: None,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
        }
    }
}
