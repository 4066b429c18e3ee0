use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::SqliteQuizRepository,
    services::{GeneratorService, QuizService, WikipediaService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(SqliteQuizRepository::new(db.pool().clone()));
        quiz_repository.ensure_schema().await?;

        let generator = Arc::new(GeneratorService::new(&config));
        let fetcher = Arc::new(WikipediaService::new());
        let quiz_service = Arc::new(QuizService::new(quiz_repository, generator, fetcher));

        Ok(Self {
            quiz_service,
            config: Arc::new(config),
        })
    }
}
