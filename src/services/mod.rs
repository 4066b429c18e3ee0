pub mod generator_service;
pub mod quiz_service;
pub mod wikipedia_service;

pub use generator_service::{GeneratorService, QuizGenerator};
pub use quiz_service::QuizService;
pub use wikipedia_service::{BackgroundFetcher, WikipediaService};
