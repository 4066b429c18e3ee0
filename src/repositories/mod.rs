pub mod quiz_repository;

pub use quiz_repository::{QuizRepository, SqliteQuizRepository};

#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
