pub mod quiz;

pub use quiz::{Question, QuizPayload, QuizRecord, RawQuestion, RawQuizPayload};
