pub mod quiz_handler;

pub use quiz_handler::{generate_quiz, get_history, health_check};
